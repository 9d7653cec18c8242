use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid channel name {channel}: {reason}")]
    InvalidChannel { channel: String, reason: String },

    #[error("Bot has already been closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to install logger: {0}")]
    Logging(#[from] log::SetLoggerError),
}
