use gamerbot::{config::Config, logging::init_logging, run, BotError};

#[tokio::main]
async fn main() -> Result<(), BotError> {
    let config = Config::new()?;
    init_logging(config.log_level)?;

    run(config).await?;

    Ok(())
}
