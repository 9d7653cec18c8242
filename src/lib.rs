pub mod bot;
pub mod chatters;
pub mod config;
pub mod console;
pub mod error;
pub mod events;
pub mod logging;
pub mod twitch;

pub use bot::Bot;
pub use chatters::Chatters;
pub use error::BotError;
pub use events::{BotMessage, HandlerId};
pub use twitch::ClientEvent;

use std::io::{self, BufRead};
use std::thread;

use log::info;
use tokio::sync::oneshot;

use crate::config::Config;

/// Builds the bot from `config`, starts it and keeps it running until a line
/// is entered on stdin or Ctrl+C is pressed.
pub async fn run(config: Config) -> Result<(), BotError> {
    let mut bot = Bot::new(&config.twitch.bot)?;
    console::attach(&mut bot);

    bot.start()?;
    info!("Bot is now running. Press Enter or Ctrl+C to exit.");

    let input = wait_for_line(io::BufReader::new(io::stdin()));

    tokio::select! {
        _ = bot.run() => {
            info!("Twitch IRC client stopped.");
        }
        line = input => {
            if let Ok(line) = line {
                line?;
            }
            info!("Input received, shutting down.");
        }
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Received Ctrl+C, shutting down.");
        }
    }

    bot.close();
    info!(
        "Bot has shut down. {} chatters, {} raids this session.",
        bot.chatters().len(),
        bot.raids_since_stream_begun()
    );
    Ok(())
}

/// Reads one line from `reader` on its own thread.
///
/// The thread is detached, so a read that never finishes does not keep the
/// runtime (and the process) alive once `main` returns.
pub fn wait_for_line<R>(mut reader: R) -> oneshot::Receiver<io::Result<String>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let result = reader.read_line(&mut line).map(|_| line);
        let _ = tx.send(result);
    });
    rx
}
