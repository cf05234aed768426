//! Send a one-off message to Discord.
//!
//! The message text is the program's arguments joined by spaces. Where it's
//! sent is determined by environment variables, see [hermod::config].

use dotenvy::dotenv;
use hermod::{
    config::ClientConfig,
    discord::{DiscordError, MessageBuilder},
};
use std::{env, process::ExitCode};
use tracing::{error, info, warn};

/// Application entrypoint. Initialises tracing, checks for environment
/// variables, and sends the message.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let text = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        error!("Usage: hermod <message>");
        return ExitCode::FAILURE;
    }

    match send(text) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Send `text` as configured by the environment, reporting whether Discord
/// accepted it.
fn send(text: String) -> Result<bool, DiscordError> {
    let config = ClientConfig::from_env()?;
    if config.webhook_url.is_none() && !config.is_bot() {
        warn!(
            "Neither $DISCORD_WEBHOOK_URL nor $DISCORD_CHANNEL_ID and $DISCORD_BOT_TOKEN are set"
        );
    }

    let mut msg = MessageBuilder::with_config(config)?;
    msg.text(text)?.send()?;

    if msg.successful() {
        info!("Message delivered");
    } else {
        warn!(body = msg.raw_response_body(), "Message not delivered");
    }

    Ok(msg.successful())
}
