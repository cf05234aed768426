//! Client configuration, optionally sourced from the environment.
//!
//! The following environment variables are recognised, all optional:
//!
//! - `DISCORD_WEBHOOK_URL`
//! - `DISCORD_USERNAME`
//! - `DISCORD_AVATAR_URL`
//! - `DISCORD_CHANNEL_ID` and `DISCORD_BOT_TOKEN`, together selecting bot mode
//! - `DISCORD_TIMEOUT_SECS`

use crate::discord::{
    api::{API_BASE, DEFAULT_TIMEOUT},
    DiscordError,
};
use reqwest::header::HeaderMap;
use std::{env, time::Duration};

/// Everything a [MessageBuilder](crate::discord::MessageBuilder) can be
/// pre-populated with.
// Not `Debug`: holds a bot token.
#[derive(Clone)]
pub struct ClientConfig {
    pub webhook_url: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub channel_id: Option<String>,
    pub bot_token: Option<String>,
    pub headers: HeaderMap,
    pub timeout: Duration,
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            webhook_url: None,
            username: None,
            avatar_url: None,
            channel_id: None,
            bot_token: None,
            headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
            api_base: API_BASE.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment. Call
    /// [dotenvy::dotenv] beforehand to include a `.env` file.
    pub fn from_env() -> Result<Self, DiscordError> {
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Read configuration through an arbitrary lookup. Empty values are
    /// treated as absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DiscordError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());

        let timeout = match get("DISCORD_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT,
            Some(x) => x.trim().parse().map(Duration::from_secs).map_err(|_| {
                DiscordError::Configuration(format!(
                    "Could not parse DISCORD_TIMEOUT_SECS to seconds: {:?}",
                    x
                ))
            })?,
        };

        Ok(ClientConfig {
            webhook_url: get("DISCORD_WEBHOOK_URL"),
            username: get("DISCORD_USERNAME"),
            avatar_url: get("DISCORD_AVATAR_URL"),
            channel_id: get("DISCORD_CHANNEL_ID"),
            bot_token: get("DISCORD_BOT_TOKEN"),
            timeout,
            ..Default::default()
        })
    }

    /// Bot mode needs both halves of its credentials.
    pub fn is_bot(&self) -> bool {
        self.channel_id.is_some() && self.bot_token.is_some()
    }
}
