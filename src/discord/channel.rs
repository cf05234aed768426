//! Discord channel identifiers, as used by bot-mode messages.

use super::error::{DiscordError, Result};
use std::fmt;

/// Channels are referred to by their numeric snowflake ID. This can be found
/// in the UI with developer mode enabled by copying the channel ID.
///
/// ```
/// use hermod::discord::channel::ChannelId;
///
/// assert!(ChannelId::parse("1446513684712132700").is_ok());
/// assert!(ChannelId::parse("#general").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

impl ChannelId {
    pub fn parse<T: ToString>(raw: T) -> Result<Self> {
        let raw = raw.to_string();
        let trimmed = raw.trim();

        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DiscordError::Validation(format!(
                "Channel ID must be numeric, got {:?}.",
                raw
            )));
        }

        Ok(ChannelId(trimmed.to_owned()))
    }
}

/// Format without the surrounding newtype wrapper.
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The endpoint that creates a message in the given channel.
pub fn messages_url(api_base: &str, channel: &ChannelId) -> String {
    format!(
        "{}/channels/{}/messages",
        api_base.trim_end_matches('/'),
        channel
    )
}
