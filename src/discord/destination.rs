//! Where a message is delivered, and how that target is authenticated.

use super::auth::{to_auth_header_val, BotToken};
use super::channel::{messages_url, ChannelId};
use super::error::{DiscordError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use url::Url;

/// Messages go either to a pre-authorised webhook URL or, with a bot token,
/// to a channel's message endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Webhook {
        url: Option<String>,
    },
    Bot {
        channel_id: Option<ChannelId>,
        token: Option<BotToken>,
    },
}

impl Default for Destination {
    fn default() -> Self {
        Destination::Webhook { url: None }
    }
}

impl Destination {
    /// A webhook destination, validating the URL up front.
    pub fn webhook(url: &str) -> Result<Self> {
        check_url(url, "webhook URL")?;

        Ok(Destination::Webhook {
            url: Some(url.to_owned()),
        })
    }

    pub fn bot(channel_id: ChannelId, token: BotToken) -> Self {
        Destination::Bot {
            channel_id: Some(channel_id),
            token: Some(token),
        }
    }

    /// The URL to POST to. Presence is only checked here, at dispatch time,
    /// since it may legitimately be supplied after construction.
    pub fn url(&self, api_base: &str) -> Result<String> {
        match self {
            Destination::Webhook { url: Some(url) } => Ok(url.to_owned()),
            Destination::Webhook { url: None } => Err(DiscordError::Configuration(
                "Webhook URL is not set. Use set_webhook_url() to set it.".into(),
            )),
            Destination::Bot {
                channel_id: Some(channel_id),
                ..
            } => Ok(messages_url(api_base, channel_id)),
            Destination::Bot {
                channel_id: None, ..
            } => Err(DiscordError::Configuration(
                "Channel ID is not set. Use set_channel_id() to set it.".into(),
            )),
        }
    }

    /// Add whatever authentication the destination needs. Webhook URLs carry
    /// their own credentials.
    pub fn authorize(&self, headers: &mut HeaderMap) -> Result<()> {
        match self {
            Destination::Webhook { .. } => Ok(()),
            Destination::Bot { token: None, .. } => Err(DiscordError::Configuration(
                "Bot token is not set. Use set_bot_token() to set it.".into(),
            )),
            Destination::Bot {
                token: Some(token), ..
            } => {
                let mut val = HeaderValue::from_str(&to_auth_header_val(token)).map_err(|_| {
                    DiscordError::Configuration("Bot token is not a valid header value.".into())
                })?;
                val.set_sensitive(true);

                headers.insert(AUTHORIZATION, val);
                Ok(())
            }
        }
    }
}

/// Validate that `raw` is a well-formed absolute URL with a host.
pub(crate) fn check_url(raw: &str, what: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(DiscordError::Validation(format!("The {} is empty.", what)));
    }

    let url = Url::parse(raw)
        .map_err(|e| DiscordError::Validation(format!("Invalid {} format: {}.", what, e)))?;

    if url.host_str().is_none() {
        return Err(DiscordError::Validation(format!(
            "Invalid {} format: missing host.",
            what
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discord::api::API_BASE;

    #[test]
    fn test_check_url() {
        assert!(check_url("https://discord.com/api/webhooks/1/abc", "URL").is_ok());
        assert!(check_url("http://localhost:8080/hook", "URL").is_ok());

        for bad in ["", "   ", "not-a-url", "mailto:someone@example.com", "/relative"] {
            assert!(
                matches!(check_url(bad, "URL"), Err(DiscordError::Validation(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_webhook_url_resolution() {
        let dest = Destination::webhook("https://discord.com/api/webhooks/1/abc").unwrap();
        assert_eq!(
            dest.url(API_BASE).unwrap(),
            "https://discord.com/api/webhooks/1/abc"
        );

        assert!(matches!(
            Destination::default().url(API_BASE),
            Err(DiscordError::Configuration(_))
        ));
    }

    #[test]
    fn test_bot_url_resolution() {
        let dest = Destination::bot(
            ChannelId::parse("1234").unwrap(),
            BotToken("token".into()),
        );
        assert_eq!(
            dest.url(API_BASE).unwrap(),
            "https://discord.com/api/v10/channels/1234/messages"
        );

        let missing = Destination::Bot {
            channel_id: None,
            token: Some(BotToken("token".into())),
        };
        assert!(matches!(
            missing.url(API_BASE),
            Err(DiscordError::Configuration(_))
        ));
    }

    #[test]
    fn test_authorize() {
        let mut headers = HeaderMap::new();
        Destination::default().authorize(&mut headers).unwrap();
        assert!(headers.is_empty());

        let dest = Destination::bot(ChannelId::parse("1").unwrap(), BotToken("abc".into()));
        dest.authorize(&mut headers).unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bot abc");

        let tokenless = Destination::Bot {
            channel_id: Some(ChannelId::parse("1").unwrap()),
            token: None,
        };
        assert!(tokenless.authorize(&mut HeaderMap::new()).is_err());

        let bad = Destination::bot(ChannelId::parse("1").unwrap(), BotToken("a\nb".into()));
        assert!(matches!(
            bad.authorize(&mut HeaderMap::new()),
            Err(DiscordError::Configuration(_))
        ));
    }
}
