//! Build a message, then send it to a webhook or a channel.
//!
//! ```no_run
//! use hermod::discord::MessageBuilder;
//! use hermod::discord::embed::EmbedColor;
//!
//! # fn main() -> Result<(), hermod::discord::DiscordError> {
//! let mut msg = MessageBuilder::new();
//! msg.set_webhook_url("https://discord.com/api/webhooks/1/abc")?
//!     .set_username("deploy-bot")?
//!     .text("Deploy finished")?
//!     .add_embed(|e| Ok(e.title("v42").color(EmbedColor::Green)))?
//!     .send()?;
//!
//! assert!(msg.successful());
//! # Ok(())
//! # }
//! ```

use super::{
    api::{ReqwestTransport, Response, Transport, API_BASE, DEFAULT_TIMEOUT},
    auth::BotToken,
    channel::ChannelId,
    destination::{check_url, Destination},
    embed::{Embed, EmbedBuilder},
    error::{DiscordError, Result},
    source::{Condition, ContentSource},
};
use crate::config::ClientConfig;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const TEXT_MAX: usize = 2000;
pub const USERNAME_MAX: usize = 80;

/// Accumulates a single message and sends it.
///
/// Setters validate immediately and leave the builder untouched on error.
/// Only the presence of content and of a destination are checked later, at
/// [send](Self::send), since either may be supplied in any order.
pub struct MessageBuilder {
    destination: Destination,
    text: Option<String>,
    raw_content: Option<Map<String, Value>>,
    username: Option<String>,
    avatar_url: Option<String>,
    allow_tts: bool,
    embed: Option<Embed>,
    headers: HeaderMap,
    timeout: Duration,
    api_base: String,
    transport: Option<Box<dyn Transport>>,
    last_response: Option<Response>,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        MessageBuilder {
            destination: Destination::default(),
            text: None,
            raw_content: None,
            username: None,
            avatar_url: None,
            allow_tts: false,
            embed: None,
            headers: HeaderMap::new(),
            timeout: DEFAULT_TIMEOUT,
            api_base: API_BASE.to_owned(),
            transport: None,
            last_response: None,
        }
    }
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a builder from configuration. Values pass through the
    /// same validation as their setters.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut b = MessageBuilder {
            headers: config.headers,
            timeout: config.timeout,
            api_base: config.api_base,
            ..Default::default()
        };

        if let Some(url) = &config.webhook_url {
            b.set_webhook_url(url)?;
        }
        if let Some(username) = &config.username {
            b.set_username(username.as_str())?;
        }
        if let Some(avatar_url) = &config.avatar_url {
            b.set_avatar(avatar_url)?;
        }
        if let (Some(channel_id), Some(token)) = (&config.channel_id, &config.bot_token) {
            b.set_channel_id(channel_id)?.set_bot_token(token.as_str())?;
        }

        Ok(b)
    }

    /// Start from extra headers to send with every request.
    pub fn with_headers(headers: HeaderMap) -> Result<Self> {
        if headers.is_empty() {
            return Err(DiscordError::Validation(
                "with_headers() requires at least one header.".into(),
            ));
        }

        Ok(MessageBuilder {
            headers,
            ..Default::default()
        })
    }

    /// Start with a request timeout other than [DEFAULT_TIMEOUT]. Has no
    /// effect on a transport supplied with [transport](Self::transport).
    pub fn with_timeout(timeout: Duration) -> Self {
        MessageBuilder {
            timeout,
            ..Default::default()
        }
    }

    /// Start in bot mode, posting to `channel_id` as the bot owning `token`.
    pub fn bot<T: ToString>(channel_id: T, token: impl Into<String>) -> Result<Self> {
        let mut b = Self::default();
        b.set_channel_id(channel_id)?.set_bot_token(token)?;
        Ok(b)
    }

    /// Swap out how requests are made, for instance to stub Discord in tests.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    /// Point bot-mode requests somewhere other than Discord's API.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn set_webhook_url(&mut self, url: &str) -> Result<&mut Self> {
        self.destination = Destination::webhook(url)?;
        Ok(self)
    }

    /// Switch to bot mode, keeping any bot token already set.
    pub fn set_channel_id<T: ToString>(&mut self, channel_id: T) -> Result<&mut Self> {
        let channel_id = ChannelId::parse(channel_id)?;
        let token = match &self.destination {
            Destination::Bot { token, .. } => token.clone(),
            Destination::Webhook { .. } => None,
        };

        self.destination = Destination::Bot {
            channel_id: Some(channel_id),
            token,
        };
        Ok(self)
    }

    /// Switch to bot mode, keeping any channel already set.
    pub fn set_bot_token(&mut self, token: impl Into<String>) -> Result<&mut Self> {
        let token = BotToken(token.into());
        if token.is_empty() {
            return Err(DiscordError::Validation("The bot token is empty.".into()));
        }

        let channel_id = match &self.destination {
            Destination::Bot { channel_id, .. } => channel_id.clone(),
            Destination::Webhook { .. } => None,
        };

        self.destination = Destination::Bot {
            channel_id,
            token: Some(token),
        };
        Ok(self)
    }

    /// Supply the message body wholesale. Ignored if [text](Self::text) is
    /// also set.
    pub fn set_content<'a>(&mut self, source: impl Into<ContentSource<'a>>) -> Result<&mut Self> {
        self.raw_content = Some(source.into().resolve()?);
        Ok(self)
    }

    pub fn text(&mut self, text: impl Into<String>) -> Result<&mut Self> {
        let text = text.into();
        let len = text.chars().count();
        if len > TEXT_MAX {
            return Err(DiscordError::Validation(format!(
                "The text is too long. Maximum {} characters, got {}.",
                TEXT_MAX, len
            )));
        }

        self.text = Some(text);
        Ok(self)
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> Result<&mut Self> {
        let username = username.into();
        if username.chars().count() > USERNAME_MAX {
            return Err(DiscordError::Validation(format!(
                "Username cannot exceed {} characters.",
                USERNAME_MAX
            )));
        }

        self.username = Some(username);
        Ok(self)
    }

    pub fn set_avatar(&mut self, avatar_url: &str) -> Result<&mut Self> {
        check_url(avatar_url, "avatar URL")?;

        self.avatar_url = Some(avatar_url.to_owned());
        Ok(self)
    }

    pub fn allow_tts(&mut self) -> &mut Self {
        self.allow_tts = true;
        self
    }

    /// Configure the message's embed. The closure receives a fresh
    /// [EmbedBuilder]; if it fails, any previous embed is kept.
    pub fn add_embed<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(EmbedBuilder) -> Result<EmbedBuilder>,
    {
        let embed = configure(EmbedBuilder::new())?.build();

        self.embed = Some(embed);
        Ok(self)
    }

    /// The JSON object that will be sent. Building is free of side effects,
    /// so repeated calls agree.
    pub fn build_payload(&self) -> Result<Map<String, Value>> {
        let text = self.text.as_deref().filter(|x| !x.is_empty());
        let raw = self.raw_content.as_ref().filter(|x| !x.is_empty());

        let mut payload = match (text, raw) {
            (Some(text), _) => {
                let mut map = Map::new();
                map.insert("content".into(), text.into());
                map
            }
            (None, Some(raw)) => raw.clone(),
            (None, None) => return Err(DiscordError::MissingContent),
        };

        if let Some(username) = self.username.as_deref().filter(|x| !x.is_empty()) {
            payload.insert("username".into(), username.into());
        }

        if let Some(avatar_url) = &self.avatar_url {
            payload.insert("avatar_url".into(), avatar_url.as_str().into());
        }

        if self.allow_tts {
            payload.insert("tts".into(), true.into());
        }

        if let Some(embed) = self.embed.as_ref().filter(|x| !x.is_empty()) {
            // Discord accepts a list of embeds; we only ever send one.
            payload.insert("embeds".into(), Value::Array(vec![serde_json::to_value(embed)?]));
        }

        Ok(payload)
    }

    /// The URL the message will be POSTed to.
    pub fn url(&self) -> Result<String> {
        self.destination.url(&self.api_base)
    }

    /// The headers the message will be sent with: the caller's own, exactly
    /// one JSON `Content-Type`, and bot authorisation where applicable.
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = self.headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.destination.authorize(&mut headers)?;

        Ok(headers)
    }

    /// Send the message, replacing any previous response.
    ///
    /// If the exchange never completes, the previous response is kept.
    /// Discord answering with an error status is not an `Err`; check
    /// [successful](Self::successful). An `Err` means the message couldn't be
    /// put together or the exchange never completed.
    pub fn send(&mut self) -> Result<&mut Self> {
        let url = self.url()?;
        let headers = self.headers()?;
        let body = serde_json::to_string(&Value::Object(self.build_payload()?))?;

        let kind = match self.destination {
            Destination::Webhook { .. } => "webhook",
            Destination::Bot { .. } => "bot",
        };
        debug!(kind, bytes = body.len(), "Sending Discord message");

        let res = self.transport_or_default().and_then(|t| t.post(&url, &headers, body));

        match res {
            Ok(res) => {
                if res.is_success() {
                    info!(kind, status = res.status, "Discord message sent");
                } else {
                    warn!(kind, status = res.status, body = %res.body, "Discord rejected message");
                }

                self.last_response = Some(res);
                Ok(self)
            }
            Err(e) => {
                error!(kind, error = %e, "Discord message send failed");
                Err(e)
            }
        }
    }

    /// The transport set with [transport](Self::transport), or a
    /// [ReqwestTransport] built on first use and kept for later sends.
    fn transport_or_default(&mut self) -> Result<&dyn Transport> {
        let transport: Box<dyn Transport> = match self.transport.take() {
            Some(t) => t,
            None => Box::new(ReqwestTransport::new(self.timeout)?),
        };

        Ok(&**self.transport.insert(transport))
    }

    /// Send the message only if `condition` holds. Otherwise nothing happens,
    /// and any previous response is kept.
    pub fn send_when<'a>(&mut self, condition: impl Into<Condition<'a>>) -> Result<&mut Self> {
        if condition.into().resolve()? {
            self.send()
        } else {
            debug!("Condition not met, not sending Discord message");
            Ok(self)
        }
    }

    /// Whether the last send got a 2xx response. False if nothing has been
    /// sent yet.
    pub fn successful(&self) -> bool {
        self.last_response
            .as_ref()
            .map(Response::is_success)
            .unwrap_or(false)
    }

    pub fn failed(&self) -> bool {
        !self.successful()
    }

    /// Discord's response body verbatim, or empty if nothing has been sent.
    pub fn raw_response_body(&self) -> &str {
        self.last_response
            .as_ref()
            .map(|x| x.body.as_str())
            .unwrap_or("")
    }

    pub fn last_response(&self) -> Option<&Response> {
        self.last_response.as_ref()
    }
}
