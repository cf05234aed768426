//! Post messages to Discord, either through a webhook or as a bot.
//!
//! A [MessageBuilder] accumulates and validates a message, optionally with an
//! [embed](embed::EmbedBuilder), and sends it in a single request.
//!
//! See [message::MessageBuilder].

pub mod api;
pub mod auth;
pub mod channel;
pub mod destination;
pub mod embed;
pub mod error;
pub mod field;
pub mod message;
pub mod source;

pub use error::DiscordError;
pub use message::MessageBuilder;
