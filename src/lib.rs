//! The messenger of the gods, for Discord.
//!
//! A fluent client for Discord's webhook and bot message endpoints. See
//! [discord::MessageBuilder] to get started, and [config::ClientConfig] for
//! sourcing credentials from the environment.

pub mod config;
pub mod discord;
