//! Helpers around Discord's `Bot` authorization scheme.

use std::fmt;

/// A newtype wrapper around a Discord bot token.
#[derive(PartialEq, Eq, Clone)]
pub struct BotToken(pub String);

// Keeps tokens out of logs and panic messages.
impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(..)")
    }
}

impl BotToken {
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// Convert a bot token to a `Bot` `Authorization` header value.
///
/// ```
/// use hermod::discord::auth::{to_auth_header_val, BotToken};
///
/// let token = BotToken("MTk4.foo.bar".into());
/// assert_eq!(to_auth_header_val(&token), "Bot MTk4.foo.bar");
/// ```
pub fn to_auth_header_val(t: &BotToken) -> String {
    format!("Bot {}", t.0)
}
