//! Rich embeds and a fluent builder for them.
//!
//! Only the subset of Discord's embed object that we produce is modelled:
//! <https://discord.com/developers/docs/resources/message#embed-object>

use super::error::{DiscordError, Result};
use super::field::Field;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// The most fields we'll attach to a single embed.
pub const FIELDS_MAX: usize = 10;

/// Discord's named colour palette, plus an escape hatch for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedColor {
    Default,
    White,
    Aqua,
    Green,
    Blue,
    Yellow,
    Purple,
    LuminousVividPink,
    Fuchsia,
    Gold,
    Orange,
    Red,
    Grey,
    Navy,
    DarkAqua,
    DarkGreen,
    DarkBlue,
    DarkPurple,
    DarkVividPink,
    DarkGold,
    DarkOrange,
    DarkRed,
    DarkGrey,
    DarkerGrey,
    LightGrey,
    DarkNavy,
    Blurple,
    Greyple,
    DarkButNotBlack,
    NotQuiteBlack,
    Custom(u32),
}

impl EmbedColor {
    /// The integer Discord expects in an embed's `color`.
    pub fn to_discord_color(self) -> u32 {
        match self {
            EmbedColor::Default => 0x000000,
            EmbedColor::White => 0xFFFFFF,
            EmbedColor::Aqua => 0x1ABC9C,
            EmbedColor::Green => 0x57F287,
            EmbedColor::Blue => 0x3498DB,
            EmbedColor::Yellow => 0xFEE75C,
            EmbedColor::Purple => 0x9B59B6,
            EmbedColor::LuminousVividPink => 0xE91E63,
            EmbedColor::Fuchsia => 0xEB459E,
            EmbedColor::Gold => 0xF1C40F,
            EmbedColor::Orange => 0xE67E22,
            EmbedColor::Red => 0xED4245,
            EmbedColor::Grey => 0x95A5A6,
            EmbedColor::Navy => 0x34495E,
            EmbedColor::DarkAqua => 0x11806A,
            EmbedColor::DarkGreen => 0x1F8B4C,
            EmbedColor::DarkBlue => 0x206694,
            EmbedColor::DarkPurple => 0x71368A,
            EmbedColor::DarkVividPink => 0xAD1457,
            EmbedColor::DarkGold => 0xC27C0E,
            EmbedColor::DarkOrange => 0xA84300,
            EmbedColor::DarkRed => 0x992D22,
            EmbedColor::DarkGrey => 0x979C9F,
            EmbedColor::DarkerGrey => 0x7F8C8D,
            EmbedColor::LightGrey => 0xBCC0C0,
            EmbedColor::DarkNavy => 0x2C3E50,
            EmbedColor::Blurple => 0x5865F2,
            EmbedColor::Greyple => 0x99AAB5,
            EmbedColor::DarkButNotBlack => 0x2C2F33,
            EmbedColor::NotQuiteBlack => 0x23272A,
            EmbedColor::Custom(x) => x,
        }
    }
}

impl From<u32> for EmbedColor {
    fn from(x: u32) -> Self {
        EmbedColor::Custom(x)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbedAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmbedFooter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// A single embed. Unset attributes are left off the wire entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Embed {
    /// Whether nothing at all has been set, in which case the embed isn't
    /// worth sending.
    pub fn is_empty(&self) -> bool {
        *self == Embed::default()
    }
}

/// Fluent builder for an [Embed].
///
/// Setters which can reject their input return a [Result] so that a chain
/// can continue with `?`.
///
/// ```
/// use hermod::discord::embed::{EmbedBuilder, EmbedColor};
///
/// # fn main() -> Result<(), hermod::discord::DiscordError> {
/// let embed = EmbedBuilder::new()
///     .title("Deploy finished")
///     .color(EmbedColor::Green)
///     .image_url("https://example.com/graph.png")?
///     .build();
///
/// assert_eq!(embed.color, Some(0x57F287));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbedBuilder {
    embed: Embed,
}

impl EmbedBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.embed.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.embed.description = Some(description.into());
        self
    }

    /// Makes the title a link.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.embed.url = Some(url.into());
        self
    }

    /// Stamp the embed with the current time. The time is captured now, not
    /// when the message is eventually sent.
    pub fn enable_timestamp(mut self) -> Self {
        self.embed.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    pub fn color(mut self, color: impl Into<EmbedColor>) -> Self {
        self.embed.color = Some(color.into().to_discord_color());
        self
    }

    pub fn author_name(mut self, name: impl Into<String>) -> Self {
        self.author().name = Some(name.into());
        self
    }

    pub fn author_url(mut self, url: impl Into<String>) -> Self {
        self.author().url = Some(url.into());
        self
    }

    pub fn author_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.author().icon_url = Some(icon_url.into());
        self
    }

    pub fn footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer().text = Some(text.into());
        self
    }

    pub fn footer_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.footer().icon_url = Some(icon_url.into());
        self
    }

    /// Discord only proxies images served over HTTPS.
    pub fn image_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        if !url.starts_with("https://") {
            return Err(DiscordError::Validation(format!(
                "Image URL must use https, got {:?}.",
                url
            )));
        }

        self.embed.image = Some(EmbedImage { url });
        Ok(self)
    }

    /// Replace the embed's fields, typically with the output of a
    /// [FieldListBuilder](super::field::FieldListBuilder).
    pub fn fields(mut self, fields: Vec<Field>) -> Result<Self> {
        check_field_count(fields.len())?;

        self.embed.fields = fields;
        Ok(self)
    }

    /// Replace the embed's fields from loosely structured JSON. Keys other
    /// than `name`, `value`, and `inline` are dropped; recognised keys must
    /// hold the right type.
    pub fn fields_from_json<I>(self, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let raw: Vec<Value> = fields.into_iter().collect();
        check_field_count(raw.len())?;

        let fields = raw
            .into_iter()
            .map(|x| {
                serde_json::from_value::<Field>(x)
                    .map_err(|e| DiscordError::Validation(format!("Malformed embed field: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        self.fields(fields)
    }

    pub fn build(self) -> Embed {
        self.embed
    }

    fn author(&mut self) -> &mut EmbedAuthor {
        self.embed.author.get_or_insert_with(Default::default)
    }

    fn footer(&mut self) -> &mut EmbedFooter {
        self.embed.footer.get_or_insert_with(Default::default)
    }
}

fn check_field_count(n: usize) -> Result<()> {
    if n > FIELDS_MAX {
        return Err(DiscordError::Validation(format!(
            "An embed can have at most {} fields, got {}.",
            FIELDS_MAX, n
        )));
    }

    Ok(())
}
