//! Embed fields and an incremental builder for lists of them.

use super::error::{DiscordError, Result};
use serde::{Deserialize, Serialize};

/// A single name/value entry within an embed.
///
/// Every key is optional on the wire so that partially specified fields pass
/// through untouched; Discord itself decides whether they're acceptable.
/// Deserializing ignores any keys other than these three.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Field {
            name: Some(name.into()),
            value: Some(value.into()),
            inline: Some(inline),
        }
    }
}

/// Builds a list of [Field]s one attribute at a time. [name](Self::name)
/// opens a field, and [value](Self::value) and [inline](Self::inline) apply
/// to whichever field was opened last.
///
/// ```
/// use hermod::discord::field::FieldListBuilder;
///
/// # fn main() -> Result<(), hermod::discord::DiscordError> {
/// let fields = FieldListBuilder::new()
///     .name("Status")
///     .value("Deployed")?
///     .inline(true)?
///     .name("Region")
///     .value("eu-west-1")?
///     .build();
///
/// assert_eq!(fields.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldListBuilder {
    fields: Vec<Field>,
}

impl FieldListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.fields.push(Field {
            name: Some(name.into()),
            ..Default::default()
        });
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Result<Self> {
        self.current("value()")?.value = Some(value.into());
        Ok(self)
    }

    pub fn inline(mut self, inline: bool) -> Result<Self> {
        self.current("inline()")?.inline = Some(inline);
        Ok(self)
    }

    /// The fields in the order they were opened. Limits are checked once the
    /// list is attached to an embed.
    pub fn build(self) -> Vec<Field> {
        self.fields
    }

    fn current(&mut self, caller: &str) -> Result<&mut Field> {
        self.fields
            .last_mut()
            .ok_or_else(|| DiscordError::Sequence(format!("Call name() before {}.", caller)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_before_name() {
        let res = FieldListBuilder::new().value("orphan");
        assert!(matches!(res, Err(DiscordError::Sequence(_))));
    }

    #[test]
    fn test_inline_before_name() {
        let res = FieldListBuilder::new().inline(true);
        assert!(matches!(res, Err(DiscordError::Sequence(ref msg)) if msg.contains("inline()")));
    }

    #[test]
    fn test_mutators_apply_to_latest_field() {
        let fields = FieldListBuilder::new()
            .name("a")
            .value("1")
            .unwrap()
            .name("b")
            .inline(false)
            .unwrap()
            .value("2")
            .unwrap()
            .build();

        assert_eq!(
            fields,
            vec![
                Field {
                    name: Some("a".into()),
                    value: Some("1".into()),
                    inline: None,
                },
                Field {
                    name: Some("b".into()),
                    value: Some("2".into()),
                    inline: Some(false),
                },
            ]
        );
    }

    #[test]
    fn test_build_does_not_validate() {
        let mut b = FieldListBuilder::new();
        for i in 0..12 {
            b = b.name(format!("field {}", i));
        }

        assert_eq!(b.build().len(), 12);
    }

    #[test]
    fn test_serialization_omits_unset_keys() {
        let fields = FieldListBuilder::new().name("only a name").build();

        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!([{ "name": "only a name" }])
        );
    }

    #[test]
    fn test_deserialization_drops_unknown_keys() {
        let field: Field = serde_json::from_value(json!({
            "name": "n",
            "value": "v",
            "inline": true,
            "colour": "red",
        }))
        .unwrap();

        assert_eq!(field, Field::new("n", "v", true));
    }
}
