//! Values that may be supplied directly or computed on demand.
//!
//! Closures are evaluated exactly once, at the call they're passed to, and
//! are never retained.

use super::error::{DiscordError, Result};
use serde_json::{Map, Value};

/// A pre-built message body, bypassing `text()`.
pub enum ContentSource<'a> {
    Literal(Value),
    Deferred(Box<dyn FnOnce() -> Value + 'a>),
}

impl<'a> ContentSource<'a> {
    pub fn deferred<F>(f: F) -> Self
    where
        F: FnOnce() -> Value + 'a,
    {
        ContentSource::Deferred(Box::new(f))
    }

    /// Evaluate the source, which must produce a JSON object.
    pub fn resolve(self) -> Result<Map<String, Value>> {
        let (val, origin) = match self {
            ContentSource::Literal(x) => (x, "content"),
            ContentSource::Deferred(f) => (f(), "closure passed to set_content()"),
        };

        match val {
            Value::Object(map) => Ok(map),
            other => Err(DiscordError::Validation(format!(
                "The {} must be a JSON object, got {}.",
                origin,
                json_type(&other)
            ))),
        }
    }
}

impl From<Value> for ContentSource<'_> {
    fn from(x: Value) -> Self {
        ContentSource::Literal(x)
    }
}

impl From<Map<String, Value>> for ContentSource<'_> {
    fn from(x: Map<String, Value>) -> Self {
        ContentSource::Literal(Value::Object(x))
    }
}

/// Whether `send_when()` should go ahead.
pub enum Condition<'a> {
    Literal(bool),
    Deferred(Box<dyn FnOnce() -> bool + 'a>),
    /// A predicate whose result is only known to be JSON, for instance one
    /// evaluated from configuration. It must produce a JSON boolean.
    Dynamic(Box<dyn FnOnce() -> Value + 'a>),
}

impl<'a> Condition<'a> {
    pub fn when<F>(f: F) -> Self
    where
        F: FnOnce() -> bool + 'a,
    {
        Condition::Deferred(Box::new(f))
    }

    pub fn dynamic<F>(f: F) -> Self
    where
        F: FnOnce() -> Value + 'a,
    {
        Condition::Dynamic(Box::new(f))
    }

    pub fn resolve(self) -> Result<bool> {
        match self {
            Condition::Literal(x) => Ok(x),
            Condition::Deferred(f) => Ok(f()),
            Condition::Dynamic(f) => match f() {
                Value::Bool(x) => Ok(x),
                other => Err(DiscordError::Validation(format!(
                    "The closure passed to send_when() must return a boolean, got {}.",
                    json_type(&other)
                ))),
            },
        }
    }
}

impl From<bool> for Condition<'_> {
    fn from(x: bool) -> Self {
        Condition::Literal(x)
    }
}

fn json_type(x: &Value) -> &'static str {
    match x {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_content_literal() {
        let map = ContentSource::from(json!({ "content": "hi" })).resolve().unwrap();
        assert_eq!(map["content"], "hi");

        assert!(matches!(
            ContentSource::from(json!(["content"])).resolve(),
            Err(DiscordError::Validation(_))
        ));
    }

    #[test]
    fn test_content_deferred() {
        let map = ContentSource::deferred(|| json!({ "content": "later" }))
            .resolve()
            .unwrap();
        assert_eq!(map["content"], "later");

        let err = ContentSource::deferred(|| json!("just a string"))
            .resolve()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value: The closure passed to set_content() must be a JSON object, \
             got a string."
        );
    }

    #[test]
    fn test_condition_evaluated_once() {
        let calls = Cell::new(0);
        let cond = Condition::when(|| {
            calls.set(calls.get() + 1);
            true
        });

        assert!(cond.resolve().unwrap());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_condition_dynamic() {
        assert!(Condition::dynamic(|| json!(true)).resolve().unwrap());
        assert!(!Condition::dynamic(|| json!(false)).resolve().unwrap());
        assert!(matches!(
            Condition::dynamic(|| json!(1)).resolve(),
            Err(DiscordError::Validation(_))
        ));
        assert!(Condition::dynamic(|| Value::Null).resolve().is_err());
    }

    #[test]
    fn test_condition_literal() {
        assert!(Condition::from(true).resolve().unwrap());
        assert!(!Condition::from(false).resolve().unwrap());
    }
}
