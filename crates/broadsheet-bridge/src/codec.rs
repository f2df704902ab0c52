//! Wire codec for bridge messages.
//!
//! A message is a JSON object with a string `name` and an optional
//! `options` payload. An absent payload is represented as
//! [`Value::Null`] and omitted on the wire, so `decode(encode(m)) == m`
//! holds for every message.

use serde_json::{Map, Value};

use broadsheet_types::error::{BroadsheetError, Result};

/// A single message crossing the bridge in either direction.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeMessage {
    /// Namespaced message name (`_toNative::*` is reserved for the host).
    pub name: String,
    /// Opaque payload interpreted by the handler for `name`.
    pub options: Value,
}

impl BridgeMessage {
    /// A message with a payload.
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// A message without a payload.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }

    /// Whether the message carries a payload.
    pub fn has_options(&self) -> bool {
        !self.options.is_null()
    }

    /// The payload as a string, if it is one.
    pub fn options_str(&self) -> Option<&str> {
        self.options.as_str()
    }
}

/// Serialize a message to its wire form.
///
/// Keys are emitted in a fixed order, so equal messages always encode to
/// identical text.
pub fn encode(message: &BridgeMessage) -> String {
    let mut map = Map::new();
    map.insert("name".to_string(), Value::String(message.name.clone()));
    if message.has_options() {
        map.insert("options".to_string(), message.options.clone());
    }
    Value::Object(map).to_string()
}

/// Parse a message from its wire form.
///
/// Rejects anything that is not a JSON object with a string `name`.
pub fn decode(raw: &str) -> Result<BridgeMessage> {
    let malformed =
        |why: String| BroadsheetError::MalformedMessage(format!("{why} in {}", preview(raw)));

    let value: Value = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
    let Value::Object(mut map) = value else {
        return Err(malformed("not a JSON object".into()));
    };
    let name = match map.remove("name") {
        Some(Value::String(name)) => name,
        Some(_) => return Err(malformed("`name` is not a string".into())),
        None => return Err(malformed("missing `name`".into())),
    };
    let options = map.remove("options").unwrap_or(Value::Null);
    Ok(BridgeMessage { name, options })
}

/// Shorten a payload for error messages and log lines.
pub(crate) fn preview(raw: &str) -> String {
    const MAX: usize = 64;
    if raw.chars().count() <= MAX {
        raw.to_string()
    } else {
        let head: String = raw.chars().take(MAX).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_with_options() {
        let m = BridgeMessage::new("_toNative::onScroll", json!("down"));
        assert_eq!(encode(&m), r#"{"name":"_toNative::onScroll","options":"down"}"#);
    }

    #[test]
    fn encode_omits_absent_options() {
        let m = BridgeMessage::named("ping");
        assert_eq!(encode(&m), r#"{"name":"ping"}"#);
    }

    #[test]
    fn decode_missing_options_is_null() {
        let m = decode(r#"{"name":"ping"}"#).unwrap();
        assert_eq!(m.name, "ping");
        assert!(!m.has_options());
    }

    #[test]
    fn decode_explicit_null_options() {
        let m = decode(r#"{"name":"ping","options":null}"#).unwrap();
        assert_eq!(m, BridgeMessage::named("ping"));
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let m = decode(r#"{"name":"a","options":1,"extra":true}"#).unwrap();
        assert_eq!(m.options, json!(1));
    }

    #[test]
    fn decode_rejects_missing_name() {
        let err = decode(r#"{"options":"x"}"#).unwrap_err();
        assert!(matches!(err, BroadsheetError::MalformedMessage(_)));
    }

    #[test]
    fn decode_rejects_non_string_name() {
        assert!(decode(r#"{"name":42}"#).is_err());
    }

    #[test]
    fn decode_rejects_non_object() {
        assert!(decode(r#""just a string""#).is_err());
        assert!(decode("[1,2,3]").is_err());
        assert!(decode(r#"["ping"]"#).is_err());
        assert!(decode(r#"["_toNative::onLinkPress","http://x.com/a"]"#).is_err());
        assert!(decode("null").is_err());
        assert!(decode("not json at all").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn options_str_accessor() {
        let m = BridgeMessage::new("x", json!("http://a.com"));
        assert_eq!(m.options_str(), Some("http://a.com"));
        let n = BridgeMessage::new("x", json!({ "cur": 1 }));
        assert_eq!(n.options_str(), None);
    }

    #[test]
    fn preview_truncates_long_payloads() {
        let long = "x".repeat(200);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 67);
        assert_eq!(preview("short"), "short");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_options() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                "[a-zA-Z0-9:/._ -]{0,24}".prop_map(Value::String),
            ];
            leaf.prop_recursive(3, 16, 4, |inner| {
                prop_oneof![
                    proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    proptest::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                        .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        proptest! {
            #[test]
            fn decode_inverts_encode(name in "[a-zA-Z_:]{1,30}", options in arb_options()) {
                let m = BridgeMessage::new(name, options);
                let back = decode(&encode(&m)).unwrap();
                prop_assert_eq!(back, m);
            }

            #[test]
            fn encode_is_deterministic(name in "[a-z]{1,10}", options in arb_options()) {
                let m = BridgeMessage::new(name, options);
                prop_assert_eq!(encode(&m), encode(&m.clone()));
            }
        }
    }
}
