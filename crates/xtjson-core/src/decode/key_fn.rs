use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

///
/// KeyFn
///
/// Denormalizes result keys from the server's normalized form
/// (`snake_case`, system columns prefixed `xt$`) into the caller's casing.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyFn {
    #[default]
    SnakeCaseString,
    KebabCaseString,
    CamelCaseString,
}

impl KeyFn {
    /// Denormalize one key.
    #[must_use]
    pub fn denormalize(self, key: &str) -> String {
        match self {
            Self::SnakeCaseString => system_prefix(key),
            Self::KebabCaseString => system_prefix(&kebab_case(key)),
            Self::CamelCaseString => system_prefix(&camel_case(key)),
        }
    }

    /// Denormalize every object key in `value`, at any depth.
    #[must_use]
    pub fn denormalize_json(self, value: JsonValue) -> JsonValue {
        match value {
            JsonValue::Object(entries) => JsonValue::Object(self.denormalize_object(entries)),
            JsonValue::Array(items) => JsonValue::Array(
                items
                    .into_iter()
                    .map(|item| self.denormalize_json(item))
                    .collect(),
            ),
            other => other,
        }
    }

    #[must_use]
    pub fn denormalize_object(self, entries: Map<String, JsonValue>) -> Map<String, JsonValue> {
        entries
            .into_iter()
            .map(|(key, value)| (self.denormalize(&key), self.denormalize_json(value)))
            .collect()
    }
}

// `xt$` marks system columns; callers see them with a leading underscore.
fn system_prefix(key: &str) -> String {
    key.strip_prefix("xt$")
        .map_or_else(|| key.to_string(), |rest| format!("_{rest}"))
}

// Every underscore except a leading one becomes a hyphen.
fn kebab_case(key: &str) -> String {
    key.char_indices()
        .map(|(index, c)| if c == '_' && index > 0 { '-' } else { c })
        .collect()
}

// `_x` becomes `X`; a trailing underscore is kept.
fn camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars();

    while let Some(c) = chars.next() {
        if c == '_' {
            match chars.next() {
                Some(next) => out.extend(next.to_uppercase()),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    out
}
