//! Typed value literals.
//!
//! The configuration grammar documents five value types plus an unset
//! sentinel:
//!
//! - list: `[val1, val2, ...]`
//! - integer: bare digits or quoted digits
//! - string: bare token or quoted token
//! - null: `None` / `none`
//! - boolean: `true` / `True` / `False` / `false`
//! - unset: `???` (required-but-unset placeholder)
//!
//! Classification is syntactic: a bare token that matches none of the
//! special literal sets is a string. Quoted tokens are never booleans or
//! nulls, which keeps the literal sets closed.

use serde::ser::{Serialize, Serializer};

/// A typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A string token, bare or quoted.
    Str(String),
    /// An integer, bare or quoted digits.
    Int(i64),
    /// One of the four boolean literals.
    Bool(bool),
    /// An ordered list of string items.
    List(Vec<String>),
    /// The `None` / `none` literal.
    Null,
    /// The `???` placeholder: required but not yet set.
    Unset,
}

impl Value {
    /// Human-readable name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Null => "null",
            Value::Unset => "unset",
        }
    }

    /// True if this value is the `???` placeholder.
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The list payload, if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Render the value as a canonical grammar literal.
    ///
    /// Parsing the rendered text yields a value equal to `self`, which is
    /// what makes whole-file round-trips lossless.
    pub fn render(&self) -> String {
        match self {
            Value::Str(s) => {
                if needs_quotes(s) {
                    format!("\"{}\"", s)
                } else {
                    s.clone()
                }
            }
            Value::Int(n) => n.to_string(),
            Value::Bool(true) => "true".to_string(),
            Value::Bool(false) => "false".to_string(),
            Value::List(items) => {
                let rendered: Vec<String> = items
                    .iter()
                    .map(|item| {
                        if needs_quotes(item) {
                            format!("\"{}\"", item)
                        } else {
                            item.clone()
                        }
                    })
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Null => "None".to_string(),
            Value::Unset => "???".to_string(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::List(items) => items.serialize(serializer),
            Value::Null => serializer.serialize_unit(),
            Value::Unset => serializer.serialize_str("???"),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Classify a trimmed, comment-stripped token into a typed value.
///
/// Returns a plain message on malformed literals; the caller attaches the
/// line number.
pub(crate) fn classify(raw: &str) -> std::result::Result<Value, String> {
    let token = raw.trim();

    if token == "???" {
        return Ok(Value::Unset);
    }

    if token.starts_with('[') {
        if !token.ends_with(']') || token.len() < 2 {
            return Err(format!("unterminated list value `{}`", token));
        }
        let inner = &token[1..token.len() - 1];
        if inner.trim().is_empty() {
            return Ok(Value::List(Vec::new()));
        }
        let mut items = Vec::new();
        for item in inner.split(',') {
            items.push(strip_quotes(item.trim())?.to_string());
        }
        return Ok(Value::List(items));
    }

    if token.starts_with('"') {
        let inner = strip_quotes(token)?;
        if is_int_literal(inner) {
            return parse_int(inner);
        }
        return Ok(Value::Str(inner.to_string()));
    }

    match token {
        "None" | "none" => return Ok(Value::Null),
        "true" | "True" => return Ok(Value::Bool(true)),
        "false" | "False" => return Ok(Value::Bool(false)),
        _ => {}
    }

    if is_int_literal(token) {
        return parse_int(token);
    }

    Ok(Value::Str(token.to_string()))
}

/// Strip one layer of surrounding double quotes, if present.
fn strip_quotes(token: &str) -> std::result::Result<&str, String> {
    if let Some(rest) = token.strip_prefix('"') {
        return rest
            .strip_suffix('"')
            .ok_or_else(|| format!("unterminated quoted value `{}`", token));
    }
    Ok(token)
}

/// True for an optional leading minus followed by one or more ASCII digits.
fn is_int_literal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_int(token: &str) -> std::result::Result<Value, String> {
    token
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|_| format!("integer literal `{}` is out of range", token))
}

/// True if a bare rendering of `text` would parse back as something else.
fn needs_quotes(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if text != text.trim() {
        return true;
    }
    if text.contains('#') || text.contains(',') || text.contains('"') {
        return true;
    }
    if text.starts_with('[') {
        return true;
    }
    matches!(text, "None" | "none" | "true" | "True" | "false" | "False" | "???")
        || is_int_literal(text)
}
