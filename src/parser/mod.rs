//! Line-oriented parser for the pipeline configuration grammar.
//!
//! The format is INI-style:
//!
//! ```text
//! # comment
//! [section_name]
//! key = value            # inline comment
//! items = [a, b, c]
//! ```
//!
//! Parsing produces a [`RawConfig`]: an ordered two-level mapping from
//! section name to option name to typed [`Value`], with source line numbers
//! retained for diagnostics. Duplicate section names and duplicate option
//! keys within a section are rejected rather than silently merged.

mod value;


pub use value::Value;

use crate::error::{MordantError, Result};
use serde::Serialize;

/// A parsed option with its source line.
#[derive(Debug, Clone, Serialize)]
pub struct RawOption {
    pub key: String,
    pub value: Value,
    #[serde(skip)]
    pub line: usize,
}

/// A parsed section: ordered options plus the header's source line.
#[derive(Debug, Clone, Serialize)]
pub struct RawSection {
    pub name: String,
    #[serde(skip)]
    pub line: usize,
    pub options: Vec<RawOption>,
}

impl RawSection {
    /// Look up an option value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.iter().find(|o| o.key == key).map(|o| &o.value)
    }

    /// Look up an option (value plus source line) by key.
    pub fn option(&self, key: &str) -> Option<&RawOption> {
        self.options.iter().find(|o| o.key == key)
    }

    /// True if the section defines the given key.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// An ordered collection of parsed sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RawConfig {
    pub sections: Vec<RawSection>,
}

impl RawConfig {
    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Section names in declaration order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Render the configuration back to the grammar's canonical text form.
    ///
    /// Parsing the rendered text yields a structurally equal `RawConfig`
    /// (line numbers aside).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section.name));
            for option in &section.options {
                out.push_str(&format!("{} = {}\n", option.key, option.value.render()));
            }
        }
        out
    }
}

// Structural equality ignores source line numbers so that round-trip
// comparisons (parse -> render -> parse) work on the content alone.
impl PartialEq for RawOption {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl PartialEq for RawSection {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.options == other.options
    }
}

impl PartialEq for RawConfig {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

/// Parse configuration text into a [`RawConfig`].
///
/// # Errors
///
/// Returns `MordantError::ParseError` (with the offending line number) for
/// any line that is not blank, a comment, a section header, or a
/// `key = value` option; for options appearing before the first section
/// header; for malformed value literals; and for duplicate sections or
/// duplicate keys within a section.
pub fn parse(input: &str) -> Result<RawConfig> {
    let mut config = RawConfig::default();

    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            let name = parse_section_header(line)
                .map_err(|message| MordantError::parse(line_no, message))?;
            if config.section(&name).is_some() {
                return Err(MordantError::parse(
                    line_no,
                    format!("duplicate section `[{}]`", name),
                ));
            }
            config.sections.push(RawSection {
                name,
                line: line_no,
                options: Vec::new(),
            });
            continue;
        }

        // Anything else must be `key = value`.
        let Some((key_part, value_part)) = line.split_once('=') else {
            return Err(MordantError::parse(
                line_no,
                format!("expected `[section]` or `key = value`, found `{}`", line),
            ));
        };

        let key = key_part.trim();
        if key.is_empty() {
            return Err(MordantError::parse(line_no, "option key is empty"));
        }
        if key.contains(char::is_whitespace) {
            return Err(MordantError::parse(
                line_no,
                format!("option key `{}` contains whitespace", key),
            ));
        }

        let Some(section) = config.sections.last_mut() else {
            return Err(MordantError::parse(
                line_no,
                format!("option `{}` appears before any section header", key),
            ));
        };

        if section.has(key) {
            return Err(MordantError::parse(
                line_no,
                format!("duplicate option `{}` in section `[{}]`", key, section.name),
            ));
        }

        let token = strip_inline_comment(value_part);
        let value =
            value::classify(token).map_err(|message| MordantError::parse(line_no, message))?;

        section.options.push(RawOption {
            key: key.to_string(),
            value,
            line: line_no,
        });
    }

    Ok(config)
}

/// Extract the section name from a `[name]` header line.
///
/// Trailing text after `]` must be empty or an inline comment.
fn parse_section_header(line: &str) -> std::result::Result<String, String> {
    let Some(close) = line.find(']') else {
        return Err(format!("unterminated section header `{}`", line));
    };
    let name = line[1..close].trim();
    if name.is_empty() {
        return Err("section name is empty".to_string());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.'))
    {
        return Err(format!("invalid section name `{}`", name));
    }
    let rest = line[close + 1..].trim();
    if !rest.is_empty() && !rest.starts_with('#') {
        return Err(format!("unexpected text after section header: `{}`", rest));
    }
    Ok(name.to_string())
}

/// Truncate a value at the first `#` that is not inside double quotes.
fn strip_inline_comment(value: &str) -> &str {
    let mut in_quotes = false;
    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &value[..i],
            _ => {}
        }
    }
    value
}
