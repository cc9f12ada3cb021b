//! Recognition of annotation tag lines.
//!
//! A tag line starts (after indentation) with the configured delimiter followed by a known
//! keyword, e.g. `@param count: how many` or `:rtype: int`.

use regex::Regex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static AT_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)@([A-Za-z]+)(?:[ \t]*:[ \t]?|[ \t]+|$)(.*)$").unwrap());
static COLON_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*):([A-Za-z]+)(?:[ \t]*:[ \t]?|[ \t]+|$)(.*)$").unwrap());

const CLOSING_QUOTES: [&str; 2] = ["'''", "\"\"\""];

/// Character that introduces an annotation tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Delimiter {
    /// Epydoc style: `@param name: text`
    #[default]
    At,
    /// Sphinx style: `:param name: text`
    Colon,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Self::At => '@',
            Self::Colon => ':',
        }
    }

    fn tag_regex(self) -> &'static Regex {
        match self {
            Self::At => &AT_TAG_REGEX,
            Self::Colon => &COLON_TAG_REGEX,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "@" | "at" => Ok(Self::At),
            ":" | "colon" => Ok(Self::Colon),
            _ => Err(format!("Invalid delimiter '{s}': expected '@' or ':'")),
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Param,
    Type,
    Return,
    ReturnType,
    Raises,
}

impl TagKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "param" | "parameter" | "arg" => Some(Self::Param),
            "type" => Some(Self::Type),
            "return" | "returns" => Some(Self::Return),
            "rtype" => Some(Self::ReturnType),
            "raise" | "raises" => Some(Self::Raises),
            _ => None,
        }
    }
}

/// A parsed annotation tag with its free-form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Param {
        name: String,
        /// Set by the inline form `:param int count: ...`
        type_name: Option<String>,
        text: String,
    },
    Type {
        name: String,
        type_name: String,
    },
    Return {
        text: String,
    },
    ReturnType {
        type_name: String,
    },
    Raises {
        text: String,
    },
}

impl Tag {
    /// Append a continuation line to the tag's trailing text.
    pub fn extend(&mut self, more: &str) {
        let target = self.trailing_text_mut();
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(more);
    }

    /// Strip a docstring terminator (`'''` or `"""`) ending the tag's text and return it.
    pub fn take_closing_quotes(&mut self) -> Option<&'static str> {
        let target = self.trailing_text_mut();
        let quotes = CLOSING_QUOTES.into_iter().find(|quotes| target.ends_with(*quotes))?;
        target.truncate(target.len() - quotes.len());
        target.truncate(target.trim_end().len());
        Some(quotes)
    }

    fn trailing_text_mut(&mut self) -> &mut String {
        match self {
            Self::Param { text, .. } | Self::Return { text } | Self::Raises { text } => text,
            Self::Type { type_name, .. } | Self::ReturnType { type_name } => type_name,
        }
    }
}

/// A tag line split into indentation and tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagLine {
    pub indent: String,
    pub tag: Tag,
}

/// Classification of a single line (without its line ending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    Tag(TagLine),
    /// A known keyword whose body could not be parsed (e.g. a parameter without a name).
    Malformed(TagKind),
}

pub fn classify_line(line: &str, delimiter: Delimiter) -> LineKind {
    let Some(caps) = delimiter.tag_regex().captures(line) else {
        return LineKind::Plain;
    };
    let Some(kind) = TagKind::from_keyword(&caps[2]) else {
        return LineKind::Plain;
    };
    let body = caps[3].trim();

    match parse_body(kind, body) {
        Some(tag) => LineKind::Tag(TagLine {
            indent: caps[1].to_string(),
            tag,
        }),
        None => LineKind::Malformed(kind),
    }
}

fn parse_body(kind: TagKind, body: &str) -> Option<Tag> {
    match kind {
        TagKind::Param => parse_param(body),
        TagKind::Type => {
            let (name, type_name) = split_name(body);
            if name.is_empty() || type_name.is_empty() {
                return None;
            }
            Some(Tag::Type {
                name: name.to_string(),
                type_name: type_name.to_string(),
            })
        }
        TagKind::Return => Some(Tag::Return { text: body.to_string() }),
        TagKind::ReturnType => {
            if body.is_empty() {
                return None;
            }
            Some(Tag::ReturnType {
                type_name: body.to_string(),
            })
        }
        TagKind::Raises => Some(Tag::Raises { text: body.to_string() }),
    }
}

/// `name: text`, `name text`, or the inline typed form `type name: text`.
fn parse_param(body: &str) -> Option<Tag> {
    // Only `name:` or `type name:` before the first colon; a colon further into the text
    // (`url location, e.g. http://...`) belongs to the text.
    if let Some((head, text)) = body.split_once(':') {
        let words: Vec<&str> = head.split_whitespace().collect();
        let parsed = match words.as_slice() {
            [name] => Some((*name, None)),
            [type_name, name] => Some((*name, Some(type_name.to_string()))),
            _ => None,
        };
        if let Some((name, type_name)) = parsed {
            return Some(Tag::Param {
                name: name.to_string(),
                type_name,
                text: text.trim().to_string(),
            });
        }
    }

    let (name, text) = split_name(body);
    if name.is_empty() {
        return None;
    }
    Some(Tag::Param {
        name: name.to_string(),
        type_name: None,
        text: text.to_string(),
    })
}

/// Split `name: rest` or `name rest` into its two halves.
fn split_name(body: &str) -> (&str, &str) {
    if let Some((name, rest)) = body.split_once(':')
        && !name.trim().contains(char::is_whitespace)
    {
        return (name.trim(), rest.trim());
    }
    match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    }
}
