//! Front-matter parsing
//!
//! A post document is laid out as `(optional preamble) --- metadata --- body`
//! where the delimiter is a line of three dashes. The metadata block is YAML.

use serde::{Deserialize, Deserializer, Serialize};

use super::error::ContentError;

/// Accept a single value or a list of values for a field.
///
/// Front-matter written by hand uses `category: News` and
/// `category: [News, Product]` interchangeably.
fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
        Null,
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
        OneOrMany::Null => Vec::new(),
    })
}

/// An author reference in front-matter: either a bare user key resolved
/// against the remote user service, or a small inline record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    Key(String),
    Inline(InlineAuthor),
}

impl AuthorRef {
    /// The user key this reference points at, if any
    pub fn user(&self) -> Option<&str> {
        match self {
            AuthorRef::Key(user) => Some(user),
            AuthorRef::Inline(inline) => inline.user.as_deref(),
        }
    }
}

/// Inline author record embedded in front-matter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlineAuthor {
    pub user: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
}

/// Front-matter data from a post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub author: Vec<AuthorRef>,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub category: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub tag: Vec<String>,
}

impl FrontMatter {
    /// Parse front-matter from a document string.
    /// Returns (front_matter, body).
    ///
    /// The delimiter must occur at least twice; a document without a
    /// separable metadata block and body block is rejected outright
    /// rather than decoded into a post with absent fields.
    pub fn parse(raw: &str) -> Result<(Self, String), ContentError> {
        let (metadata, body) = split_document(raw).ok_or(ContentError::MissingDelimiter)?;

        if body.trim().is_empty() {
            return Err(ContentError::MissingBody);
        }

        let fm: FrontMatter = serde_yaml::from_str(&metadata)?;
        Ok((fm, body))
    }
}

/// Split a document into (metadata, body) on lines of three dashes.
/// Anything before the first delimiter is preamble and is dropped.
/// Returns None when fewer than two delimiter lines are present.
fn split_document(raw: &str) -> Option<(String, String)> {
    let mut metadata = String::new();
    let mut body = String::new();
    // 0 = preamble, 1 = metadata, 2 = body
    let mut section = 0u8;

    for line in raw.lines() {
        if section < 2 && line.trim_end() == "---" {
            section += 1;
            continue;
        }
        match section {
            0 => {}
            1 => {
                metadata.push_str(line);
                metadata.push('\n');
            }
            _ => {
                body.push_str(line);
                body.push('\n');
            }
        }
    }

    if section < 2 {
        return None;
    }
    Some((metadata, body))
}
