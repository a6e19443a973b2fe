//! Remote record types and the defaults layer
//!
//! Every field of a remote record is optional on the wire. Rendering never
//! touches the raw records: each one is resolved against
//! [`DefaultsConfig`](crate::config::DefaultsConfig) first, so absent fields
//! become documented defaults in exactly one place.

use serde::Deserialize;

use crate::config::DefaultsConfig;

/// Response envelope: `{ "data": <partial record> }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// A post record as returned by `GET /blog/post/{slug}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemotePost {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub slug: Option<String>,
    /// User key of the author
    pub author: Option<String>,
    /// Publication timestamp as a date string
    pub published: Option<String>,
    pub image: Option<String>,
    /// Comma-separated category keys; the first one is looked up
    pub category: Option<String>,
    pub view: Option<u64>,
    /// Raw markdown body
    pub content: Option<String>,
}

/// A user record as returned by `GET /user/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemoteUser {
    pub id: Option<u64>,
    pub username: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub position: Option<String>,
    pub about: Option<String>,
}

/// A category record as returned by `GET /blog/category/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RemoteCategory {
    pub id: Option<u64>,
    pub slug: Option<String>,
    pub name: Option<String>,
}

/// A remote post with defaults applied
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub title: String,
    pub published: String,
    pub banner: String,
    /// Still optional: the renderer substitutes its own placeholder
    pub content: Option<String>,
    pub author_key: String,
    pub category_key: String,
}

impl RemotePost {
    pub fn resolve(self, defaults: &DefaultsConfig) -> PostDetail {
        let category_key = self
            .category
            .as_deref()
            .and_then(|c| c.split(',').next())
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| defaults.category_key.clone());

        PostDetail {
            title: self.title.unwrap_or_else(|| defaults.title.clone()),
            published: self.published.unwrap_or_else(|| defaults.published.clone()),
            banner: self.image.unwrap_or_else(|| defaults.banner.clone()),
            content: self.content,
            author_key: self.author.unwrap_or_else(|| defaults.author_key.clone()),
            category_key,
        }
    }
}

/// A remote user with defaults applied
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthorProfile {
    pub username: String,
    pub name: String,
    pub image: String,
    pub company: String,
    pub position: Option<String>,
    pub about: String,
}

impl RemoteUser {
    pub fn resolve(self, defaults: &DefaultsConfig) -> AuthorProfile {
        let name = match (self.firstname, self.lastname) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first,
            (None, Some(last)) => last,
            (None, None) => "Unknown Author".to_string(),
        };

        AuthorProfile {
            username: self.username.unwrap_or_else(|| "username".to_string()),
            name,
            image: self.image.unwrap_or_else(|| defaults.avatar.clone()),
            company: self.company.unwrap_or_else(|| defaults.company.clone()),
            position: self.position,
            about: self.about.unwrap_or_else(|| defaults.about.clone()),
        }
    }
}

impl AuthorProfile {
    /// Fallback profile when the user lookup itself fails
    pub fn fallback(defaults: &DefaultsConfig) -> Self {
        RemoteUser::default().resolve(defaults)
    }
}

/// A remote category with defaults applied
#[derive(Debug, Clone, serde::Serialize)]
pub struct CategoryInfo {
    pub slug: String,
    pub name: String,
}

impl RemoteCategory {
    pub fn resolve(self) -> CategoryInfo {
        CategoryInfo {
            slug: self.slug.unwrap_or_else(|| "uncategorized".to_string()),
            name: self.name.unwrap_or_else(|| "Uncategorized".to_string()),
        }
    }
}

impl CategoryInfo {
    /// Fallback when the category lookup itself fails
    pub fn fallback() -> Self {
        RemoteCategory::default().resolve()
    }
}
