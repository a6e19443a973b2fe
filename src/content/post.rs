//! Post model

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::frontmatter::{AuthorRef, FrontMatter};

/// A blog post, from either the local posts directory or the remote
/// content service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Position in the final merged ordering, assigned by
    /// [`PostRepository::merge`](super::PostRepository::merge).
    /// Not stable across rebuilds.
    pub id: usize,

    /// URL-safe identifier
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date, if the document carried a parseable one
    pub date: Option<NaiveDate>,

    /// Publication time of day
    pub time: Option<NaiveTime>,

    /// Author references (inline records or user keys)
    pub authors: Vec<AuthorRef>,

    /// Cover image path or URL
    pub image: Option<String>,

    /// Short description shown on list pages
    pub description: Option<String>,

    /// Categories
    pub category: Vec<String>,

    /// Tags
    pub tag: Vec<String>,

    /// Raw markdown body
    pub content: String,
}

impl Post {
    /// Build a post from parsed front-matter and a body block.
    ///
    /// The slug in front-matter wins when present; the storage location
    /// (directory name) is the fallback.
    pub fn from_front_matter(fm: FrontMatter, fallback_slug: &str, body: String) -> Self {
        let slug = fm
            .slug
            .unwrap_or_else(|| fallback_slug.to_string());
        let title = fm.title.unwrap_or_else(|| fallback_slug.to_string());
        let date = fm.date.as_deref().and_then(parse_date);
        let time = fm.time.as_deref().and_then(parse_time);

        Self {
            id: 0,
            slug,
            title,
            date,
            time,
            authors: fm.author,
            image: fm.image,
            description: fm.description,
            category: fm.category,
            tag: fm.tag,
            content: body,
        }
    }

    /// Composite ordering key. Posts without a date sort as oldest.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        (
            self.date.unwrap_or(NaiveDate::MIN),
            self.time.unwrap_or(NaiveTime::MIN),
        )
    }

    /// The first category, used for the remote category lookup
    pub fn primary_category(&self) -> Option<&str> {
        self.category.first().map(String::as_str)
    }
}

/// Parse a front-matter date string
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    None
}

/// Parse a front-matter time string
fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    for fmt in ["%H:%M:%S", "%H:%M"] {
        if let Ok(t) = NaiveTime::parse_from_str(s, fmt) {
            return Some(t);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_front_matter_prefers_declared_slug() {
        let fm = FrontMatter {
            title: Some("Hello".to_string()),
            slug: Some("hello-world".to_string()),
            date: Some("2024-01-01".to_string()),
            time: Some("10:00".to_string()),
            ..Default::default()
        };
        let post = Post::from_front_matter(fm, "dir-name", "# Hi\n".to_string());
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(post.time, NaiveTime::from_hms_opt(10, 0, 0));
        assert_eq!(post.content, "# Hi\n");
    }

    #[test]
    fn test_from_front_matter_falls_back_to_directory() {
        let fm = FrontMatter::default();
        let post = Post::from_front_matter(fm, "my-post", "body\n".to_string());
        assert_eq!(post.slug, "my-post");
        assert_eq!(post.title, "my-post");
        assert_eq!(post.date, None);
    }

    #[test]
    fn test_sort_key_handles_missing_date() {
        let dated = Post::from_front_matter(
            FrontMatter {
                date: Some("2020-06-01".to_string()),
                ..Default::default()
            },
            "a",
            "x".to_string(),
        );
        let undated = Post::from_front_matter(FrontMatter::default(), "b", "y".to_string());
        assert!(dated.sort_key() > undated.sort_key());
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("10:00"), NaiveTime::from_hms_opt(10, 0, 0));
        assert_eq!(parse_time("23:59:30"), NaiveTime::from_hms_opt(23, 59, 30));
        assert_eq!(parse_time("not a time"), None);
    }
}
