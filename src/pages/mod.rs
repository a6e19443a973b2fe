//! Page assembly - binds repository and renderer output into page views

mod templates;

pub use templates::TemplateRenderer;

use anyhow::Result;
use serde::Serialize;
use tera::Context;

use crate::config::{DefaultsConfig, SiteConfig};
use crate::content::{AuthorRef, MarkdownRenderer, Post, PostRepository};
use crate::remote::{AuthorProfile, CategoryInfo, ContentApi, PostDetail};
use crate::Site;

/// Assembles full HTML pages. One instance per process; all post state is
/// rebuilt per call.
pub struct Pages {
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

/// One card on the blog list page
#[derive(Debug, Serialize)]
struct PostCard {
    id: usize,
    slug: String,
    title: String,
    date: String,
    category: String,
    description: String,
    author_name: String,
    author_user: String,
    author_image: String,
}

impl PostCard {
    fn from_post(post: &Post, defaults: &DefaultsConfig) -> Self {
        let (author_name, author_user, author_image) = match post.authors.first() {
            Some(AuthorRef::Inline(inline)) => (
                inline
                    .name
                    .clone()
                    .or_else(|| inline.user.clone())
                    .unwrap_or_else(|| "Unknown Author".to_string()),
                inline
                    .user
                    .clone()
                    .unwrap_or_else(|| defaults.author_key.clone()),
                inline
                    .image
                    .clone()
                    .unwrap_or_else(|| defaults.avatar.clone()),
            ),
            Some(AuthorRef::Key(key)) => (key.clone(), key.clone(), defaults.avatar.clone()),
            None => (
                "Unknown Author".to_string(),
                defaults.author_key.clone(),
                defaults.avatar.clone(),
            ),
        };

        Self {
            id: post.id,
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            category: post.category.join(", "),
            description: post.description.clone().unwrap_or_default(),
            author_name,
            author_user,
            author_image,
        }
    }
}

impl Pages {
    pub fn new() -> Result<Self> {
        Ok(Self {
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
        })
    }

    fn base_context(&self, config: &SiteConfig) -> Context {
        let mut context = Context::new();
        context.insert("site_title", &config.title);
        context.insert("site_description", &config.description);
        context.insert("language", &config.language);
        context
    }

    /// Render one page of the blog list.
    ///
    /// Local posts are merged with the injected remote snapshot (missing
    /// snapshot degrades to an empty remote list) and paginated by
    /// `per_page`; an out-of-range page number is clamped. An unreadable
    /// posts root is the one fatal condition here.
    pub fn blog_list(&self, site: &Site, page: usize) -> Result<String> {
        let local = site.repository().list_local()?;

        let remote = match &site.config.remote_posts {
            Some(path) => {
                let path = site.base_dir.join(path);
                match PostRepository::load_remote_snapshot(&path) {
                    Ok(posts) => posts,
                    Err(e) => {
                        tracing::warn!("Ignoring remote snapshot {:?}: {}", path, e);
                        Vec::new()
                    }
                }
            }
            None => Vec::new(),
        };

        let posts = PostRepository::merge(remote, local);

        let per_page = site.config.per_page.max(1);
        let total_pages = posts.len().div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);

        let cards: Vec<PostCard> = posts
            .iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .map(|p| PostCard::from_post(p, &site.config.defaults))
            .collect();

        let mut context = self.base_context(&site.config);
        context.insert("posts", &cards);
        context.insert("page", &page);
        context.insert("total_pages", &total_pages);
        self.templates.render("blog_list.html", &context)
    }

    /// Render the post detail page, or None when the slug resolves nowhere.
    ///
    /// The remote post is the primary source; when that fetch fails the
    /// local post with the same slug takes over. Author and category
    /// lookups degrade to defaults on failure, so a single dead lookup
    /// never hides the page.
    pub async fn post_detail(
        &self,
        site: &Site,
        api: &dyn ContentApi,
        slug: &str,
    ) -> Result<Option<String>> {
        let defaults = &site.config.defaults;

        let detail = match api.fetch_post(slug).await {
            Ok(post) => post.resolve(defaults),
            Err(e) => {
                tracing::warn!("Remote post lookup for {:?} failed: {}", slug, e);
                match self.local_fallback(site, slug)? {
                    Some(detail) => detail,
                    None => return Ok(None),
                }
            }
        };

        let author = match api.fetch_user(&detail.author_key).await {
            Ok(user) => user.resolve(defaults),
            Err(e) => {
                tracing::warn!("User lookup for {:?} failed: {}", detail.author_key, e);
                AuthorProfile::fallback(defaults)
            }
        };

        let category = match api.fetch_category(&detail.category_key).await {
            Ok(category) => category.resolve(),
            Err(e) => {
                tracing::warn!("Category lookup for {:?} failed: {}", detail.category_key, e);
                CategoryInfo::fallback()
            }
        };

        let content = self.markdown.render_or_placeholder(detail.content.as_deref())?;

        let mut context = self.base_context(&site.config);
        context.insert("title", &detail.title);
        context.insert("published", &detail.published);
        context.insert("banner", &detail.banner);
        context.insert("author", &author);
        context.insert("category", &category);
        context.insert("content", &content);
        Ok(Some(self.templates.render("post.html", &context)?))
    }

    /// Render the error page; falls back to bare text if even that fails
    pub fn error_page(&self, config: &SiteConfig, status: u16, message: &str) -> String {
        let mut context = self.base_context(config);
        context.insert("status", &status);
        context.insert("message", &message);
        self.templates
            .render("error.html", &context)
            .unwrap_or_else(|_| format!("{} {}", status, message))
    }

    fn local_fallback(&self, site: &Site, slug: &str) -> Result<Option<PostDetail>> {
        let local = site.repository().list_local()?;
        Ok(local
            .into_iter()
            .find(|p| p.slug == slug)
            .map(|p| detail_from_local(p, &site.config.defaults)))
    }
}

/// Shape a local post like a resolved remote one so the detail page has a
/// single rendering path.
fn detail_from_local(post: Post, defaults: &DefaultsConfig) -> PostDetail {
    PostDetail {
        title: post.title.clone(),
        published: post
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| defaults.published.clone()),
        banner: post.image.clone().unwrap_or_else(|| defaults.banner.clone()),
        author_key: post
            .authors
            .first()
            .and_then(|a| a.user())
            .map(str::to_string)
            .unwrap_or_else(|| defaults.author_key.clone()),
        category_key: post
            .primary_category()
            .map(str::to_string)
            .unwrap_or_else(|| defaults.category_key.clone()),
        content: Some(post.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FrontMatter;
    use crate::remote::{RemoteCategory, RemoteError, RemotePost, RemoteUser};
    use async_trait::async_trait;
    use std::fs;

    /// Canned API for assembling pages without a network
    struct CannedApi {
        post: Option<RemotePost>,
        user: Option<RemoteUser>,
        category: Option<RemoteCategory>,
    }

    #[async_trait]
    impl ContentApi for CannedApi {
        async fn fetch_post(&self, slug: &str) -> Result<RemotePost, RemoteError> {
            self.post.clone().ok_or(RemoteError::EmptyEnvelope {
                url: format!("/blog/post/{}", slug),
            })
        }

        async fn fetch_user(&self, id: &str) -> Result<RemoteUser, RemoteError> {
            self.user.clone().ok_or(RemoteError::EmptyEnvelope {
                url: format!("/user/{}", id),
            })
        }

        async fn fetch_category(&self, id: &str) -> Result<RemoteCategory, RemoteError> {
            self.category.clone().ok_or(RemoteError::EmptyEnvelope {
                url: format!("/blog/category/{}", id),
            })
        }
    }

    fn test_site() -> (tempfile::TempDir, Site) {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("_blog")).unwrap();
        let site = Site::new(tmp.path()).unwrap();
        (tmp, site)
    }

    fn write_local_post(site: &Site, slug: &str, doc: &str) {
        let dir = site.posts_dir.join(slug);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("post.md"), doc).unwrap();
    }

    #[test]
    fn test_blog_list_renders_cards() {
        let (_tmp, site) = test_site();
        write_local_post(
            &site,
            "hello-world",
            "---\ntitle: Hello\nslug: hello-world\ndate: \"2024-01-01\"\ntime: \"10:00\"\ndescription: First one\n---\n# Hi\n",
        );

        let pages = Pages::new().unwrap();
        let html = pages.blog_list(&site, 1).unwrap();
        assert!(html.contains("Hello"));
        assert!(html.contains("/blog/hello-world"));
        assert!(html.contains("First one"));
    }

    #[test]
    fn test_blog_list_is_paginated() {
        let (_tmp, mut site) = test_site();
        site.config.per_page = 2;
        for (i, slug) in ["first", "second", "third"].iter().enumerate() {
            write_local_post(
                &site,
                slug,
                &format!(
                    "---\ntitle: Post {}\nslug: {}\ndate: \"2024-01-0{}\"\n---\nBody.\n",
                    i + 1,
                    slug,
                    i + 1
                ),
            );
        }

        let pages = Pages::new().unwrap();

        // newest two on page one
        let first = pages.blog_list(&site, 1).unwrap();
        assert!(first.contains("Post 3"));
        assert!(first.contains("Post 2"));
        assert!(!first.contains("Post 1"));
        assert!(first.contains("Page 1 of 2"));

        let second = pages.blog_list(&site, 2).unwrap();
        assert!(second.contains("Post 1"));
        assert!(!second.contains("Post 3"));

        // out-of-range page numbers clamp instead of erroring
        let clamped = pages.blog_list(&site, 99).unwrap();
        assert!(clamped.contains("Page 2 of 2"));
    }

    #[tokio::test]
    async fn test_detail_page_from_remote() {
        let (_tmp, site) = test_site();
        let api = CannedApi {
            post: Some(RemotePost {
                title: Some("Launch Day".to_string()),
                published: Some("2024-04-01".to_string()),
                author: Some("alice".to_string()),
                category: Some("3".to_string()),
                content: Some("We ~~walked~~ shipped.".to_string()),
                ..Default::default()
            }),
            user: Some(RemoteUser {
                username: Some("alice".to_string()),
                firstname: Some("Alice".to_string()),
                lastname: Some("Doe".to_string()),
                ..Default::default()
            }),
            category: Some(RemoteCategory {
                slug: Some("news".to_string()),
                name: Some("News".to_string()),
                ..Default::default()
            }),
        };

        let pages = Pages::new().unwrap();
        let html = pages
            .post_detail(&site, &api, "launch-day")
            .await
            .unwrap()
            .unwrap();
        assert!(html.contains("Launch Day"));
        assert!(html.contains("Alice Doe"));
        assert!(html.contains("/category/news"));
        assert!(html.contains("<del>walked</del>"));
        assert!(html.contains("April 01, 2024"));
    }

    #[tokio::test]
    async fn test_detail_page_degrades_on_failed_lookups() {
        let (_tmp, site) = test_site();
        let api = CannedApi {
            post: Some(RemotePost {
                title: Some("Orphan".to_string()),
                content: Some("body".to_string()),
                ..Default::default()
            }),
            user: None,
            category: None,
        };

        let pages = Pages::new().unwrap();
        let html = pages
            .post_detail(&site, &api, "orphan")
            .await
            .unwrap()
            .unwrap();
        assert!(html.contains("Orphan"));
        assert!(html.contains("Unknown Author"));
        assert!(html.contains("Uncategorized"));
    }

    #[tokio::test]
    async fn test_detail_page_falls_back_to_local_post() {
        let (_tmp, site) = test_site();
        write_local_post(
            &site,
            "local-only",
            "---\ntitle: Local Only\nslug: local-only\ndate: \"2024-01-01\"\n---\nLocal body.\n",
        );
        let api = CannedApi {
            post: None,
            user: None,
            category: None,
        };

        let pages = Pages::new().unwrap();
        let html = pages
            .post_detail(&site, &api, "local-only")
            .await
            .unwrap()
            .unwrap();
        assert!(html.contains("Local Only"));
        assert!(html.contains("Local body."));
    }

    #[tokio::test]
    async fn test_detail_page_not_found() {
        let (_tmp, site) = test_site();
        let api = CannedApi {
            post: None,
            user: None,
            category: None,
        };

        let pages = Pages::new().unwrap();
        let page = pages.post_detail(&site, &api, "nowhere").await.unwrap();
        assert!(page.is_none());
    }

    #[tokio::test]
    async fn test_detail_page_placeholder_for_missing_content() {
        let (_tmp, site) = test_site();
        let api = CannedApi {
            post: Some(RemotePost::default()),
            user: None,
            category: None,
        };

        let pages = Pages::new().unwrap();
        let html = pages
            .post_detail(&site, &api, "empty")
            .await
            .unwrap()
            .unwrap();
        assert!(html.contains("Default Title"));
        assert!(html.contains("<p>No content</p>"));
        assert!(html.contains("February 08, 2022"));
    }

    #[test]
    fn test_post_card_author_from_inline_record() {
        let doc = FrontMatter {
            title: Some("T".to_string()),
            author: vec![AuthorRef::Inline(crate::content::InlineAuthor {
                user: Some("bob".to_string()),
                name: Some("Bob".to_string()),
                image: Some("/bob.png".to_string()),
                ..Default::default()
            })],
            ..Default::default()
        };
        let post = Post::from_front_matter(doc, "t", "x".to_string());
        let card = PostCard::from_post(&post, &DefaultsConfig::default());
        assert_eq!(card.author_name, "Bob");
        assert_eq!(card.author_user, "bob");
        assert_eq!(card.author_image, "/bob.png");
    }
}
