//! Post repository - enumerates local posts and merges in remote ones

use std::fs;
use std::path::{Path, PathBuf};

use super::error::ContentError;
use super::frontmatter::FrontMatter;
use super::post::Post;

/// Canonical document name inside each post directory
const POST_FILE: &str = "post.md";

/// Aggregates posts from the local posts directory and from an
/// already-materialized remote list, producing one chronologically
/// ordered sequence.
///
/// Rebuilt per render: there is no cache and no shared state between
/// requests.
pub struct PostRepository {
    posts_root: PathBuf,
}

impl PostRepository {
    pub fn new<P: AsRef<Path>>(posts_root: P) -> Self {
        Self {
            posts_root: posts_root.as_ref().to_path_buf(),
        }
    }

    /// Enumerate subdirectories of the posts root and load every one that
    /// contains a `post.md`.
    ///
    /// A subdirectory without the canonical document is skipped silently.
    /// A document that fails to parse is logged and excluded; one bad post
    /// never breaks the listing. An unreadable root is fatal.
    pub fn list_local(&self) -> Result<Vec<Post>, ContentError> {
        let entries =
            fs::read_dir(&self.posts_root).map_err(|source| ContentError::PostsRootUnreadable {
                path: self.posts_root.clone(),
                source,
            })?;

        let mut posts = Vec::new();

        for entry in entries.filter_map(|e| e.ok()) {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }

            let doc = dir.join(POST_FILE);
            if !doc.exists() {
                continue;
            }

            let slug = entry.file_name().to_string_lossy().to_string();
            match load_post(&doc, &slug) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Excluding post {:?}: {}", doc, e);
                }
            }
        }

        Ok(posts)
    }

    /// Load an injected snapshot of remotely-published posts.
    ///
    /// The snapshot is a YAML sequence of front-matter-shaped records with
    /// a `content` body field, produced by whatever publishes to the remote
    /// service. It stands in for a list endpoint the content API does not
    /// expose.
    pub fn load_remote_snapshot<P: AsRef<Path>>(path: P) -> Result<Vec<Post>, ContentError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<SnapshotRecord> = serde_yaml::from_str(&raw)?;

        let mut posts = Vec::new();
        for record in records {
            // same invariant as local documents: no body, no post
            let body = match record.content {
                Some(body) if !body.trim().is_empty() => body,
                _ => {
                    tracing::warn!(
                        "Excluding snapshot record {:?}: body is empty",
                        record.meta.slug.as_deref().unwrap_or("<no slug>")
                    );
                    continue;
                }
            };
            posts.push(Post::from_front_matter(record.meta, "untitled", body));
        }
        Ok(posts)
    }

    /// Concatenate remote and local posts, sort by descending
    /// `(date, time)`, and assign sequential ids in the final order.
    ///
    /// The sort is stable, so equal keys keep concatenation order:
    /// remote posts ahead of local ones.
    pub fn merge(remote: Vec<Post>, local: Vec<Post>) -> Vec<Post> {
        let mut posts = remote;
        posts.extend(local);
        posts.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
        for (id, post) in posts.iter_mut().enumerate() {
            post.id = id;
        }
        posts
    }
}

/// A record in the remote snapshot file: front-matter fields plus the body
#[derive(serde::Deserialize)]
struct SnapshotRecord {
    #[serde(flatten)]
    meta: FrontMatter,
    content: Option<String>,
}

/// Load a single post document
fn load_post(path: &Path, slug: &str) -> Result<Post, ContentError> {
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let (fm, body) = FrontMatter::parse(&raw)?;
    Ok(Post::from_front_matter(fm, slug, body))
}
