//! Content module - local post documents and markdown rendering

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use error::ContentError;
pub use frontmatter::{AuthorRef, FrontMatter, InlineAuthor};
pub use loader::PostRepository;
pub use markdown::MarkdownRenderer;
pub use post::Post;
