//! Content error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading local post documents.
///
/// Everything except `PostsRootUnreadable` is recoverable: a bad document
/// excludes that one post from the listing and nothing else.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The three-dash delimiter did not occur at least twice, so the
    /// document has no separable metadata and body blocks.
    #[error("malformed document: front-matter delimiter missing")]
    MissingDelimiter,

    /// The metadata block is present but does not decode as front-matter.
    #[error("malformed document: invalid front-matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),

    /// The body block is empty.
    #[error("malformed document: body is empty")]
    MissingBody,

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The configured posts root could not be enumerated. Fatal for the
    /// listing: without the root there is no post list to build.
    #[error("posts root {path} is not readable")]
    PostsRootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}
