//! Remote content service - read-only HTTP/JSON lookups

mod client;
mod types;

pub use client::{ContentApi, HttpContentApi, RemoteError};
pub use types::{
    AuthorProfile, CategoryInfo, Envelope, PostDetail, RemoteCategory, RemotePost, RemoteUser,
};
