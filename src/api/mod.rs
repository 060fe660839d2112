//! Client side of the remote posts resource

pub mod client;
pub mod types;

pub use client::{ApiResponse, PostsClient};
pub use types::{NewPost, Post, PostPatch, POST_KEYS};
