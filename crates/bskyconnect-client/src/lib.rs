pub mod client;
pub mod error;
pub mod graph;
mod records;
pub mod types;

pub use client::{BlueskyClient, Session};
pub use error::ClientError;
pub use graph::SocialGraph;
pub use types::{FeedItem, FeedPost, ProfilePage, ProfileStats, ProfileView, ViewerState};
