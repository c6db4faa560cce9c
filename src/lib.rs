//! # feedrank
//!
//! Backend library for a dashboard-style feed aggregator. Pulls ranked and
//! listed items (videos, forum posts) from several remote sources and
//! reassembles them into unified feeds.
//!
//! ## Design Philosophy
//!
//! feedrank is designed to be:
//! - **Partial-failure tolerant** - One dead item never costs a whole feed
//! - **Order-preserving** - Results line up with the source ranking, always
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Explicitly wired** - Clients and caches are injected, never ambient
//!
//! At its heart sits the worker pool ([`pool::Job`]): every feed source
//! decomposes into many independent HTTP requests, and the pool executes them
//! with bounded parallelism, decodes each response into a typed payload, and
//! hands back order-aligned outcomes plus partial-failure bookkeeping.
//!
//! ## Quick Start
//!
//! ```no_run
//! use feedrank::{Config, feeds};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = config.http.build_client()?;
//!
//!     let posts = feeds::hacker_news::fetch_posts(&client, &config.hacker_news, None).await?;
//!     if posts.is_partial() {
//!         eprintln!("feed is missing {} entries", posts.failed);
//!     }
//!     for post in &posts.items {
//!         println!("{} ({})", post.title, post.discussion_url);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Chat-completion client
pub mod chat;
/// Configuration types
pub mod config;
/// Time-stepped dynamic key helper
pub mod dynamic_key;
/// Error types
pub mod error;
/// Feed sources and domain records
pub mod feeds;
/// Bounded-concurrency fetch-and-decode executor
pub mod pool;
/// External page renderer seam
pub mod render;
/// Translation client
pub mod translate;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use chat::ChatClient;
pub use config::{
    ChatConfig, Config, HackerNewsConfig, HttpConfig, StorySort, TranslateConfig,
    VideoRankingConfig,
};
pub use error::{Error, Result};
pub use feeds::{FeedUpdate, ForumPost, Video};
pub use pool::{BatchResults, BatchStatus, Job, decode_json_task};
pub use render::{CliRenderer, PageRenderer, RenderOptions};
pub use translate::Translator;
