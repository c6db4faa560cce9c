//! Feed sources and the domain records they produce
//!
//! Each source turns a remote ranking/listing into a batch of HTTP requests,
//! runs them through the worker pool, and maps the surviving payloads into
//! domain records. Sources classify their batch as full success, partial
//! success (usable items plus a [`FeedUpdate::condition`] diagnostic), or
//! total failure (`Error::NoContent`).

use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hacker News forum posts
pub mod hacker_news;
/// Ranked video listings
pub mod video_ranking;

#[cfg(test)]
mod tests;

/// One video entry in a feed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Video {
    /// Thumbnail image URL
    pub thumbnail_url: String,
    /// Video title
    pub title: String,
    /// Link to the video
    pub url: String,
    /// Uploader name
    pub author: String,
    /// Link to the uploader's page
    pub author_url: String,
    /// When the video was published
    pub time_posted: DateTime<Utc>,
}

/// One forum post entry in a feed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForumPost {
    /// Post title
    pub title: String,
    /// Link to the discussion thread
    pub discussion_url: String,
    /// Link target of the post, if it points outside the forum
    pub target_url: Option<String>,
    /// Domain of the link target, for display
    pub target_url_domain: Option<String>,
    /// Number of comments
    pub comment_count: i64,
    /// Post score
    pub score: i64,
    /// When the post was submitted
    pub time_posted: DateTime<Utc>,
}

/// Result of one feed fetch: the surviving items plus partial-failure bookkeeping
///
/// A source returns `Err(Error::NoContent)` when nothing survived; otherwise
/// the update carries the usable items together with the number of items that
/// were lost, so the dashboard can render available data while logging the gap.
#[derive(Clone, Debug)]
pub struct FeedUpdate<T> {
    /// Successfully fetched and mapped items, in original feed order
    pub items: Vec<T>,
    /// Number of items that failed to fetch or decode
    pub failed: usize,
}

impl<T> FeedUpdate<T> {
    /// True if some items were lost along the way
    #[must_use]
    pub fn is_partial(&self) -> bool {
        self.failed > 0
    }

    /// The degraded-but-usable condition to surface, if any
    #[must_use]
    pub fn condition(&self) -> Option<Error> {
        if self.failed > 0 {
            Some(Error::PartialContent {
                failed: self.failed,
            })
        } else {
            None
        }
    }
}
