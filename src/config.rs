//! Configuration types for feedrank

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
///
/// Works out of the box with `Config::default()`: every feed source has a
/// sensible default endpoint and worker budget. The translation and
/// chat-completion clients are optional — when absent, feed sources skip the
/// corresponding processing step.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Shared HTTP client settings (timeout, user agent)
    #[serde(default)]
    pub http: HttpConfig,

    /// Hacker News feed source
    #[serde(default)]
    pub hacker_news: HackerNewsConfig,

    /// Video ranking feed source
    #[serde(default)]
    pub video_ranking: VideoRankingConfig,

    /// Translation service credentials (None = titles are not translated)
    #[serde(default)]
    pub translate: Option<TranslateConfig>,

    /// Chat-completion service credentials (None = summaries unavailable)
    #[serde(default)]
    pub chat: Option<ChatConfig>,
}

/// Shared HTTP client settings
///
/// Per-call timeout enforcement lives here, on the transport: the worker pool
/// itself applies no timeout of its own, so a task without a bounded client
/// would hold its worker slot indefinitely.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout (default: 10 seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Build a `reqwest::Client` from these settings
    ///
    /// # Errors
    /// Returns error if the underlying TLS backend cannot be initialized
    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(Error::Network)
    }
}

/// Ranking order for Hacker News stories
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorySort {
    /// Front-page ranking
    #[default]
    Top,
    /// Newest submissions first
    New,
    /// Highest-voted recent submissions
    Best,
}

impl StorySort {
    /// Path segment used by the Hacker News API (`{sort}stories.json`)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StorySort::Top => "top",
            StorySort::New => "new",
            StorySort::Best => "best",
        }
    }
}

/// Hacker News feed source settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HackerNewsConfig {
    /// API base URL (default: the official Firebase endpoint)
    #[serde(default = "default_hacker_news_base_url")]
    pub base_url: String,

    /// Which ranking to pull
    #[serde(default)]
    pub sort: StorySort,

    /// Keep only the first N posts of the ranking (default: 15)
    #[serde(default = "default_hacker_news_limit")]
    pub limit: usize,

    /// Comments-link template with a `{POST-ID}` placeholder
    /// (None = link to news.ycombinator.com)
    #[serde(default)]
    pub comments_url_template: Option<String>,

    /// Worker budget for the per-post fetch batch (default: 30)
    #[serde(default = "default_feed_workers")]
    pub workers: usize,

    /// Worker budget for title translation (default: 2)
    ///
    /// Kept deliberately small; translation services throttle far more
    /// aggressively than the feed API does.
    #[serde(default = "default_translate_workers")]
    pub translate_workers: usize,
}

impl Default for HackerNewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_hacker_news_base_url(),
            sort: StorySort::default(),
            limit: default_hacker_news_limit(),
            comments_url_template: None,
            workers: default_feed_workers(),
            translate_workers: default_translate_workers(),
        }
    }
}

/// Video ranking feed source settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoRankingConfig {
    /// Ranking API URL
    #[serde(default = "default_video_ranking_api_url")]
    pub api_url: String,

    /// Video-link template with a `{VIDEO-ID}` placeholder
    /// (None = use the short link reported by the API)
    #[serde(default)]
    pub video_url_template: Option<String>,

    /// Keep only the first N videos of the ranking (default: 10)
    #[serde(default = "default_max_videos")]
    pub max_videos: usize,

    /// Worker budget for the fetch batch (default: 30)
    #[serde(default = "default_feed_workers")]
    pub workers: usize,

    /// Proxy provisioning endpoint returning one `host:port` as plain text
    /// (None = direct connection)
    #[serde(default)]
    pub proxy_endpoint: Option<String>,
}

impl Default for VideoRankingConfig {
    fn default() -> Self {
        Self {
            api_url: default_video_ranking_api_url(),
            video_url_template: None,
            max_videos: default_max_videos(),
            workers: default_feed_workers(),
            proxy_endpoint: None,
        }
    }
}

/// Form-POST translation service settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Translation API endpoint
    #[serde(default = "default_translate_endpoint")]
    pub endpoint: String,

    /// Application ID issued by the service
    pub app_id: String,

    /// Application key used to sign requests
    pub app_key: String,
}

/// Chat-completion service settings (OpenAI-compatible API)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatConfig {
    /// API base URL, up to and excluding `/chat/completions`
    pub base_url: String,

    /// Bearer token
    pub api_token: String,

    /// Model name to request
    pub model: String,
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/114.0.0.0 Safari/537.36"
        .to_string()
}

fn default_hacker_news_base_url() -> String {
    "https://hacker-news.firebaseio.com".to_string()
}

fn default_hacker_news_limit() -> usize {
    15
}

fn default_feed_workers() -> usize {
    30
}

fn default_translate_workers() -> usize {
    2
}

fn default_video_ranking_api_url() -> String {
    "https://api.bilibili.com/x/web-interface/ranking/v2".to_string()
}

fn default_max_videos() -> usize {
    10
}

fn default_translate_endpoint() -> String {
    "http://api.fanyi.baidu.com/api/trans/vip/translate".to_string()
}
