//! Hacker News feed source
//!
//! Fetches the ranked story-ID list, then one request per story through the
//! worker pool, and maps the surviving payloads into [`ForumPost`] records.
//! Titles are optionally translated through an injected [`Translator`], again
//! driven by the pool with a small worker budget.

use crate::config::HackerNewsConfig;
use crate::error::{Error, Result};
use crate::feeds::{FeedUpdate, ForumPost};
use crate::pool::{Job, decode_json_task};
use crate::translate::Translator;
use crate::utils::{extract_domain, parse_unix_timestamp};
use serde::Deserialize;
use tracing::{debug, error, warn};

/// Per-post payload shape returned by the item endpoint
#[derive(Debug, Deserialize)]
struct PostResponse {
    id: i64,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    title: String,
    #[serde(default, rename = "url")]
    target_url: Option<String>,
    #[serde(default, rename = "descendants")]
    comment_count: i64,
    #[serde(default, rename = "time")]
    time_posted: i64,
}

/// Fetch the ranked list of post IDs for the configured sort order
async fn fetch_post_ids(client: &reqwest::Client, config: &HackerNewsConfig) -> Result<Vec<i64>> {
    let url = format!(
        "{}/v0/{}stories.json",
        config.base_url.trim_end_matches('/'),
        config.sort.as_str()
    );

    let ids = match client.get(&url).send().await {
        Ok(response) if response.status().is_success() => response.json::<Vec<i64>>().await,
        Ok(response) => {
            warn!(
                status = response.status().as_u16(),
                url = %url,
                "story list request rejected"
            );
            return Err(Error::NoContent);
        }
        Err(e) => {
            warn!(error = %e, url = %url, "could not fetch list of post IDs");
            return Err(Error::NoContent);
        }
    };

    ids.map_err(|e| {
        warn!(error = %e, url = %url, "could not decode list of post IDs");
        Error::NoContent
    })
}

/// Fetch posts for the given IDs and map them into forum posts
async fn fetch_posts_from_ids(
    client: &reqwest::Client,
    config: &HackerNewsConfig,
    post_ids: &[i64],
) -> Result<FeedUpdate<ForumPost>> {
    let mut requests = Vec::with_capacity(post_ids.len());
    for id in post_ids {
        let request = client
            .get(format!(
                "{}/v0/item/{}.json",
                config.base_url.trim_end_matches('/'),
                id
            ))
            .build()?;
        requests.push(request);
    }

    let batch = Job::new(decode_json_task::<PostResponse>(client.clone()), requests)
        .with_workers(config.workers)
        .run()
        .await;

    let failed = batch.failed_count();
    let mut posts = Vec::with_capacity(batch.len());

    for (id, outcome) in post_ids.iter().zip(batch.into_outcomes()) {
        match outcome {
            Ok(post) => posts.push(map_post(post, config)),
            Err(e) => {
                error!(post_id = *id, error = %e, "failed to fetch or decode hacker news post");
            }
        }
    }

    if posts.is_empty() {
        return Err(Error::NoContent);
    }

    Ok(FeedUpdate {
        items: posts,
        failed,
    })
}

fn map_post(post: PostResponse, config: &HackerNewsConfig) -> ForumPost {
    let discussion_url = match &config.comments_url_template {
        Some(template) => template.replace("{POST-ID}", &post.id.to_string()),
        None => format!("https://news.ycombinator.com/item?id={}", post.id),
    };

    ForumPost {
        title: post.title,
        discussion_url,
        target_url_domain: post.target_url.as_deref().and_then(extract_domain),
        target_url: post.target_url,
        comment_count: post.comment_count,
        score: post.score,
        time_posted: parse_unix_timestamp(post.time_posted),
    }
}

/// Translate post titles in place, keeping the original on failure
///
/// The original is a fine fallback: a missed translation should not cost the
/// dashboard an entry.
async fn translate_titles(
    posts: &mut [ForumPost],
    translator: &Translator,
    workers: usize,
) {
    let titles: Vec<String> = posts.iter().map(|post| post.title.clone()).collect();

    let task = |title: String| async move { translator.translate_with_defaults(&title).await };
    let batch = Job::new(task, titles).with_workers(workers).run().await;

    for (post, outcome) in posts.iter_mut().zip(batch.into_outcomes()) {
        match outcome {
            Ok(translated) => post.title = translated,
            Err(e) => {
                warn!(error = %e, title = %post.title, "failed to translate title");
            }
        }
    }
}

/// Fetch the configured Hacker News ranking as forum posts
///
/// Pulls the story-ID list, truncates it to the configured limit, fetches all
/// posts through the worker pool, and maps them into [`ForumPost`] records.
/// When a `translator` is supplied, titles are translated after fetching.
///
/// # Errors
/// Returns `Error::NoContent` when the ID list cannot be fetched or every
/// post request failed. Partial failure is reported through the returned
/// [`FeedUpdate`], not as an error.
pub async fn fetch_posts(
    client: &reqwest::Client,
    config: &HackerNewsConfig,
    translator: Option<&Translator>,
) -> Result<FeedUpdate<ForumPost>> {
    let mut post_ids = fetch_post_ids(client, config).await?;
    if post_ids.len() > config.limit {
        post_ids.truncate(config.limit);
    }
    debug!(count = post_ids.len(), sort = config.sort.as_str(), "fetching hacker news posts");

    let mut update = fetch_posts_from_ids(client, config, &post_ids).await?;

    if let Some(translator) = translator {
        translate_titles(&mut update.items, translator, config.translate_workers).await;
    }

    if update.is_partial() {
        warn!(failed = update.failed, "some hacker news posts could not be fetched");
    }

    Ok(update)
}
