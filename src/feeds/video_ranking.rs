//! Ranked video feed source
//!
//! Fetches a ranking endpoint that answers with an enveloped payload
//! (`code`/`message`/`data.list`) and maps the leading entries into [`Video`]
//! records. Supports an optional egress proxy obtained from a provisioning
//! endpoint that returns one `host:port` as plain text.

use crate::config::{HttpConfig, VideoRankingConfig};
use crate::error::{Error, Result};
use crate::feeds::{FeedUpdate, Video};
use crate::pool::{Job, decode_json_task};
use crate::utils::parse_unix_timestamp;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

/// Envelope returned by the ranking endpoint; non-zero `code` means the
/// request was rejected even though the HTTP status was 200
#[derive(Debug, Deserialize)]
struct RankingResponse {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: RankingData,
}

#[derive(Debug, Default, Deserialize)]
struct RankingData {
    #[serde(default)]
    list: Vec<RankingVideo>,
}

#[derive(Debug, Deserialize)]
struct RankingVideo {
    #[serde(default)]
    pic: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    pubdate: i64,
    #[serde(default)]
    owner: RankingOwner,
    #[serde(default)]
    bvid: String,
    #[serde(default)]
    short_link_v2: String,
}

#[derive(Debug, Default, Deserialize)]
struct RankingOwner {
    #[serde(default)]
    mid: i64,
    #[serde(default)]
    name: String,
}

/// Fetch one proxy address from a provisioning endpoint
///
/// The endpoint answers with a single `host:port` as plain text; surrounding
/// whitespace is trimmed.
///
/// # Errors
/// Returns error on a non-success status or an empty body.
pub async fn fetch_proxy_address(client: &reqwest::Client, endpoint: &str) -> Result<String> {
    let response = client.get(endpoint).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            url: endpoint.to_string(),
        });
    }

    let address = response.text().await?.trim().to_string();
    if address.is_empty() {
        return Err(Error::Other("empty proxy address received".to_string()));
    }

    Ok(address)
}

/// Build the HTTP client used for the ranking request, routing through a
/// provisioned proxy when one is configured
async fn build_ranking_client(
    config: &VideoRankingConfig,
    http: &HttpConfig,
) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(http.request_timeout)
        .user_agent(http.user_agent.clone());

    if let Some(endpoint) = &config.proxy_endpoint {
        let bootstrap = http.build_client()?;
        let address = fetch_proxy_address(&bootstrap, endpoint).await.map_err(|e| {
            error!(error = %e, endpoint = %endpoint, "failed to obtain proxy address");
            e
        })?;
        info!(proxy = %address, "routing ranking request through proxy");
        builder = builder.proxy(reqwest::Proxy::all(format!("http://{address}"))?);
    }

    builder.build().map_err(Error::Network)
}

fn map_video(video: RankingVideo, config: &VideoRankingConfig) -> Video {
    let url = match &config.video_url_template {
        Some(template) => template.replace("{VIDEO-ID}", &video.bvid),
        None => video.short_link_v2,
    };

    Video {
        thumbnail_url: video.pic,
        title: video.title,
        url,
        author_url: format!("https://space.bilibili.com/{}/video", video.owner.mid),
        author: video.owner.name,
        time_posted: parse_unix_timestamp(video.pubdate),
    }
}

/// Fetch the configured video ranking
///
/// Issues the ranking request through the worker pool with browser-style
/// headers, treats a non-zero envelope code as an item failure, and keeps
/// only the first `max_videos` entries of each surviving response.
///
/// # Errors
/// Returns `Error::NoContent` when no usable videos remain. Partial failure
/// is reported through the returned [`FeedUpdate`], not as an error.
pub async fn fetch_videos(
    config: &VideoRankingConfig,
    http: &HttpConfig,
) -> Result<FeedUpdate<Video>> {
    let client = build_ranking_client(config, http).await?;

    let request = client
        .get(&config.api_url)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.5")
        .header("Connection", "keep-alive")
        .build()?;

    debug!(url = %config.api_url, "fetching video ranking");

    let batch = Job::new(
        decode_json_task::<RankingResponse>(client.clone()),
        vec![request],
    )
    .with_workers(config.workers)
    .run()
    .await;

    let mut videos = Vec::with_capacity(config.max_videos);
    let mut failed = 0;

    for outcome in batch.into_outcomes() {
        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                failed += 1;
                error!(error = %e, "failed to fetch video ranking");
                continue;
            }
        };

        if response.code != 0 {
            failed += 1;
            error!(
                code = response.code,
                message = %response.message,
                "ranking API returned non-zero code"
            );
            continue;
        }

        videos.extend(
            response
                .data
                .list
                .into_iter()
                .take(config.max_videos)
                .map(|video| map_video(video, config)),
        );
    }

    if videos.is_empty() {
        return Err(Error::NoContent);
    }

    if failed > 0 {
        warn!(failed, "missing videos from some ranking requests");
    }

    Ok(FeedUpdate {
        items: videos,
        failed,
    })
}
