use crate::config::{HackerNewsConfig, HttpConfig, StorySort, VideoRankingConfig};
use crate::error::Error;
use crate::feeds::{hacker_news, video_ranking};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn hn_config(server_uri: &str) -> HackerNewsConfig {
    HackerNewsConfig {
        base_url: server_uri.to_string(),
        ..Default::default()
    }
}

fn hn_post(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "score": 100 + id,
        "title": title,
        "url": format!("https://www.example.com/{id}"),
        "descendants": 10 * id,
        "time": 1_700_000_000 + id,
    })
}

async fn mount_story_list(server: &MockServer, sort: StorySort, ids: &[i64]) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/{}stories.json", sort.as_str())))
        .respond_with(ResponseTemplate::new(200).set_body_json(ids))
        .mount(server)
        .await;
}

async fn mount_post(server: &MockServer, id: i64, title: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/v0/item/{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(hn_post(id, title)))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------
// hacker_news
// ---------------------------------------------------------------

#[tokio::test]
async fn hacker_news_full_success_preserves_ranking_order() {
    let server = MockServer::start().await;
    mount_story_list(&server, StorySort::Top, &[3, 1, 2]).await;
    mount_post(&server, 3, "third story").await;
    mount_post(&server, 1, "first story").await;
    mount_post(&server, 2, "second story").await;

    let client = reqwest::Client::new();
    let update = hacker_news::fetch_posts(&client, &hn_config(&server.uri()), None)
        .await
        .unwrap();

    assert_eq!(update.failed, 0);
    assert!(!update.is_partial());
    assert!(update.condition().is_none());

    // Output order follows the ranking, not post IDs
    let titles: Vec<&str> = update.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["third story", "first story", "second story"]);

    let first = &update.items[0];
    assert_eq!(first.discussion_url, "https://news.ycombinator.com/item?id=3");
    assert_eq!(first.target_url.as_deref(), Some("https://www.example.com/3"));
    assert_eq!(first.target_url_domain.as_deref(), Some("example.com"));
    assert_eq!(first.score, 103);
    assert_eq!(first.comment_count, 30);
    assert_eq!(first.time_posted.timestamp(), 1_700_000_003);
}

#[tokio::test]
async fn hacker_news_partial_failure_keeps_surviving_posts() {
    let server = MockServer::start().await;
    mount_story_list(&server, StorySort::Top, &[1, 2, 3]).await;
    mount_post(&server, 1, "alive").await;
    Mock::given(method("GET"))
        .and(path("/v0/item/2.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_post(&server, 3, "also alive").await;

    let client = reqwest::Client::new();
    let update = hacker_news::fetch_posts(&client, &hn_config(&server.uri()), None)
        .await
        .unwrap();

    assert_eq!(update.failed, 1);
    assert!(update.is_partial());
    assert!(matches!(
        update.condition(),
        Some(Error::PartialContent { failed: 1 })
    ));
    let titles: Vec<&str> = update.items.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["alive", "also alive"]);
}

#[tokio::test]
async fn hacker_news_total_failure_is_no_content() {
    let server = MockServer::start().await;
    mount_story_list(&server, StorySort::Top, &[1, 2]).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let err = hacker_news::fetch_posts(&client, &hn_config(&server.uri()), None)
        .await
        .unwrap_err();
    assert!(err.is_no_content());
}

#[tokio::test]
async fn hacker_news_unreachable_story_list_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let err = hacker_news::fetch_posts(&client, &hn_config(&server.uri()), None)
        .await
        .unwrap_err();
    assert!(err.is_no_content());
}

#[tokio::test]
async fn hacker_news_limit_truncates_the_ranking() {
    let server = MockServer::start().await;
    mount_story_list(&server, StorySort::Best, &[10, 20, 30, 40, 50]).await;
    mount_post(&server, 10, "kept one").await;
    mount_post(&server, 20, "kept two").await;

    let config = HackerNewsConfig {
        base_url: server.uri(),
        sort: StorySort::Best,
        limit: 2,
        ..Default::default()
    };

    let client = reqwest::Client::new();
    let update = hacker_news::fetch_posts(&client, &config, None).await.unwrap();

    // Only the first two IDs are requested at all
    assert_eq!(update.items.len(), 2);
    assert_eq!(update.failed, 0);
}

#[tokio::test]
async fn hacker_news_comments_template_substitutes_post_id() {
    let server = MockServer::start().await;
    mount_story_list(&server, StorySort::Top, &[42]).await;
    mount_post(&server, 42, "templated").await;

    let config = HackerNewsConfig {
        base_url: server.uri(),
        comments_url_template: Some("https://hn.mirror.example/post/{POST-ID}".to_string()),
        ..Default::default()
    };

    let client = reqwest::Client::new();
    let update = hacker_news::fetch_posts(&client, &config, None).await.unwrap();
    assert_eq!(
        update.items[0].discussion_url,
        "https://hn.mirror.example/post/42"
    );
}

// ---------------------------------------------------------------
// video_ranking
// ---------------------------------------------------------------

fn ranking_body(count: usize) -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "aid": i,
                "pic": format!("https://img.example.com/{i}.jpg"),
                "title": format!("video {i}"),
                "pubdate": 1_690_000_000 + i,
                "owner": {"mid": 1000 + i, "name": format!("uploader {i}")},
                "bvid": format!("BV{i:06}"),
                "short_link_v2": format!("https://b23.example/{i}"),
            })
        })
        .collect();
    json!({"code": 0, "message": "0", "ttl": 1, "data": {"note": "", "list": list}})
}

fn ranking_config(server_uri: &str) -> VideoRankingConfig {
    VideoRankingConfig {
        api_url: format!("{server_uri}/x/web-interface/ranking/v2"),
        ..Default::default()
    }
}

#[tokio::test]
async fn video_ranking_maps_and_truncates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/ranking/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ranking_body(15)))
        .mount(&server)
        .await;

    let update = video_ranking::fetch_videos(&ranking_config(&server.uri()), &HttpConfig::default())
        .await
        .unwrap();

    // Only the leading max_videos entries survive
    assert_eq!(update.items.len(), 10);
    assert_eq!(update.failed, 0);

    let first = &update.items[0];
    assert_eq!(first.title, "video 0");
    assert_eq!(first.url, "https://b23.example/0");
    assert_eq!(first.author, "uploader 0");
    assert_eq!(first.author_url, "https://space.bilibili.com/1000/video");
    assert_eq!(first.thumbnail_url, "https://img.example.com/0.jpg");
    assert_eq!(first.time_posted.timestamp(), 1_690_000_000);
}

#[tokio::test]
async fn video_ranking_template_substitutes_video_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/ranking/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ranking_body(1)))
        .mount(&server)
        .await;

    let config = VideoRankingConfig {
        api_url: format!("{}/x/web-interface/ranking/v2", server.uri()),
        video_url_template: Some("https://mirror.example/watch/{VIDEO-ID}".to_string()),
        ..Default::default()
    };

    let update = video_ranking::fetch_videos(&config, &HttpConfig::default())
        .await
        .unwrap();
    assert_eq!(update.items[0].url, "https://mirror.example/watch/BV000000");
}

#[tokio::test]
async fn video_ranking_nonzero_code_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x/web-interface/ranking/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": -412, "message": "request was rejected", "data": {"list": []}
        })))
        .mount(&server)
        .await;

    let err = video_ranking::fetch_videos(&ranking_config(&server.uri()), &HttpConfig::default())
        .await
        .unwrap_err();
    assert!(err.is_no_content());
}

#[tokio::test]
async fn video_ranking_http_failure_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = video_ranking::fetch_videos(&ranking_config(&server.uri()), &HttpConfig::default())
        .await
        .unwrap_err();
    assert!(err.is_no_content());
}

#[tokio::test]
async fn proxy_address_is_fetched_and_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/provision"))
        .respond_with(ResponseTemplate::new(200).set_body_string("10.0.0.1:8080\n"))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let address =
        video_ranking::fetch_proxy_address(&client, &format!("{}/provision", server.uri()))
            .await
            .unwrap();
    assert_eq!(address, "10.0.0.1:8080");
}

#[tokio::test]
async fn empty_proxy_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/provision"))
        .respond_with(ResponseTemplate::new(200).set_body_string("  \n"))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let err = video_ranking::fetch_proxy_address(&client, &format!("{}/provision", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Other(_)));
}
