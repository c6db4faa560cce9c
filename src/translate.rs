//! Form-POST translation client with an internal result cache
//!
//! The client signs each request with `md5(app_id + query + salt + app_key)`
//! over a random salt, and caches results keyed by input text so repeated
//! titles cost one network call. The cache lives inside the explicitly
//! constructed [`Translator`] — feed sources receive it by injection, never
//! through ambient global state.

use crate::config::TranslateConfig;
use crate::error::{Error, Result};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// Response shape of the translation endpoint
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    trans_result: Vec<TranslateSegment>,
    #[serde(default)]
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslateSegment {
    dst: String,
}

/// Translation client
///
/// Safe to share across concurrent task invocations: the internal cache is
/// guarded by its own lock, and the lock is never held across a network call.
pub struct Translator {
    client: reqwest::Client,
    endpoint: String,
    app_id: String,
    app_key: String,
    cache: Mutex<HashMap<String, String>>,
}

impl Translator {
    /// Create a translator from service credentials
    pub fn new(client: reqwest::Client, config: TranslateConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint,
            app_id: config.app_id,
            app_key: config.app_key,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Translate English text to Simplified Chinese
    ///
    /// # Errors
    /// See [`Translator::translate`]
    pub async fn translate_with_defaults(&self, query: &str) -> Result<String> {
        self.translate(query, "en", "zh").await
    }

    /// Translate `query` from `from_lang` to `to_lang`
    ///
    /// # Errors
    /// Returns error on network failure, a non-success status code, or a
    /// response carrying no translation segments.
    pub async fn translate(&self, query: &str, from_lang: &str, to_lang: &str) -> Result<String> {
        {
            let cache = self.cache.lock().await;
            if let Some(hit) = cache.get(query) {
                debug!(query, "translation cache hit");
                return Ok(hit.clone());
            }
        }

        let salt: u32 = rand::thread_rng().gen_range(32768..65536);
        let sign = sign_request(&self.app_id, query, salt, &self.app_key);
        let salt = salt.to_string();

        let params = [
            ("appid", self.app_id.as_str()),
            ("q", query),
            ("from", from_lang),
            ("to", to_lang),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
        ];

        let response = self.client.post(&self.endpoint).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let payload: TranslateResponse = response.json().await?;
        if payload.trans_result.is_empty() {
            return Err(Error::Translation(
                payload
                    .error_msg
                    .unwrap_or_else(|| "empty translation result".to_string()),
            ));
        }

        let translated: String = payload
            .trans_result
            .iter()
            .map(|segment| segment.dst.as_str())
            .collect();

        self.cache
            .lock()
            .await
            .insert(query.to_string(), translated.clone());

        Ok(translated)
    }
}

/// MD5 signature over `app_id + query + salt + app_key`, lowercase hex
fn sign_request(app_id: &str, query: &str, salt: u32, app_key: &str) -> String {
    let digest = md5::compute(format!("{app_id}{query}{salt}{app_key}"));
    format!("{digest:x}")
}
