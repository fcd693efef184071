//! Translation API client with request batching and rate-limit retry

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::core::chunking::{content_len, split_list, split_list_by_content_size};
use crate::core::config::TranslatorConfig;
use crate::core::errors::{FailedResponse, Result, TranslationError};
use crate::core::models::{
    normalize_source, Answer, DetectResponse, DetectionsData, Envelope, LanguageResponse,
    LanguagesData, LanguagesOptions, Query, TranslateOptions, TranslateResponse, TranslationsData,
};
use crate::processors::jsonl::{JsonlOptions, JsonlProcessor, JsonlSummary};

/// Client for the Translation v2 API authenticated with an API key.
///
/// Requests are issued one at a time. Batched calls split their input by item
/// count and then by content size, and each resulting group is retried on
/// HTTP 429 with a linear backoff.
#[derive(Debug, Clone)]
pub struct ApiKeyTranslator {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
}

impl ApiKeyTranslator {
    /// Create a new translator
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder().pool_idle_timeout(Some(Duration::from_secs(30)));

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        if let Some(proxy) = &config.proxy {
            // Explicit proxies replace the ones from the environment
            builder = builder.no_proxy();
            if let Some(url) = &proxy.http {
                builder = builder.proxy(reqwest::Proxy::http(url)?);
            }
            if let Some(url) = &proxy.https {
                builder = builder.proxy(reqwest::Proxy::https(url)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        Self::new(TranslatorConfig::from_env()?)
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// List the languages supported for `target` (names are given in that language)
    pub async fn languages(&self, options: LanguagesOptions) -> Result<Vec<LanguageResponse>> {
        let target = options.target.as_deref().unwrap_or(&self.config.target);
        let model = options.model.as_deref().unwrap_or(&self.config.model);
        let url = format!("{}/languages", self.base_url());

        let mut request = self.client.get(&url).query(&[
            ("key", self.config.api_key.as_str()),
            ("target", target),
            ("model", model),
        ]);
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }

        debug!("Fetching supported languages for {} ({})", target, model);
        let response = request.send().await?;
        let body: Envelope<LanguagesData> = read_success(&url, response).await?;

        Ok(body.data.languages)
    }

    /// Detect the language of one string or a list of strings
    pub async fn detect(
        &self,
        q: impl Into<Query>,
        timeout: Option<Duration>,
    ) -> Result<Answer<DetectResponse>> {
        let query = q.into();
        let url = format!("{}/detect", self.base_url());
        let params = [("key", self.config.api_key.as_str())];

        let records = self
            .send_batched(&query, &url, &params, timeout, |body: Envelope<DetectionsData>| {
                body.data
                    .detections
                    .into_iter()
                    .map(|detection| {
                        detection.into_iter().next().ok_or_else(|| {
                            TranslationError::InvalidResponse {
                                message: "empty detection entry".to_string(),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .await?;

        into_answer(&query, records)
    }

    /// Translate one string or a list of strings.
    ///
    /// Unset options fall back to the client configuration. A source of `auto`
    /// asks the API to detect the source language for this call.
    pub async fn translate(
        &self,
        q: impl Into<Query>,
        options: TranslateOptions,
    ) -> Result<Answer<TranslateResponse>> {
        let query = q.into();
        let target = options.target.as_deref().unwrap_or(&self.config.target);
        let source = match options.source {
            Some(source) => normalize_source(Some(source)),
            None => self.config.source.clone(),
        };
        let format = options.format.unwrap_or(self.config.format);
        let model = options.model.as_deref().unwrap_or(&self.config.model);
        let url = self.base_url().to_string();

        let mut params = vec![("key", self.config.api_key.as_str()), ("target", target)];
        if let Some(source) = source.as_deref() {
            params.push(("source", source));
        }
        params.push(("format", format.as_str()));
        params.push(("model", model));

        let extract = |body: Envelope<TranslationsData>| -> Result<Vec<TranslateResponse>> {
            Ok(body.data.translations)
        };
        let records = self
            .send_batched(&query, &url, &params, options.timeout, extract)
            .await?;

        into_answer(&query, records)
    }

    /// Translate the `text` field of every line of a JSONL file into `translatedText`
    pub async fn translate_jsonl(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        target: Option<String>,
        source: Option<String>,
    ) -> Result<JsonlSummary> {
        let options = JsonlOptions {
            target,
            source,
            ..Default::default()
        };

        JsonlProcessor::new(self.clone())
            .with_options(options)
            .translate_file(input.as_ref(), output.as_ref())
            .await
    }

    /// Send every size-group of `query` and collect the parsed records in order.
    ///
    /// The first group that ends with a non-200 status aborts the whole call.
    async fn send_batched<T, D, F>(
        &self,
        query: &Query,
        url: &str,
        params: &[(&str, &str)],
        timeout: Option<Duration>,
        extract: F,
    ) -> Result<Vec<T>>
    where
        D: DeserializeOwned,
        F: Fn(D) -> Result<Vec<T>>,
    {
        let mut records = Vec::with_capacity(query.len());
        let mut requests = 0;

        for count_group in split_list(query.items(), self.config.max_batch_items) {
            for size_group in split_list_by_content_size(count_group, self.config.max_batch_bytes) {
                let response = self.post_with_retry(url, params, size_group, timeout).await?;
                let body: D = read_success(url, response).await?;
                records.extend(extract(body)?);
                requests += 1;
            }
        }

        debug!("Received {} records from {} in {} requests", records.len(), url, requests);
        Ok(records)
    }

    /// POST one group, retrying while the API answers 429.
    ///
    /// Returns the last response whatever its status; transport errors are propagated.
    async fn post_with_retry(
        &self,
        url: &str,
        params: &[(&str, &str)],
        items: &[String],
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response> {
        let form: Vec<(&str, &str)> = items.iter().map(|q| ("q", q.as_str())).collect();
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let mut request = self.client.post(url).query(params).form(&form);
            if let Some(timeout) = timeout {
                request = request.timeout(timeout);
            }

            debug!(
                "POST {} with {} items ({} bytes), attempt {}",
                url,
                items.len(),
                content_len(items),
                attempt
            );
            let response = request.send().await?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS {
                return Ok(response);
            }

            let delay = backoff_delay(self.config.retry_backoff(), attempt);
            warn!(
                "Rate limited by {} (attempt {}/{}), waiting {:?}",
                url, attempt, max_attempts, delay
            );
            sleep(delay).await;

            if attempt >= max_attempts {
                return Ok(response);
            }
            attempt += 1;
        }
    }
}

/// Linear backoff: `base * attempt`
pub(crate) fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * attempt
}

/// Read the body, turning any non-200 status into [`TranslationError::RequestFailed`]
async fn read_success<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        warn!("Request to {} failed with status {}", url, status);
        return Err(TranslationError::RequestFailed(FailedResponse {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        }));
    }

    serde_json::from_str(&body).map_err(|e| TranslationError::InvalidResponse {
        message: format!("{}: {}", url, e),
    })
}

fn into_answer<T>(query: &Query, records: Vec<T>) -> Result<Answer<T>> {
    if !query.is_one() {
        return Ok(Answer::Many(records));
    }

    records
        .into_iter()
        .next()
        .map(Answer::One)
        .ok_or_else(|| TranslationError::InvalidResponse {
            message: "no result for single query".to_string(),
        })
}
