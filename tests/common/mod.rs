//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::time::Duration;

use gtrans::{ApiKeyTranslator, TranslatorConfig};
use serde_json::json;
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const API_KEY: &str = "test_key";
pub const TRANSLATE_PATH: &str = "/language/translate/v2";
pub const DETECT_PATH: &str = "/language/translate/v2/detect";
pub const LANGUAGES_PATH: &str = "/language/translate/v2/languages";

/// Config pointed at the mock server, with a short backoff
pub fn config_for(server: &MockServer) -> TranslatorConfig {
    TranslatorConfig::new(API_KEY)
        .with_base_url(format!("{}{}", server.uri(), TRANSLATE_PATH))
        .with_retry(3, Duration::from_millis(10))
}

pub fn translator_for(server: &MockServer) -> ApiKeyTranslator {
    ApiKeyTranslator::new(config_for(server)).unwrap()
}

/// Repeated `q` form fields of a request, in order
pub fn form_queries(request: &Request) -> Vec<String> {
    url::form_urlencoded::parse(&request.body)
        .filter(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .collect()
}

/// Query-string value of a request
pub fn query_value(request: &Request, name: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Answers a translate request with `<q>` for every `q`
pub struct EchoTranslations;

impl Respond for EchoTranslations {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let translations: Vec<_> = form_queries(request)
            .into_iter()
            .map(|q| json!({ "translatedText": format!("<{}>", q), "detectedSourceLanguage": "en" }))
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({ "data": { "translations": translations } }))
    }
}

/// Answers a detect request with one singleton detection list per `q`
pub struct EchoDetections;

impl Respond for EchoDetections {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let detections: Vec<_> = form_queries(request)
            .into_iter()
            .map(|q| {
                let language = if q.is_ascii() { "en" } else { "zh-CN" };
                json!([{ "language": language, "isReliable": false, "confidence": 1 }])
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({ "data": { "detections": detections } }))
    }
}
