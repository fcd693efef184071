//! JSONL translation against a mock Translation API

mod common;

use assert_json_diff::assert_json_eq;
use gtrans::{JsonlOptions, JsonlProcessor, JsonlSummary, TranslationError};
use serde_json::{json, Value};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{form_queries, query_value, translator_for, EchoTranslations, TRANSLATE_PATH};

fn read_lines(path: &std::path::Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_translate_jsonl_adds_translated_text_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSLATE_PATH))
        .respond_with(EchoTranslations)
        .expect(2)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jsonl");
    let output = dir.path().join("out").join("out.jsonl");
    std::fs::write(
        &input,
        "{\"text\":\"hi\"}\n{\"other\":1}\n{\"id\":3,\"text\":\"早上好\"}\n",
    )
    .unwrap();

    let summary = assert_ok!(
        translator_for(&server)
            .translate_jsonl(&input, &output, Some("ja".to_string()), None)
            .await
    );
    assert_eq!(summary, JsonlSummary { lines: 3, translated: 2 });

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_json_eq!(&lines[0], json!({ "text": "hi", "translatedText": "<hi>" }));
    assert_json_eq!(&lines[1], json!({ "other": 1 }));
    assert_json_eq!(&lines[2], json!({ "id": 3, "text": "早上好", "translatedText": "<早上好>" }));

    // Non-ASCII stays unescaped and keys keep their input order
    let raw = std::fs::read_to_string(&output).unwrap();
    assert!(raw.contains("{\"id\":3,\"text\":\"早上好\",\"translatedText\":\"<早上好>\"}"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(form_queries(&requests[0]), vec!["hi"]);
    assert_eq!(query_value(&requests[0], "target").as_deref(), Some("ja"));
}

#[tokio::test]
async fn test_custom_text_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSLATE_PATH))
        .respond_with(EchoTranslations)
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jsonl");
    let output = dir.path().join("out.jsonl");
    std::fs::write(&input, "{\"body\":\"hello\",\"text\":\"skip\"}\n").unwrap();

    let processor = JsonlProcessor::new(translator_for(&server)).with_options(JsonlOptions {
        text_field: "body".to_string(),
        ..Default::default()
    });
    processor.translate_file(&input, &output).await.unwrap();

    let lines = read_lines(&output);
    assert_json_eq!(
        &lines[0],
        json!({ "body": "hello", "text": "skip", "translatedText": "<hello>" })
    );
}

#[tokio::test]
async fn test_request_failure_stops_after_flushing_written_lines() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TRANSLATE_PATH))
        .respond_with(EchoTranslations)
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TRANSLATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.jsonl");
    let output = dir.path().join("out.jsonl");
    std::fs::write(&input, "{\"text\":\"one\"}\n{\"text\":\"two\"}\n{\"text\":\"three\"}\n").unwrap();

    let err = translator_for(&server)
        .translate_jsonl(&input, &output, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::RequestFailed(ref f) if f.status == 400));
    let lines = read_lines(&output);
    assert_eq!(lines.len(), 1);
    assert_json_eq!(&lines[0], json!({ "text": "one", "translatedText": "<one>" }));
}

#[tokio::test]
async fn test_missing_input_is_file_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let err = translator_for(&server)
        .translate_jsonl(dir.path().join("missing.jsonl"), dir.path().join("out.jsonl"), None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslationError::FileError { .. }));
}
