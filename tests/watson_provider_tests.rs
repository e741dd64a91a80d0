use std::time::Duration as StdDuration;

use emotion_detector_lib::error::RemoteErrorCode;
use emotion_detector_lib::models::emotion::{Emotion, EmotionOutcome};
use emotion_detector_lib::services::emotion_provider::{EmotionProvider, RemoteVerdict};
use emotion_detector_lib::services::emotion_service::EmotionService;
use emotion_detector_lib::services::watson_provider::{
    WatsonConfig, WatsonProvider, EMOTION_MODEL_ID, MODEL_ID_HEADER,
};
use httpmock::prelude::*;
use serde_json::json;

const PREDICT_PATH: &str = "/v1/watson.runtime.nlp.v1/NlpService/EmotionPredict";

fn config_for(server: &MockServer) -> WatsonConfig {
    WatsonConfig {
        endpoint: server.url(PREDICT_PATH),
        model_id: EMOTION_MODEL_ID.to_string(),
        http_timeout: StdDuration::from_secs(2),
    }
}

fn provider_for(server: &MockServer) -> WatsonProvider {
    WatsonProvider::try_new(&config_for(server)).expect("provider should build")
}

#[tokio::test]
async fn success_response_yields_remote_scores() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(PREDICT_PATH)
                .header(MODEL_ID_HEADER, EMOTION_MODEL_ID)
                .json_body(json!({ "raw_document": { "text": "what a lovely day" } }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "emotionPredictions": [{ "emotion": { "joy": 0.9, "anger": 0.1 } }]
                }));
        })
        .await;

    let verdict = provider_for(&server)
        .predict("what a lovely day")
        .await
        .expect("remote call should succeed");

    mock.assert_async().await;
    let scores = match verdict {
        RemoteVerdict::Scored(scores) => scores,
        RemoteVerdict::Rejected => panic!("expected scores"),
    };
    assert_eq!(scores.values(), [0.1, 0.0, 0.0, 0.9, 0.0]);
    assert_eq!(scores.dominant_emotion, Emotion::Joy);
}

#[tokio::test]
async fn bad_request_is_an_explicit_rejection() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PREDICT_PATH);
            then.status(400).body("anything at all");
        })
        .await;

    let verdict = provider_for(&server)
        .predict("I am so happy")
        .await
        .expect("400 is not a failure");

    assert_eq!(verdict, RemoteVerdict::Rejected);
}

#[tokio::test]
async fn other_statuses_are_failures() {
    for status in [404_u16, 429, 500, 503] {
        let server = MockServer::start_async().await;
        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path(PREDICT_PATH);
                then.status(status);
            })
            .await;

        let error = provider_for(&server)
            .predict("hello")
            .await
            .expect_err("non 200/400 should fail");

        assert_eq!(error.remote_code(), Some(RemoteErrorCode::UnexpectedStatus));
        assert!(error.correlation_id().is_some());
        assert!(error.to_string().contains(&status.to_string()));
    }
}

#[tokio::test]
async fn malformed_payloads_are_invalid_responses() {
    let bodies = [
        json!({ "unexpected": true }),
        json!({ "emotionPredictions": [] }),
        json!({ "emotionPredictions": [{ "notEmotion": {} }] }),
        json!({ "emotionPredictions": [{ "emotion": { "joy": "high" } }] }),
        json!({ "emotionPredictions": [{ "emotion": {
            "anger": null, "disgust": null, "fear": null, "joy": null, "sadness": null
        } }] }),
        json!({ "emotionPredictions": [{ "emotion": { "joy": null, "sadness": 0.3 } }] }),
    ];

    for body in bodies {
        let server = MockServer::start_async().await;
        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path(PREDICT_PATH);
                then.status(200).json_body(body.clone());
            })
            .await;

        let error = provider_for(&server)
            .predict("hello")
            .await
            .expect_err("malformed body should fail");

        assert_eq!(error.remote_code(), Some(RemoteErrorCode::InvalidResponse));
    }
}

#[tokio::test]
async fn non_json_body_is_an_invalid_response() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PREDICT_PATH);
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let error = provider_for(&server)
        .predict("hello")
        .await
        .expect_err("html body should fail");

    assert_eq!(error.remote_code(), Some(RemoteErrorCode::InvalidResponse));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PREDICT_PATH);
            then.status(200)
                .delay(StdDuration::from_millis(1500))
                .json_body(json!({ "emotionPredictions": [{ "emotion": { "joy": 1.0 } }] }));
        })
        .await;

    let config = WatsonConfig {
        http_timeout: StdDuration::from_millis(200),
        ..config_for(&server)
    };
    let provider = WatsonProvider::try_new(&config).expect("provider should build");

    let error = provider
        .predict("hello")
        .await
        .expect_err("request should time out");

    assert_eq!(error.remote_code(), Some(RemoteErrorCode::HttpTimeout));
}

#[tokio::test]
async fn refused_connection_is_unavailable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let config = WatsonConfig {
        endpoint: format!("http://127.0.0.1:{port}{PREDICT_PATH}"),
        ..WatsonConfig::default()
    };
    let provider = WatsonProvider::try_new(&config).expect("provider should build");

    let error = provider
        .predict("hello")
        .await
        .expect_err("nothing is listening");

    assert_eq!(error.remote_code(), Some(RemoteErrorCode::Unavailable));
}

#[tokio::test]
async fn null_scores_fall_back_to_keywords() {
    let server = MockServer::start_async().await;
    let _mock = server
        .mock_async(|when, then| {
            when.method(POST).path(PREDICT_PATH);
            then.status(200).json_body(json!({
                "emotionPredictions": [{ "emotion": {
                    "anger": null, "disgust": null, "fear": null, "joy": null, "sadness": null
                } }]
            }));
        })
        .await;

    let service = EmotionService::with_watson(&config_for(&server)).expect("service");
    let outcome = service.classify("I am so happy and excited today!").await;

    let scores = outcome.scores().expect("fallback scores");
    assert_eq!(scores.values(), [0.0, 0.0, 0.0, 1.0, 0.0]);
    assert_eq!(scores.dominant_emotion, Emotion::Joy);
}

#[tokio::test]
async fn service_over_http_handles_rejection_and_fallback() {
    let server = MockServer::start_async().await;
    let mut rejecting = server
        .mock_async(|when, then| {
            when.method(POST).path(PREDICT_PATH);
            then.status(400);
        })
        .await;

    let service = EmotionService::with_watson(&config_for(&server)).expect("service");
    assert_eq!(
        service.classify("I hate this, it's so sad").await,
        EmotionOutcome::Rejected
    );
    rejecting.delete_async().await;

    let _failing = server
        .mock_async(|when, then| {
            when.method(POST).path(PREDICT_PATH);
            then.status(500);
        })
        .await;

    let outcome = service.classify("I hate this, it's so sad").await;
    let scores = outcome.scores().expect("fallback scores");
    assert_eq!(scores.anger, 0.5);
    assert_eq!(scores.sadness, 0.5);
    assert_eq!(scores.dominant_emotion, Emotion::Anger);
}
