use crate::e2e::helpers;

use helpers::fake_tts::{fake_audio, FakeResponse, FakeTtsServer};
use helpers::TEST_API_KEY;
use pretty_assertions::assert_eq;
use serde_json::json;
use workout_coach::domain::settings::DEFAULT_REMOTE_VOICE_ID;
use workout_coach::infrastructure::config::TtsConfig;
use workout_coach::infrastructure::repositories::{
    ElevenLabsTtsRepository, RemoteSpeechRequest, RemoteTtsError, TtsRepository,
};

fn repository(server: &FakeTtsServer) -> ElevenLabsTtsRepository {
    ElevenLabsTtsRepository::new(&TtsConfig {
        base_url: server.base_url.clone(),
        ..TtsConfig::default()
    })
    .expect("Failed to build client")
}

fn request(text: &str, voice_id: &str) -> RemoteSpeechRequest {
    RemoteSpeechRequest {
        text: text.to_string(),
        api_key: Some(TEST_API_KEY.to_string()),
        voice_id: voice_id.to_string(),
    }
}

#[tokio::test]
async fn it_should_send_provider_wire_format() {
    let server = FakeTtsServer::start().await;

    let audio = repository(&server)
        .synthesize(&request("Three", "voice-123"))
        .await
        .unwrap();

    assert_eq!(audio, fake_audio("Three"));
    let captured = server.last_request().unwrap();
    assert_eq!(captured.voice_id, "voice-123");
    assert_eq!(captured.api_key.as_deref(), Some(TEST_API_KEY));
    assert_eq!(captured.accept.as_deref(), Some("audio/mpeg"));
    assert_eq!(captured.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        captured.body,
        json!({
            "text": "Three",
            "model_id": "eleven_flash_v2_5",
            "voice_settings": {
                "stability": 0.5,
                "similarity_boost": 0.75,
                "style": 0.3,
                "use_speaker_boost": true
            },
            "output_format": "mp3_44100_128"
        })
    );
}

#[tokio::test]
async fn it_should_use_default_voice_when_none_is_set() {
    let server = FakeTtsServer::start().await;

    repository(&server)
        .synthesize(&request("Go!", ""))
        .await
        .unwrap();

    assert_eq!(server.last_request().unwrap().voice_id, DEFAULT_REMOTE_VOICE_ID);
}

#[tokio::test]
async fn it_should_reject_missing_key_without_network() {
    let server = FakeTtsServer::start().await;
    let mut req = request("Go!", "voice-123");
    req.api_key = None;

    let result = repository(&server).synthesize(&req).await;

    assert!(matches!(result, Err(RemoteTtsError::NoApiKey)));
    assert_eq!(server.calls(), 0);
}

#[tokio::test]
async fn it_should_map_unauthorized() {
    let server = FakeTtsServer::start().await;
    server.respond_with(FakeResponse::Status(401, String::new()));

    let result = repository(&server).synthesize(&request("Go!", "v")).await;

    assert!(matches!(result, Err(RemoteTtsError::Unauthorized)));
}

#[tokio::test]
async fn it_should_map_quota_exceeded() {
    let server = FakeTtsServer::start().await;
    server.respond_with(FakeResponse::Status(
        429,
        r#"{"detail":{"message":"quota_exceeded"}}"#.to_string(),
    ));

    let result = repository(&server).synthesize(&request("Go!", "v")).await;

    assert!(matches!(result, Err(RemoteTtsError::QuotaExceeded)));
}

#[tokio::test]
async fn it_should_surface_provider_error_message() {
    let server = FakeTtsServer::start().await;
    server.respond_with(FakeResponse::Status(
        422,
        r#"{"detail":{"message":"voice not found"}}"#.to_string(),
    ));

    let result = repository(&server).synthesize(&request("Go!", "v")).await;

    match result {
        Err(RemoteTtsError::Api { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message.as_deref(), Some("voice not found"));
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn it_should_tolerate_unparseable_error_body() {
    let server = FakeTtsServer::start().await;
    server.respond_with(FakeResponse::Status(500, "<html>bad gateway</html>".to_string()));

    let result = repository(&server).synthesize(&request("Go!", "v")).await;

    match result {
        Err(e @ RemoteTtsError::Api { status: 500, message: None }) => {
            assert_eq!(e.to_string(), "API error (500): Unknown");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn it_should_reject_empty_audio() {
    let server = FakeTtsServer::start().await;
    server.respond_with(FakeResponse::Status(200, String::new()));

    let result = repository(&server).synthesize(&request("Go!", "v")).await;

    assert!(matches!(result, Err(RemoteTtsError::EmptyAudio)));
}
