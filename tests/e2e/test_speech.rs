use crate::e2e::helpers;

use futures::future::join_all;
use helpers::fake_tts::{fake_audio, FakeResponse};
use helpers::fixtures::upper_body_plan;
use helpers::{CoachContext, SpeechContext, TEST_API_KEY};
use pretty_assertions::assert_eq;
use std::time::Duration;
use workout_coach::domain::settings::DEFAULT_REMOTE_VOICE_ID;
use workout_coach::domain::speech::{SpeechOutcome, SpeechServiceApi, COACH_SPEECH_RATE};
use workout_coach::infrastructure::repositories::AudioCacheRepository;

#[tokio::test]
async fn it_should_cache_generated_audio_and_skip_network_on_repeat() {
    let ctx = SpeechContext::new().await;
    let text = "Rest is over. Let's go!";

    let ticket = ctx.speech.begin();
    let first = ctx.speech.speak(ctx.request(text), ticket).await;
    let ticket = ctx.speech.begin();
    let second = ctx.speech.speak(ctx.request(text), ticket).await;

    assert_eq!(first, SpeechOutcome::PlayedRemote);
    assert_eq!(second, SpeechOutcome::PlayedCached);
    assert_eq!(ctx.tts.calls(), 1);
    assert_eq!(ctx.player.played(), vec![fake_audio(text), fake_audio(text)]);

    let file = ctx
        .cache_dir
        .path()
        .join(format!("{}.mp3", AudioCacheRepository::cache_key(text)));
    assert_eq!(tokio::fs::read(file).await.unwrap(), fake_audio(text));
}

#[tokio::test]
async fn it_should_serve_cached_audio_to_a_fresh_process() {
    let ctx = SpeechContext::new().await;
    let text = "Workout complete! Outstanding effort today.";
    AudioCacheRepository::new(ctx.cache_dir.path())
        .store(text, b"previously generated")
        .await
        .unwrap();

    let ticket = ctx.speech.begin();
    let outcome = ctx.speech.speak(ctx.request(text), ticket).await;

    assert_eq!(outcome, SpeechOutcome::PlayedCached);
    assert_eq!(ctx.tts.calls(), 0);
    assert_eq!(ctx.player.played(), vec![b"previously generated".to_vec()]);
}

#[tokio::test]
async fn it_should_fall_back_to_device_voice_on_backend_errors() {
    for (status, body) in [
        (401, r#"{"detail":{"message":"Invalid API key"}}"#),
        (429, r#"{"detail":{"message":"Quota exceeded"}}"#),
        (500, "<html>oops</html>"),
    ] {
        let ctx = SpeechContext::new().await;
        ctx.tts
            .respond_with(FakeResponse::Status(status, body.to_string()));

        let ticket = ctx.speech.begin();
        let outcome = ctx.speech.speak(ctx.request("Time's up."), ticket).await;

        assert_eq!(outcome, SpeechOutcome::SpokeLocally, "status {status}");
        assert!(ctx.player.played().is_empty());
        let utterance = ctx.synthesizer.last().unwrap();
        assert_eq!(utterance.text, "Time's up.");
        assert_eq!(utterance.rate, COACH_SPEECH_RATE);
        // Failures are never cached
        let cache = AudioCacheRepository::new(ctx.cache_dir.path());
        assert_eq!(cache.file_count().await, 0);
    }
}

#[tokio::test]
async fn it_should_fall_back_to_device_voice_when_backend_is_unreachable() {
    let ctx = SpeechContext::unreachable().await;

    let ticket = ctx.speech.begin();
    let outcome = ctx.speech.speak(ctx.request("Break's over."), ticket).await;

    assert_eq!(outcome, SpeechOutcome::SpokeLocally);
    assert_eq!(ctx.synthesizer.spoken_texts(), vec!["Break's over.".to_string()]);
}

#[tokio::test]
async fn it_should_skip_network_without_api_key() {
    let ctx = SpeechContext::new().await;
    let mut request = ctx.request("Paused.");
    request.api_key = None;

    let ticket = ctx.speech.begin();
    let outcome = ctx.speech.speak(request, ticket).await;

    assert_eq!(outcome, SpeechOutcome::SpokeLocally);
    assert_eq!(ctx.tts.calls(), 0);
}

#[tokio::test]
async fn it_should_play_cached_audio_even_without_api_key() {
    let ctx = SpeechContext::new().await;
    let ticket = ctx.speech.begin();
    ctx.speech.speak(ctx.request("Two"), ticket).await;

    let mut request = ctx.request("Two");
    request.api_key = None;
    let ticket = ctx.speech.begin();
    let outcome = ctx.speech.speak(request, ticket).await;

    assert_eq!(outcome, SpeechOutcome::PlayedCached);
    assert_eq!(ctx.tts.calls(), 1);
}

#[tokio::test]
async fn it_should_coalesce_concurrent_requests_for_same_text() {
    let ctx = SpeechContext::new().await;
    ctx.tts.set_latency(Duration::from_millis(200));

    let requests = (0..5).map(|_| {
        let ticket = ctx.speech.begin();
        ctx.speech.speak(ctx.request("Let's get back at it!"), ticket)
    });
    let outcomes = join_all(requests).await;

    assert_eq!(ctx.tts.calls(), 1);
    // Only the newest announcement reaches the speaker
    assert_eq!(ctx.player.played().len(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|o| **o == SpeechOutcome::Superseded)
            .count(),
        4
    );
}

#[tokio::test]
async fn it_should_stop_current_audio_before_new_speech() {
    let ctx = SpeechContext::new().await;

    ctx.speech.begin();
    ctx.speech.begin();

    assert_eq!(ctx.player.stops(), 2);
}

#[tokio::test]
async fn it_should_announce_workout_start_with_remote_voice() {
    let ctx = CoachContext::with_settings(|_| {}).await;

    ctx.session().start(upper_body_plan()).unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        while ctx.player.played().is_empty() {
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("Workout start was never played");

    let request = ctx.tts.last_request().unwrap();
    assert_eq!(request.voice_id, DEFAULT_REMOTE_VOICE_ID);
    assert_eq!(request.api_key.as_deref(), Some(TEST_API_KEY));
    let text = request.body["text"].as_str().unwrap().to_string();
    assert!(text.contains("Bench Press"), "{text}");
    assert_eq!(ctx.player.played(), vec![fake_audio(&text)]);
    assert_eq!(ctx.coach.audio_cache().file_count().await, 1);

    // A new voice makes every cached clip stale
    let removed = ctx.coach.on_voice_changed().await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(ctx.coach.audio_cache().file_count().await, 0);
}
