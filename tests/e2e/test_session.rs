use crate::e2e::helpers;

use helpers::fixtures::{full_body_plan, single_set_plan, upper_body_plan};
use helpers::{settle, wait_for_no_session, wait_for_snapshot, CoachContext};
use pretty_assertions::assert_eq;
use std::time::Duration;
use tokio::time::Instant;
use workout_coach::domain::workout::SessionState;
use workout_coach::infrastructure::device::RemoteCommand;

#[tokio::test(start_paused = true)]
async fn it_should_walk_through_plan_with_rest_countdowns() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(upper_body_plan()).unwrap();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Active).await;
    assert_eq!((s.exercise_index, s.set_number), (0, 1));
    assert!(ctx.now_playing.is_active());

    session.complete_set().unwrap();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;
    assert_eq!((s.exercise_index, s.set_number), (0, 2));
    assert_eq!(s.rest_time_remaining, 30);
    assert_eq!(s.original_rest_duration, 30);

    let rest_started = Instant::now();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Active).await;
    assert_eq!((s.exercise_index, s.set_number), (0, 2));
    assert!(rest_started.elapsed() >= Duration::from_secs(29));

    // Moving on rests for as long as the exercise just finished asks
    session.complete_set().unwrap();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;
    assert_eq!((s.exercise_index, s.set_number), (1, 1));
    assert_eq!(s.rest_time_remaining, 30);

    let s = wait_for_snapshot(session, |s| s.state == SessionState::Active).await;
    assert_eq!((s.exercise_index, s.set_number), (1, 1));

    session.complete_set().unwrap();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Completed).await;
    assert_eq!(s.total_sets_completed, 3);
    assert_eq!(s.total_sets, 3);
    assert!(s.duration_seconds >= 0);
    settle().await;

    let spoken = ctx.synthesizer.spoken_texts();
    for word in ["Three", "Two", "One"] {
        assert_eq!(spoken.iter().filter(|t| *t == word).count(), 2, "{word}");
    }
    let pulses = ctx.haptics.pulses();
    assert_eq!(pulses.iter().filter(|p| **p == "warning").count(), 2);
    assert_eq!(pulses.last(), Some(&"success"));
    assert!(!ctx.now_playing.is_active());
    assert_eq!(ctx.now_playing.clears(), 1);
    assert_eq!(ctx.tts.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn it_should_dismiss_completed_workout_after_delay() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(single_set_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Completed).await;
    let completed_at = Instant::now();

    wait_for_no_session(session).await;
    assert!(completed_at.elapsed() >= Duration::from_secs(2));
    assert!(session.snapshot().is_none());
}

#[tokio::test(start_paused = true)]
async fn it_should_record_plan_usage_on_completion() {
    let ctx = CoachContext::on_device().await;
    let plan = single_set_plan();
    ctx.plans.insert(plan.clone());

    ctx.session().start(plan.clone()).unwrap();
    ctx.session().complete_set().unwrap();
    wait_for_snapshot(ctx.session(), |s| s.state == SessionState::Completed).await;
    settle().await;

    let stored = ctx.plans.find_by_id(plan.id).unwrap();
    assert!(stored.last_used_at.is_some());
}

#[tokio::test(start_paused = true)]
async fn it_should_freeze_rest_while_paused() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(full_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.rest_time_remaining == 80).await;

    session.toggle_pause().unwrap();
    wait_for_snapshot(session, |s| s.paused).await;
    tokio::time::sleep(Duration::from_secs(30)).await;

    let s = session.snapshot().unwrap();
    assert_eq!(s.state, SessionState::Resting);
    assert_eq!(s.rest_time_remaining, 80);
    assert_eq!(ctx.now_playing.last().unwrap().title, "REST (PAUSED)");

    session.toggle_pause().unwrap();
    let s = wait_for_snapshot(session, |s| s.rest_time_remaining == 79).await;
    assert!(!s.paused);
}

#[tokio::test(start_paused = true)]
async fn it_should_extend_rest_and_raise_progress_denominator() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(upper_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;

    for _ in 0..3 {
        session.adjust_rest(15).unwrap();
    }
    let s = wait_for_snapshot(session, |s| s.original_rest_duration == 75).await;
    assert_eq!(s.rest_time_remaining, 75);

    session.adjust_rest(100).unwrap();
    let s = wait_for_snapshot(session, |s| s.rest_time_remaining == 90).await;
    assert_eq!(s.original_rest_duration, 90);

    session.adjust_rest(-500).unwrap();
    let s = wait_for_snapshot(session, |s| s.rest_time_remaining == 5).await;
    assert_eq!(s.original_rest_duration, 90);
}

#[tokio::test(start_paused = true)]
async fn it_should_jump_to_exercise_and_drop_rest() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(full_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;

    session.jump_to_exercise(2).unwrap();
    let s = wait_for_snapshot(session, |s| s.exercise_index == 2).await;
    assert_eq!(s.state, SessionState::Active);
    assert_eq!(s.set_number, 1);
    assert_eq!(s.rest_time_remaining, 0);
    assert_eq!(s.exercise_name, "Curl");

    tokio::time::sleep(Duration::from_secs(120)).await;
    let s = session.snapshot().unwrap();
    assert_eq!(s.state, SessionState::Active);
    assert_eq!(s.exercise_index, 2);
}

#[tokio::test(start_paused = true)]
async fn it_should_finish_when_last_exercise_is_marked_complete() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(full_body_plan()).unwrap();
    session.mark_exercise_complete(0).unwrap();
    let s = wait_for_snapshot(session, |s| s.exercise_index == 1).await;
    assert_eq!((s.state, s.set_number), (SessionState::Active, 1));

    session.mark_exercise_complete(2).unwrap();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Completed).await;
    assert_eq!(s.exercise_index, 2);
    assert_eq!(s.set_number, 2);
}

#[tokio::test(start_paused = true)]
async fn it_should_skip_rest_on_request() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(full_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;
    let skipped_at = Instant::now();

    session.skip_rest().unwrap();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Active).await;
    assert_eq!(s.set_number, 2);
    assert!(skipped_at.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn it_should_follow_lock_screen_controls() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(upper_body_plan()).unwrap();
    session.remote(RemoteCommand::Pause).unwrap();
    wait_for_snapshot(session, |s| s.paused).await;

    session.remote(RemoteCommand::Play).unwrap();
    wait_for_snapshot(session, |s| !s.paused).await;

    session.remote(RemoteCommand::NextTrack).unwrap();
    let s = wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;
    assert_eq!(s.set_number, 2);
}

#[tokio::test(start_paused = true)]
async fn it_should_discard_session_on_cancel() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(upper_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;

    session.cancel().unwrap();
    wait_for_no_session(session).await;
    assert!(!ctx.now_playing.is_active());
    assert_eq!(ctx.now_playing.clears(), 1);
}

#[tokio::test(start_paused = true)]
async fn it_should_replace_running_session_on_start() {
    let ctx = CoachContext::on_device().await;
    let session = ctx.session();

    session.start(upper_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;

    session.start(full_body_plan()).unwrap();
    let s = wait_for_snapshot(session, |s| s.plan_name == "Full Body").await;
    assert_eq!(s.state, SessionState::Active);

    tokio::time::sleep(Duration::from_secs(45)).await;
    let s = session.snapshot().unwrap();
    assert_eq!((s.state, s.exercise_index, s.set_number), (SessionState::Active, 0, 1));
}

#[tokio::test(start_paused = true)]
async fn it_should_keep_haptics_when_voice_is_off() {
    let ctx = CoachContext::with_settings(|s| {
        s.use_remote_tts = false;
        s.voice_enabled = false;
    })
    .await;
    let session = ctx.session();

    session.start(upper_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;
    wait_for_snapshot(session, |s| s.state == SessionState::Active).await;
    settle().await;

    assert!(ctx.synthesizer.spoken_texts().is_empty());
    assert!(ctx.player.played().is_empty());
    assert_eq!(
        ctx.haptics.pulses(),
        vec!["medium", "warning", "light", "medium", "heavy", "heavy"]
    );
}

#[tokio::test(start_paused = true)]
async fn it_should_keep_countdown_haptics_when_countdown_voice_is_off() {
    let ctx = CoachContext::with_settings(|s| {
        s.use_remote_tts = false;
        s.voice_countdown_enabled = false;
    })
    .await;
    let session = ctx.session();

    session.start(upper_body_plan()).unwrap();
    session.complete_set().unwrap();
    wait_for_snapshot(session, |s| s.state == SessionState::Resting).await;
    wait_for_snapshot(session, |s| s.state == SessionState::Active).await;
    settle().await;

    let spoken = ctx.synthesizer.spoken_texts();
    assert!(!spoken.iter().any(|t| t == "Three" || t == "Two" || t == "One"));
    // Rest-ended line is still spoken
    assert!(!spoken.is_empty());
    assert!(ctx.haptics.pulses().ends_with(&["light", "medium", "heavy", "heavy"]));
}
