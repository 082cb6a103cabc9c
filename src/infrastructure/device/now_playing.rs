use serde::{Deserialize, Serialize};

use crate::domain::workout::{SessionState, WorkoutSession};

const ALBUM_TITLE: &str = "GymBuddy Workout";

/// What the lock-screen transport shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NowPlayingInfo {
    pub title: String,
    pub subtitle: String,
    pub album: String,
    /// Elapsed fraction of the current unit (rest countdown or workout)
    pub progress: f64,
    /// 0.0 while paused, 1.0 while running
    pub playback_rate: f64,
}

impl NowPlayingInfo {
    /// "EXERCISE / SET X OF Y" while working, "REST / 0:45 - Next: ..." while resting
    pub fn for_session(session: &WorkoutSession) -> Option<Self> {
        let exercise = session.current_exercise()?;
        let playback_rate = if session.paused { 0.0 } else { 1.0 };

        let info = match session.state {
            SessionState::Resting => {
                let elapsed = session
                    .original_rest_duration
                    .saturating_sub(session.rest_time_remaining);
                let progress = if session.original_rest_duration == 0 {
                    1.0
                } else {
                    f64::from(elapsed) / f64::from(session.original_rest_duration)
                };
                Self {
                    title: if session.paused {
                        "REST (PAUSED)".to_string()
                    } else {
                        "REST".to_string()
                    },
                    subtitle: format!(
                        "{} - Next: {}",
                        format_time(session.rest_time_remaining),
                        exercise.name
                    ),
                    album: ALBUM_TITLE.to_string(),
                    progress,
                    playback_rate,
                }
            }
            SessionState::Active | SessionState::Completed => {
                let total = session.total_sets();
                let progress = if total == 0 {
                    0.0
                } else {
                    f64::from(session.total_sets_completed()) / f64::from(total)
                };
                Self {
                    title: exercise.name.to_uppercase(),
                    subtitle: format!("SET {} OF {}", session.current_set_number, exercise.sets),
                    album: ALBUM_TITLE.to_string(),
                    progress,
                    playback_rate,
                }
            }
        };
        Some(info)
    }
}

/// Commands arriving from the lock screen or headset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteCommand {
    Play,
    Pause,
    TogglePlayPause,
    NextTrack,
}

/// Lock-screen / media transport surface
pub trait NowPlayingSink: Send + Sync {
    /// Start receiving remote-control events
    fn activate(&self);
    fn update(&self, info: NowPlayingInfo);
    fn clear(&self);
    /// Stop receiving remote-control events
    fn deactivate(&self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNowPlaying;

impl NowPlayingSink for TracingNowPlaying {
    fn activate(&self) {
        tracing::debug!("Now playing activated");
    }

    fn update(&self, info: NowPlayingInfo) {
        tracing::trace!(
            title = %info.title,
            subtitle = %info.subtitle,
            progress = info.progress,
            "Now playing updated"
        );
    }

    fn clear(&self) {
        tracing::debug!("Now playing cleared");
    }

    fn deactivate(&self) {
        tracing::debug!("Now playing deactivated");
    }
}

/// "1:05" above a minute, "45s" below
pub fn format_time(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    if mins > 0 {
        format!("{}:{:02}", mins, secs)
    } else {
        format!("{}s", secs)
    }
}
