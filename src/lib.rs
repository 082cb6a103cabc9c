//! Workout session engine: walks a person through a plan's exercises and sets,
//! runs rest countdowns, and speaks coaching cues through a remote TTS backend
//! with an on-device fallback.
//!
//! Hosts build a [`app::WorkoutCoach`] once, then drive it through the
//! [`domain::workout::SessionHandle`] it exposes.

pub mod app;
pub mod domain;
pub mod error;
pub mod infrastructure;
