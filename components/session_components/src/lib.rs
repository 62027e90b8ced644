//! Per-session tutorial state, encoded as components on a session entity.
//!
//! The step state machine reads as: no session entity means no lesson is
//! active, a session entity with a `StepCursor` is on that step, and the
//! `Completed` marker is the terminal state for the instance.

use bevy::prelude::*;

/// The lesson instance the user is currently playing.
#[derive(Component, Debug)]
pub struct LessonSession {
    pub lesson_id: u32,
}

/// Index of the active step within the lesson. Parks one past the last
/// step once the lesson completes.
#[derive(Component, Default, Debug)]
pub struct StepCursor(pub usize);

/// Running count of reported outpost parts for this lesson instance.
#[derive(Component, Default, Debug)]
pub struct PartsPlaced(pub u32);

/// Terminal state for a lesson instance. Leaving and re-entering the
/// lesson starts a fresh instance without this marker.
#[derive(Component, Debug)]
pub struct Completed;
