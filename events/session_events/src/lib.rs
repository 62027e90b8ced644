//! Observer events crossing the engine boundary.
//!
//! Inbound events come from the presentation layer (UI actions) and the
//! rendering/interaction layer (scene events). Outbound events are the
//! engine's narrow interface back to the HUD, editor, and badge views.
//! All of these are triggered via `commands.trigger` and handled by
//! observers for immediate, serialized processing.

use bevy::prelude::*;

// --- UI actions ---

/// Request to enter a lesson by catalog id.
///
/// # Observers
/// - `tutorial::systems::on_enter_lesson`: validates the id against the
///   catalog and the unlock sequence, replaces any previous session, and
///   seeds the code buffer with the lesson's starting text.
#[derive(Event, Debug)]
pub struct EnterLesson(pub u32);

/// Explicit "continue" for steps whose goal requires no condition.
#[derive(Event, Debug)]
pub struct ContinueRequest;

/// Restarts the active lesson instance at its first step and clears
/// per-lesson counters. A no-op when no lesson is active.
#[derive(Event, Debug)]
pub struct ResetLesson;

/// The user pressed run on the code editor.
#[derive(Event, Debug)]
pub struct ExecuteCode;

/// Full text of the editor buffer after an edit.
#[derive(Event, Debug)]
pub struct CodeEdited {
    pub text: String,
}

/// Switches between guided and sandbox interaction. Resets the active
/// lesson as a side effect.
#[derive(Event, Debug)]
pub struct ToggleMode;

/// Request to unlock a badge outside the lesson-completion mapping.
#[derive(Event, Debug)]
pub struct UnlockBadgeRequest(pub String);

// --- Scene events (reported by the rendering/interaction layer) ---

/// A logical entity was placed in the scene by a user gesture.
#[derive(Event, Debug)]
pub struct EntityPlaced {
    pub name: String,
}

/// An outpost part was placed.
#[derive(Event, Debug)]
pub struct PartPlaced;

/// A satellite relationship between two entities was established.
#[derive(Event, Debug)]
pub struct SatelliteLinked {
    pub parent: String,
    pub name: String,
}

// --- Engine internals ---

/// Advance signal for the active session. Carries the step index it fires
/// from so signals re-sent after the cursor has moved are discarded.
#[derive(Event, Debug)]
pub struct AdvanceStep {
    pub from_step: usize,
}

// --- Engine outputs (consumed by the presentation layer) ---

/// A lesson session started; carries the starting code so the editor view
/// can seed itself.
#[derive(Event, Debug)]
pub struct LessonStarted {
    pub lesson_id: u32,
    pub starting_code: String,
}

/// The active session moved to a new step.
#[derive(Event, Debug)]
pub struct StepAdvanced {
    pub lesson_id: u32,
    pub step_index: usize,
}

/// The active session finished its last step.
///
/// # Observers
/// - `progression::systems::on_lesson_completed`: records completion in
///   the ledger exactly once and evaluates badge rewards.
#[derive(Event, Debug)]
pub struct LessonCompleted {
    pub lesson_id: u32,
}

/// A badge entered the ledger; fired only on the insertion that actually
/// changed membership.
#[derive(Event, Debug)]
pub struct BadgeUnlocked {
    pub badge_id: String,
    pub xp_reward: u32,
}
