//! Per-lesson tutorial state machine and goal evaluation.
//!
//! A lesson session is an entity carrying `session_components`; observers
//! react to UI actions and scene events, evaluate the active step's goal,
//! and advance the step cursor. Advancement is edge-triggered: a
//! satisfied-goal signal re-sent after the cursor has moved is dropped.

pub mod evaluator;
pub mod systems;


use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    lesson_assets::LessonDefinition,
    states::SessionMode,
};

pub use lesson_assets::LessonCatalog;

/// Latest text of the user-edited code buffer. Seeded from the lesson's
/// declared starting code and updated on every edit.
#[derive(Resource, Default, Debug, Clone)]
pub struct CodeBuffer {
    pub text: String,
}

pub struct TutorialPlugin;

impl Plugin for TutorialPlugin {
    fn build(&self, app: &mut App) {
        app
            // Asset loading
            .add_plugins(RonAssetPlugin::<LessonDefinition>::new(&["lesson.ron"]))
            // Resources
            .init_resource::<LessonCatalog>()
            .init_resource::<CodeBuffer>()
            .init_state::<SessionMode>()
            // Observers for UI actions
            .add_observer(systems::on_enter_lesson)
            .add_observer(systems::on_reset_lesson)
            .add_observer(systems::on_toggle_mode)
            .add_observer(systems::on_code_edited)
            .add_observer(systems::on_execute_code)
            .add_observer(systems::on_continue)
            // Observers for scene events
            .add_observer(systems::on_entity_placed)
            .add_observer(systems::on_satellite_linked)
            .add_observer(systems::on_part_placed)
            // Step advancement
            .add_observer(systems::on_advance_step);
    }
}
