//! Progression ledger operations: lesson completion, badge unlocks, and
//! experience rewards. Every mutation is idempotent; replaying a
//! completion or unlock never grants a second reward.

pub mod systems;

use {
    badge_assets::BadgeDefinition,
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    progression_resources::Progression,
};

/// Experience granted for completing any lesson, before badge rewards.
pub const LESSON_COMPLETION_XP: u32 = 50;

/// Read-only badge collection built at load time.
#[derive(Resource, Default, Debug)]
pub struct BadgeCatalog {
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    /// Keeps the first definition per id; duplicates are logged.
    pub fn from_definitions(badges: Vec<BadgeDefinition>) -> Self {
        let mut unique: Vec<BadgeDefinition> = Vec::with_capacity(badges.len());
        for badge in badges {
            if unique.iter().any(|existing| existing.id == badge.id) {
                warn!(badge_id = %badge.id, "duplicate badge id in catalog");
                continue;
            }
            unique.push(badge);
        }
        Self { badges: unique }
    }

    pub fn get(&self, id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|badge| badge.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter()
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }
}

pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app
            // Asset loading
            .add_plugins(RonAssetPlugin::<BadgeDefinition>::new(&["badge.ron"]))
            // Resources
            .init_resource::<Progression>()
            .init_resource::<BadgeCatalog>()
            // Registration for scene-based persistence
            .register_type::<Progression>()
            // Ledger observers
            .add_observer(systems::on_lesson_completed)
            .add_observer(systems::on_unlock_badge_request);
    }
}
