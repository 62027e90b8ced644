use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// The asset definition for an unlockable badge.
#[derive(Asset, TypePath, Debug, Clone, Deserialize, Serialize)]
pub struct BadgeDefinition {
    /// Unique key for this badge (e.g. "first_steps").
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Experience granted the first time the badge is unlocked.
    pub xp_reward: u32,
    #[serde(default)]
    pub rule: BadgeRule,
}

/// When a badge is awarded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum BadgeRule {
    /// Awarded when the named lesson completes.
    Lesson(u32),
    /// Awarded once every catalog lesson is complete.
    AllLessons,
    /// Only awarded through an explicit unlock request.
    #[default]
    Manual,
}
