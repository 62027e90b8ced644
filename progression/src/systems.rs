use {
    crate::{BadgeCatalog, LESSON_COMPLETION_XP},
    badge_assets::{BadgeDefinition, BadgeRule},
    bevy::prelude::*,
    lesson_assets::LessonCatalog,
    progression_resources::Progression,
    session_events::{BadgeUnlocked, LessonCompleted, UnlockBadgeRequest},
};

/// Observer recording a lesson completion exactly once, then cascading
/// into badge rewards: the lesson-mapped badge, and the capstone once the
/// whole catalog is complete.
pub fn on_lesson_completed(
    trigger: On<LessonCompleted>,
    mut progression: ResMut<Progression>,
    badges: Res<BadgeCatalog>,
    catalog: Res<LessonCatalog>,
    mut commands: Commands,
) {
    let lesson_id = trigger.event().lesson_id;

    if !progression.complete_lesson(lesson_id) {
        debug!(lesson_id, "lesson already recorded, no reward");
        return;
    }

    progression.add_xp(LESSON_COMPLETION_XP);
    info!(lesson_id, xp = LESSON_COMPLETION_XP, "lesson completion recorded");

    let all_done = !catalog.is_empty()
        && catalog
            .iter()
            .all(|lesson| progression.is_lesson_completed(lesson.id));

    for badge in badges.iter() {
        let earned = match badge.rule {
            BadgeRule::Lesson(id) => id == lesson_id,
            BadgeRule::AllLessons => all_done,
            BadgeRule::Manual => false,
        };
        if earned {
            grant_badge(&mut progression, badge, &mut commands);
        }
    }
}

/// Observer for explicit unlock requests (badges outside the
/// lesson-completion mapping).
pub fn on_unlock_badge_request(
    trigger: On<UnlockBadgeRequest>,
    mut progression: ResMut<Progression>,
    badges: Res<BadgeCatalog>,
    mut commands: Commands,
) {
    let badge_id = &trigger.event().0;
    let Some(badge) = badges.get(badge_id) else {
        warn!(%badge_id, "unlock request for unknown badge");
        return;
    };
    grant_badge(&mut progression, badge, &mut commands);
}

/// Grants the badge and its XP only on the insertion that changes
/// membership.
fn grant_badge(progression: &mut Progression, badge: &BadgeDefinition, commands: &mut Commands) {
    if !progression.unlock_badge(&badge.id) {
        debug!(badge_id = %badge.id, "badge already owned");
        return;
    }

    progression.add_xp(badge.xp_reward);
    info!(badge_id = %badge.id, xp = badge.xp_reward, "badge unlocked");
    commands.trigger(BadgeUnlocked {
        badge_id: badge.id.clone(),
        xp_reward: badge.xp_reward,
    });
}
