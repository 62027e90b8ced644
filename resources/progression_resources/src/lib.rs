use {bevy::prelude::*, std::collections::HashSet};

/// Persisted progression ledger.
///
/// `completed_lessons` and `badges` only ever grow, each id at most once;
/// `experience` is monotonically non-decreasing. All mutation goes through
/// the methods below so those invariants hold at the type boundary.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource)]
pub struct Progression {
    pub display_name: String,
    pub experience: u32,
    pub badges: HashSet<String>,
    pub completed_lessons: HashSet<u32>,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            display_name: "Cadet".to_string(),
            experience: 0,
            badges: HashSet::new(),
            completed_lessons: HashSet::new(),
        }
    }
}

impl Progression {
    /// Saturating experience grant.
    pub fn add_xp(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }

    /// Records a completion. Returns true only when the id was not
    /// already present.
    pub fn complete_lesson(&mut self, id: u32) -> bool {
        self.completed_lessons.insert(id)
    }

    /// Records a badge. Returns true only when membership changed.
    pub fn unlock_badge(&mut self, id: &str) -> bool {
        if self.badges.contains(id) {
            return false;
        }
        self.badges.insert(id.to_string())
    }

    pub fn is_lesson_completed(&self, id: u32) -> bool {
        self.completed_lessons.contains(&id)
    }

    /// Strictly sequential unlock: the first lesson is always open, any
    /// other lesson needs its predecessor completed.
    pub fn is_lesson_unlocked(&self, id: u32) -> bool {
        match id {
            0 => false,
            1 => true,
            _ => self.completed_lessons.contains(&(id - 1)),
        }
    }

    /// One past the highest completed lesson id, capped at the catalog
    /// size.
    pub fn highest_unlocked_index(&self, catalog_len: usize) -> usize {
        let max_completed = self
            .completed_lessons
            .iter()
            .copied()
            .max()
            .unwrap_or(0) as usize;
        (max_completed + 1).min(catalog_len)
    }

    /// Highest level whose threshold the current experience meets.
    pub fn current_level(&self) -> &'static LevelInfo {
        LEVELS
            .iter()
            .rev()
            .find(|level| level.xp_required <= self.experience)
            .unwrap_or(&LEVELS[0])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelInfo {
    pub level: u32,
    pub title: &'static str,
    pub xp_required: u32,
}

/// Fixed ascending level ladder.
pub const LEVELS: &[LevelInfo] = &[
    LevelInfo { level: 1, title: "Cadet", xp_required: 0 },
    LevelInfo { level: 2, title: "Apprentice", xp_required: 100 },
    LevelInfo { level: 3, title: "Navigator", xp_required: 250 },
    LevelInfo { level: 4, title: "Engineer", xp_required: 500 },
    LevelInfo { level: 5, title: "Commander", xp_required: 900 },
    LevelInfo { level: 6, title: "Astronomer", xp_required: 1400 },
];
