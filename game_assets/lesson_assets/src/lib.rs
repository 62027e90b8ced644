use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

// --- Asset Definition ---

/// The top-level asset definition for one lesson of the curriculum.
#[derive(Asset, TypePath, Debug, Clone, Deserialize, Serialize)]
pub struct LessonDefinition {
    /// Unique catalog id; lesson ids are dense, starting at 1.
    pub id: u32,
    pub title: String,
    /// Ordered steps; the index is a step's identity within the lesson.
    pub steps: Vec<LessonStep>,
    /// Step index at which the code editor first becomes relevant.
    #[serde(default)]
    pub code_editor_start_step: usize,
    /// Scene objects this lesson assumes to pre-exist. Consumed by the
    /// rendering layer to seed the world; never evaluated by the engine.
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteEntity>,
    /// Text the code buffer is seeded with when the lesson starts.
    #[serde(default)]
    pub starting_code: String,
    /// Optional reward challenge summary.
    #[serde(default)]
    pub challenge: Option<ChallengeDefinition>,
}

/// One instruction/goal pair within a lesson.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LessonStep {
    pub icon: String,
    pub title: String,
    pub instruction: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub show_code_editor: bool,
    pub goal: Goal,
}

/// The condition that must hold for a step to complete.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Goal {
    /// No condition; only an explicit continue action advances.
    None,
    /// Always satisfied.
    Any,
    /// A scene event reported placing this logical entity.
    PlaceEntity { name: String },
    /// Declared color matches and declared radius meets the minimum.
    ModifyProperty {
        target: String,
        required_color: String,
        min_radius: f32,
    },
    /// Declared X position matches the target.
    ModifyPosition { target: String, target_x: f32 },
    /// Declared orbit radius and speed both match their targets.
    ModifyOrbit {
        target: String,
        target_radius: f32,
        target_speed: f32,
    },
    /// Orbit parameters match and the satellite link was reported.
    PlaceSatellite {
        parent: String,
        name: String,
        target_radius: f32,
        target_speed: f32,
    },
    /// Declared count meets the minimum and the belt radius matches.
    GenerateBelt {
        target: String,
        min_count: u32,
        target_radius: f32,
    },
    /// Declared gravity matches the target.
    ModifyGravity { target_gravity: f32 },
    /// Declared force depth component matches the requirement.
    ApplyForce { target: String, required_z: f32 },
    /// Each present target field must match its declared counterpart;
    /// absent fields are not checked.
    ModifyPhysics {
        target: String,
        #[serde(default)]
        target_friction: Option<f32>,
        #[serde(default)]
        target_mass: Option<f32>,
        #[serde(default)]
        target_restitution: Option<f32>,
    },
    /// Reported part placements must reach this count.
    BuildOutpost { required_parts: u32 },
}

/// A pre-existing scene object a lesson assumes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrerequisiteEntity {
    pub name: String,
    pub shape: ShapeKind,
    pub color: String,
    pub radius: f32,
    pub position: [f32; 3],
    #[serde(default)]
    pub orbit_radius: Option<f32>,
    #[serde(default)]
    pub orbit_speed: Option<f32>,
    #[serde(default)]
    pub parent: Option<String>,
    /// Instance count for procedurally generated groups (e.g. a belt).
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ShapeKind {
    Sphere,
    Box,
    Plane,
    Torus,
}

impl ShapeKind {
    /// Maps a declared shape token to a kind. Shape names match exactly
    /// (case-insensitive); unknown tokens resolve to `None` so callers
    /// can substitute their own fallback.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "sphere" => Some(Self::Sphere),
            "box" => Some(Self::Box),
            "plane" => Some(Self::Plane),
            "torus" => Some(Self::Torus),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere => "sphere",
            Self::Box => "box",
            Self::Plane => "plane",
            Self::Torus => "torus",
        }
    }
}

/// Per-lesson reward challenge summary. Metadata only; goal evaluation is
/// per-step and never reads challenges.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChallengeDefinition {
    pub id: String,
    pub description: String,
    pub target_count: u32,
    pub xp_reward: u32,
}

impl ChallengeDefinition {
    pub fn is_completed(&self, current_count: u32) -> bool {
        current_count >= self.target_count
    }
}

// --- Catalog ---

/// Ordered, read-only lesson collection. Built once at load time from the
/// definition assets and never mutated afterwards.
#[derive(Resource, Default, Debug)]
pub struct LessonCatalog {
    lessons: Vec<LessonDefinition>,
}

impl LessonCatalog {
    /// Sorts definitions by id and drops duplicates. Content problems are
    /// logged; the catalog keeps whatever is usable.
    pub fn from_definitions(mut lessons: Vec<LessonDefinition>) -> Self {
        lessons.sort_by_key(|lesson| lesson.id);
        let before = lessons.len();
        lessons.dedup_by_key(|lesson| lesson.id);
        if lessons.len() != before {
            warn!(dropped = before - lessons.len(), "duplicate lesson ids in catalog");
        }

        let dense = lessons
            .iter()
            .enumerate()
            .all(|(index, lesson)| lesson.id as usize == index + 1);
        if !dense && !lessons.is_empty() {
            warn!("lesson ids are not dense starting at 1; sequential unlock will skip gaps");
        }

        Self { lessons }
    }

    pub fn get(&self, id: u32) -> Option<&LessonDefinition> {
        self.lessons.iter().find(|lesson| lesson.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LessonDefinition> {
        self.lessons.iter()
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}
