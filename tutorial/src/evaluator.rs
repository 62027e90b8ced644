//! Pure goal predicates.
//!
//! Evaluation is pure and idempotent, so callers may re-evaluate on every
//! keystroke. Numeric targets are compared with a small tolerance because
//! they come from user-typed decimal text (`0.80` must match `0.8`);
//! color and shape names compare as exact strings.

use {
    bevy::math::Vec3,
    codeparse::{Declarations, FALLBACK_COLOR},
    lesson_assets::Goal,
};

/// Tolerance for comparing user-typed numbers against lesson targets.
pub const EPSILON: f32 = 1e-3;

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// Everything a goal may be judged against: the parsed code buffer,
/// scene events reported for the current signal, and the per-lesson part
/// counter.
#[derive(Default)]
pub struct EvalContext<'a> {
    pub decls: Option<&'a Declarations>,
    pub placed_entity: Option<&'a str>,
    /// `(parent, name)` of a reported satellite link.
    pub satellite_link: Option<(&'a str, &'a str)>,
    pub parts_placed: u32,
}

impl<'a> EvalContext<'a> {
    pub fn from_code(decls: &'a Declarations) -> Self {
        Self {
            decls: Some(decls),
            ..Self::default()
        }
    }
}

/// Whether the goal is satisfied in the given context.
pub fn evaluate(goal: &Goal, ctx: &EvalContext) -> bool {
    match goal {
        Goal::None => false,
        Goal::Any => true,
        Goal::PlaceEntity { name } => ctx.placed_entity.is_some_and(|placed| placed == name),
        Goal::ModifyProperty {
            required_color,
            min_radius,
            ..
        } => {
            let color = ctx
                .decls
                .map(|decls| decls.color("color", FALLBACK_COLOR))
                .unwrap_or(FALLBACK_COLOR);
            color.name == required_color.as_str() && float_of(ctx, "radius") >= *min_radius
        }
        Goal::ModifyPosition { target_x, .. } => approx_eq(float_of(ctx, "position"), *target_x),
        Goal::ModifyOrbit {
            target_radius,
            target_speed,
            ..
        } => orbit_matches(ctx, *target_radius, *target_speed),
        Goal::PlaceSatellite {
            parent,
            name,
            target_radius,
            target_speed,
        } => {
            ctx.satellite_link
                .is_some_and(|(link_parent, link_name)| link_parent == parent && link_name == name)
                && orbit_matches(ctx, *target_radius, *target_speed)
        }
        Goal::GenerateBelt {
            min_count,
            target_radius,
            ..
        } => {
            let count = ctx
                .decls
                .map(|decls| decls.count("count", 0))
                .unwrap_or(0);
            count >= *min_count && approx_eq(float_of(ctx, "orbitRadius"), *target_radius)
        }
        Goal::ModifyGravity { target_gravity } => {
            approx_eq(float_of(ctx, "gravity"), *target_gravity)
        }
        Goal::ApplyForce { required_z, .. } => {
            let force = ctx
                .decls
                .map(|decls| decls.force("force", Vec3::NAN))
                .unwrap_or(Vec3::NAN);
            approx_eq(force.z, *required_z)
        }
        Goal::ModifyPhysics {
            target_friction,
            target_mass,
            target_restitution,
            ..
        } => {
            // Absent target fields are vacuously satisfied.
            let holds = |target: &Option<f32>, name: &str| match target {
                Some(value) => approx_eq(float_of(ctx, name), *value),
                None => true,
            };
            holds(target_friction, "friction")
                && holds(target_mass, "mass")
                && holds(target_restitution, "restitution")
        }
        Goal::BuildOutpost { required_parts } => ctx.parts_placed >= *required_parts,
    }
}

fn orbit_matches(ctx: &EvalContext, target_radius: f32, target_speed: f32) -> bool {
    approx_eq(float_of(ctx, "orbitRadius"), target_radius)
        && approx_eq(float_of(ctx, "orbitSpeed"), target_speed)
}

/// Missing declarations extract as NaN, which can never match a target.
fn float_of(ctx: &EvalContext, name: &str) -> f32 {
    ctx.decls
        .map(|decls| decls.float(name, f32::NAN))
        .unwrap_or(f32::NAN)
}
