use {
    crate::{evaluator, CodeBuffer, LessonCatalog},
    bevy::prelude::*,
    codeparse::Declarations,
    lesson_assets::Goal,
    progression_resources::Progression,
    session_components::{Completed, LessonSession, PartsPlaced, StepCursor},
    session_events::*,
    states::SessionMode,
};

/// Goal of the step the session cursor currently sits on.
fn current_goal<'a>(
    catalog: &'a LessonCatalog,
    session: &LessonSession,
    cursor: &StepCursor,
) -> Option<&'a Goal> {
    catalog
        .get(session.lesson_id)
        .and_then(|lesson| lesson.steps.get(cursor.0))
        .map(|step| &step.goal)
}

/// Observer for entering a lesson. Replaces any previous session with a
/// fresh instance at step 0 and seeds the code buffer.
pub fn on_enter_lesson(
    trigger: On<EnterLesson>,
    catalog: Res<LessonCatalog>,
    progression: Res<Progression>,
    existing: Query<Entity, With<LessonSession>>,
    mut code: ResMut<CodeBuffer>,
    mut commands: Commands,
) {
    let lesson_id = trigger.event().0;

    let Some(lesson) = catalog.get(lesson_id) else {
        warn!(lesson_id, "EnterLesson for unknown lesson id");
        return;
    };

    if !progression.is_lesson_unlocked(lesson_id) {
        warn!(lesson_id, "EnterLesson for locked lesson ignored");
        return;
    }

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    code.text = lesson.starting_code.clone();

    commands.spawn((
        LessonSession { lesson_id },
        StepCursor::default(),
        PartsPlaced::default(),
    ));

    info!(lesson_id, title = %lesson.title, "lesson started");
    commands.trigger(LessonStarted {
        lesson_id,
        starting_code: lesson.starting_code.clone(),
    });
}

/// Observer that restarts the active lesson instance: cursor back to the
/// first step, per-lesson counters cleared, code buffer re-seeded. The
/// progression ledger is untouched.
pub fn on_reset_lesson(
    _trigger: On<ResetLesson>,
    catalog: Res<LessonCatalog>,
    mut sessions: Query<(Entity, &LessonSession, &mut StepCursor, &mut PartsPlaced)>,
    mut code: ResMut<CodeBuffer>,
    mut commands: Commands,
) {
    let Ok((entity, session, mut cursor, mut parts)) = sessions.single_mut() else {
        debug!("ResetLesson with no active session");
        return;
    };

    cursor.0 = 0;
    parts.0 = 0;
    commands.entity(entity).remove::<Completed>();

    if let Some(lesson) = catalog.get(session.lesson_id) {
        code.text = lesson.starting_code.clone();
    }

    info!(lesson_id = session.lesson_id, "lesson reset to first step");
}

/// Observer that flips the interaction mode. Switching modes restarts the
/// active lesson.
pub fn on_toggle_mode(
    _trigger: On<ToggleMode>,
    mode: Res<State<SessionMode>>,
    mut next: ResMut<NextState<SessionMode>>,
    mut commands: Commands,
) {
    let flipped = match mode.get() {
        SessionMode::Guided => SessionMode::Sandbox,
        SessionMode::Sandbox => SessionMode::Guided,
    };
    info!(?flipped, "session mode toggled");
    next.set(flipped);
    commands.trigger(ResetLesson);
}

/// Observer keeping the code buffer current with the editor.
pub fn on_code_edited(trigger: On<CodeEdited>, mut code: ResMut<CodeBuffer>) {
    code.text = trigger.event().text.clone();
}

/// Observer for the editor's run action: evaluates the active step's goal
/// against the parsed buffer.
pub fn on_execute_code(
    _trigger: On<ExecuteCode>,
    catalog: Res<LessonCatalog>,
    code: Res<CodeBuffer>,
    sessions: Query<(&LessonSession, &StepCursor), Without<Completed>>,
    mut commands: Commands,
) {
    let Ok((session, cursor)) = sessions.single() else {
        debug!("ExecuteCode with no active session");
        return;
    };
    let Some(goal) = current_goal(&catalog, session, cursor) else {
        return;
    };

    let decls = Declarations::parse(&code.text);
    if evaluator::evaluate(goal, &evaluator::EvalContext::from_code(&decls)) {
        commands.trigger(AdvanceStep { from_step: cursor.0 });
    } else {
        debug!(step = cursor.0, "goal not met by current code");
    }
}

/// Observer for the explicit continue action. Advances condition-free
/// steps; anything else waits for its goal.
pub fn on_continue(
    _trigger: On<ContinueRequest>,
    catalog: Res<LessonCatalog>,
    sessions: Query<(&LessonSession, &StepCursor), Without<Completed>>,
    mut commands: Commands,
) {
    let Ok((session, cursor)) = sessions.single() else {
        debug!("ContinueRequest with no active session");
        return;
    };
    let Some(goal) = current_goal(&catalog, session, cursor) else {
        return;
    };

    let advances = matches!(goal, Goal::None)
        || evaluator::evaluate(goal, &evaluator::EvalContext::default());
    if advances {
        commands.trigger(AdvanceStep { from_step: cursor.0 });
    } else {
        debug!(step = cursor.0, "continue ignored, step has an unmet goal");
    }
}

/// Observer for placement gestures reported by the scene layer.
pub fn on_entity_placed(
    trigger: On<EntityPlaced>,
    catalog: Res<LessonCatalog>,
    sessions: Query<(&LessonSession, &StepCursor), Without<Completed>>,
    mut commands: Commands,
) {
    let Ok((session, cursor)) = sessions.single() else {
        return;
    };
    let Some(goal) = current_goal(&catalog, session, cursor) else {
        return;
    };

    let ctx = evaluator::EvalContext {
        placed_entity: Some(trigger.event().name.as_str()),
        ..Default::default()
    };
    if evaluator::evaluate(goal, &ctx) {
        commands.trigger(AdvanceStep { from_step: cursor.0 });
    }
}

/// Observer for reported satellite links. The link must match the goal
/// and the code buffer must declare the target orbit.
pub fn on_satellite_linked(
    trigger: On<SatelliteLinked>,
    catalog: Res<LessonCatalog>,
    code: Res<CodeBuffer>,
    sessions: Query<(&LessonSession, &StepCursor), Without<Completed>>,
    mut commands: Commands,
) {
    let Ok((session, cursor)) = sessions.single() else {
        return;
    };
    let Some(goal) = current_goal(&catalog, session, cursor) else {
        return;
    };

    let event = trigger.event();
    let decls = Declarations::parse(&code.text);
    let ctx = evaluator::EvalContext {
        decls: Some(&decls),
        satellite_link: Some((event.parent.as_str(), event.name.as_str())),
        ..Default::default()
    };
    if evaluator::evaluate(goal, &ctx) {
        commands.trigger(AdvanceStep { from_step: cursor.0 });
    }
}

/// Observer counting outpost parts for the active session.
pub fn on_part_placed(
    _trigger: On<PartPlaced>,
    catalog: Res<LessonCatalog>,
    mut sessions: Query<(&LessonSession, &StepCursor, &mut PartsPlaced), Without<Completed>>,
    mut commands: Commands,
) {
    let Ok((session, cursor, mut parts)) = sessions.single_mut() else {
        return;
    };

    parts.0 += 1;

    let Some(goal) = current_goal(&catalog, session, cursor) else {
        return;
    };
    let ctx = evaluator::EvalContext {
        parts_placed: parts.0,
        ..Default::default()
    };
    if matches!(goal, Goal::BuildOutpost { .. }) {
        debug!(parts = parts.0, "outpost part placed");
        if evaluator::evaluate(goal, &ctx) {
            commands.trigger(AdvanceStep { from_step: cursor.0 });
        }
    }
}

/// Observer moving the step cursor. Signals whose `from_step` no longer
/// matches the cursor are stale re-sends and are dropped, which keeps
/// advancement edge-triggered.
pub fn on_advance_step(
    trigger: On<AdvanceStep>,
    catalog: Res<LessonCatalog>,
    mut sessions: Query<(Entity, &LessonSession, &mut StepCursor), Without<Completed>>,
    mut commands: Commands,
) {
    let Ok((entity, session, mut cursor)) = sessions.single_mut() else {
        debug!("advance signal with no active session");
        return;
    };

    let signal_step = trigger.event().from_step;
    if signal_step != cursor.0 {
        debug!(signal_step, cursor = cursor.0, "stale advance signal dropped");
        return;
    }

    let Some(lesson) = catalog.get(session.lesson_id) else {
        return;
    };

    let next = cursor.0 + 1;
    cursor.0 = next;
    if next >= lesson.steps.len() {
        commands.entity(entity).insert(Completed);
        info!(lesson_id = session.lesson_id, "lesson completed");
        commands.trigger(LessonCompleted {
            lesson_id: session.lesson_id,
        });
    } else {
        debug!(lesson_id = session.lesson_id, step = next, "step advanced");
        commands.trigger(StepAdvanced {
            lesson_id: session.lesson_id,
            step_index: next,
        });
    }
}
