//! Startup pipeline: load definition assets, build the catalogs, restore
//! the saved ledger, then hand the app over to `GameState::Running`.

use {
    badge_assets::BadgeDefinition,
    bevy::{asset::LoadedFolder, prelude::*},
    lesson_assets::{LessonCatalog, LessonDefinition},
    progression::BadgeCatalog,
    states::{GameState, LoadingPhase},
};

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingStatus>()
            .init_state::<LoadingPhase>()
            // Phase: Assets - load the definition folders
            .add_systems(Startup, start_loading)
            .add_systems(
                Update,
                check_assets_loaded
                    .run_if(in_state(GameState::Loading).and(in_state(LoadingPhase::Assets))),
            )
            // Phase: BuildCatalog - assemble ordered catalogs
            .add_systems(OnEnter(LoadingPhase::BuildCatalog), build_catalogs)
            // Phase: RestoreProgress - apply the saved ledger
            .add_systems(
                OnEnter(LoadingPhase::RestoreProgress),
                (save_load::restore_progress, finish_restore).chain(),
            )
            // Phase: Ready - transition to Running
            .add_systems(OnEnter(LoadingPhase::Ready), finish_loading);
    }
}

// --- Resources ---

#[derive(Resource)]
struct LessonFolderHandle(Handle<LoadedFolder>);

#[derive(Resource)]
struct BadgeFolderHandle(Handle<LoadedFolder>);

/// Coarse progress readout for the presentation layer.
#[derive(Resource, Default)]
pub struct LoadingStatus {
    pub current_phase: String,
    pub detail: String,
}

// --- Phase: Assets ---

fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("started loading definition assets");
    commands.insert_resource(LessonFolderHandle(asset_server.load_folder("lessons")));
    commands.insert_resource(BadgeFolderHandle(asset_server.load_folder("badges")));
}

fn check_assets_loaded(
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    asset_server: Res<AssetServer>,
    lessons: Res<LessonFolderHandle>,
    badges: Res<BadgeFolderHandle>,
) {
    status.current_phase = "Loading Assets".into();
    status.detail = "Reading lesson and badge definitions...".into();

    if asset_server.is_loaded_with_dependencies(lessons.0.id())
        && asset_server.is_loaded_with_dependencies(badges.0.id())
    {
        info!("definition assets loaded");
        next_phase.set(LoadingPhase::BuildCatalog);
    }
}

// --- Phase: BuildCatalog ---

fn build_catalogs(
    lesson_assets: Res<Assets<LessonDefinition>>,
    badge_assets: Res<Assets<BadgeDefinition>>,
    mut commands: Commands,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
) {
    status.current_phase = "Building Catalogs".into();
    status.detail = "Ordering the curriculum...".into();

    let lessons: Vec<LessonDefinition> =
        lesson_assets.iter().map(|(_, def)| def.clone()).collect();
    let catalog = LessonCatalog::from_definitions(lessons);
    info!(lessons = catalog.len(), "lesson catalog built");
    commands.insert_resource(catalog);

    let badges: Vec<BadgeDefinition> =
        badge_assets.iter().map(|(_, def)| def.clone()).collect();
    let badge_catalog = BadgeCatalog::from_definitions(badges);
    info!(badges = badge_catalog.len(), "badge catalog built");
    commands.insert_resource(badge_catalog);

    next_phase.set(LoadingPhase::RestoreProgress);
}

// --- Phase: RestoreProgress ---

fn finish_restore(mut next_phase: ResMut<NextState<LoadingPhase>>) {
    next_phase.set(LoadingPhase::Ready);
}

// --- Phase: Ready ---

fn finish_loading(mut next_state: ResMut<NextState<GameState>>, mut status: ResMut<LoadingStatus>) {
    status.current_phase = "Ready".into();
    status.detail = String::new();
    info!("loading complete, transitioning to Running");
    next_state.set(GameState::Running);
}
