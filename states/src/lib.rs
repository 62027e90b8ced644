use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Loading,
    Running,
}

/// How the user is currently interacting with the world. Toggling modes
/// restarts the active lesson instance.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    #[default]
    Guided,
    Sandbox,
}

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadingPhase {
    #[default]
    Assets,          // Lesson and badge definition folders
    BuildCatalog,    // Assemble ordered catalogs from loaded definitions
    RestoreProgress, // Apply the saved progression ledger, if any
    Ready,           // All done
}
