use {
    bevy::prelude::*,
    loading::LoadingManagerPlugin,
    progression::ProgressionPlugin,
    save_load::SaveLoadPlugin,
    states::GameState,
    tutorial::TutorialPlugin,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>().add_plugins((
            TutorialPlugin,
            ProgressionPlugin,
            SaveLoadPlugin,
            LoadingManagerPlugin,
        ));
    }
}
