use {
    bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*},
    engine_core::CorePlugin,
    std::time::Duration,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(LogPlugin {
                filter: "warn,loading=info,\
                    tutorial=debug,\
                    progression=debug,\
                    save_load=info"
                    .into(),
                level: bevy::log::Level::DEBUG,
                ..Default::default()
            }),
        )
        // Headless: the rendering layer is an external collaborator.
        .add_plugins(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .add_plugins(CorePlugin)
        .run();
}
