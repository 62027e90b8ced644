//! Persistence for the progression ledger.
//!
//! The ledger is written through Bevy's dynamic scene serializer whenever
//! it changes, and restored once during loading. Writes are fire-and-forget:
//! an I/O failure is logged and the in-memory state stays authoritative for
//! the session.

use {
    bevy::{ecs::entity::EntityHashMap, prelude::*, scene::serde::SceneDeserializer},
    progression_resources::Progression,
    serde::de::DeserializeSeed,
    states::GameState,
    std::{fs, path::Path},
};

const SAVE_DIR: &str = "saves";
const SAVE_FILE: &str = "saves/progress.scn.ron";

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            save_on_change.run_if(in_state(GameState::Running)),
        );
    }
}

/// Writes the ledger whenever it changed this frame.
pub fn save_on_change(
    world: &World,
    progression: Res<Progression>,
    registry: Res<AppTypeRegistry>,
) {
    if !progression.is_changed() {
        return;
    }
    write_progress(world, &registry, Path::new(SAVE_FILE));
}

fn write_progress(world: &World, registry: &AppTypeRegistry, path: &Path) {
    let scene = DynamicSceneBuilder::from_world(world)
        .allow_resource::<Progression>()
        .extract_resources()
        .build();

    let registry = registry.read();
    let serialized = match scene.serialize(&registry) {
        Ok(data) => data,
        Err(e) => {
            error!("failed to serialize progression: {e}");
            return;
        }
    };

    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir) {
            error!("failed to create {}: {e}", dir.display());
            return;
        }
    }

    match fs::write(path, serialized) {
        Ok(()) => debug!("progression saved to {}", path.display()),
        Err(e) => error!("failed to write {}: {e}", path.display()),
    }
}

/// Exclusive system that applies the saved ledger onto the world. A
/// missing file is a fresh profile; unreadable content is logged and the
/// default ledger stands.
pub fn restore_progress(world: &mut World) {
    restore_from(world, Path::new(SAVE_FILE));
}

fn restore_from(world: &mut World, path: &Path) {
    if !path.exists() {
        info!("no save file, starting a fresh profile");
        return;
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            error!("failed to read {}: {e}", path.display());
            return;
        }
    };

    let registry = world.resource::<AppTypeRegistry>().clone();
    let scene = {
        let registry = registry.read();
        let mut deserializer = match ron::de::Deserializer::from_str(&contents) {
            Ok(deserializer) => deserializer,
            Err(e) => {
                error!("save file is not valid RON: {e}");
                return;
            }
        };
        let seed = SceneDeserializer {
            type_registry: &registry,
        };
        match seed.deserialize(&mut deserializer) {
            Ok(scene) => scene,
            Err(e) => {
                error!("failed to parse save file: {e}");
                return;
            }
        }
    };

    let mut entity_map = EntityHashMap::default();
    if let Err(e) = scene.write_to_world(world, &mut entity_map) {
        error!("failed to apply save file: {e}");
        return;
    }

    info!("progression restored from {}", path.display());
}
