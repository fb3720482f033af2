use bevy::prelude::*;

use crate::ecs::plugins::debug::systems::*;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugTimer>()
            .add_systems(Update, debug_status_system);
    }
}
