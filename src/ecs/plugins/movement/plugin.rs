use bevy::prelude::*;

use crate::ecs::plugins::movement::systems::*;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                consume_movement_input_system,
                acceleration_friction_system,
                movement_system,
                boundary_system,
                stance_tick_system,
            )
                .chain(),
        );
    }
}
