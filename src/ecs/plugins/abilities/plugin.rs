use bevy::prelude::*;

use crate::ecs::plugins::abilities::systems::*;

pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (ability_tick_system, ability_buffer_window_system).chain(),
        )
        // Also react right after dispatch, so an ability activated this frame
        // opens the window before the next trigger event lands.
        .add_systems(
            Update,
            ability_buffer_window_system
                .after(crate::ecs::plugins::input::systems::dispatch_action_events_system),
        );
    }
}
