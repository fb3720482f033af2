use bevy::prelude::*;

use crate::ecs::plugins::input::components::{
    ActionTriggerEvent, InputSettingsRes, RawClientInputEvent,
};
use crate::ecs::plugins::input::systems::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RawClientInputEvent>()
            .add_event::<ActionTriggerEvent>()
            .init_resource::<InputSettingsRes>()
            .add_systems(
                Update,
                (route_raw_input_system, dispatch_action_events_system)
                    .chain()
                    .after(crate::ecs::plugins::player::systems::player_spawn_system),
            );
    }
}
