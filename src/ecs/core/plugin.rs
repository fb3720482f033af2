use bevy::prelude::*;

use crate::ecs::core::GameConfig;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>();
    }
}
