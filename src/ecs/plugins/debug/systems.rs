use bevy::prelude::*;

use crate::ecs::core::Position;
use crate::ecs::plugins::abilities::components::AbilityComponent;
use crate::ecs::plugins::input::components::InputStack;
use crate::ecs::plugins::movement::components::Velocity;
use crate::ecs::plugins::player::components::Player;

const DEBUG_PRINT_INTERVAL: f32 = 1.0;

#[derive(Resource, Default)]
pub struct DebugTimer {
    last_print_time: f32,
}

/// Periodically dumps the avatar state: position, velocity, active ability
/// and input-buffer depth. Development aid only.
pub fn debug_status_system(
    query: Query<(&Player, &Position, &Velocity, &InputStack, &AbilityComponent)>,
    time: Res<Time>,
    mut debug_timer: ResMut<DebugTimer>,
) {
    let current_time = time.elapsed_secs();
    if current_time - debug_timer.last_print_time < DEBUG_PRINT_INTERVAL {
        return;
    }
    debug_timer.last_print_time = current_time;

    let player_count = query.iter().count();
    if player_count == 0 {
        return;
    }

    info!(players = player_count, "server status");
    for (player, position, velocity, stack, abilities) in query.iter() {
        info!(
            player = player.id,
            x = position.x,
            y = position.y,
            vx = velocity.x,
            vy = velocity.y,
            setups = stack.manager.setup_count(),
            buffered = stack.manager.buffered_commands(),
            buffer_open = stack.manager.is_buffer_open(),
            active_ability = abilities.active().map(|active| active.tag.as_str()),
            "avatar"
        );
    }
}
