use bevy::prelude::*;

use crate::ecs::core::{GameConfig, Position};
use crate::ecs::plugins::input::components::SwitchBoard;
use crate::ecs::plugins::movement::components::*;
use crate::ecs::plugins::player::components::{switches, CharacterProfile};

const MIN_VELOCITY_THRESHOLD: f32 = 0.01;
const WALK_SPEED_SCALE: f32 = 0.4;

/// Turns the accumulated movement input into a target velocity, honoring the
/// crouch and walk speed scales, then clears the accumulator for the next
/// tick.
pub fn consume_movement_input_system(
    mut query: Query<(
        &mut MovementInput,
        &mut DesiredVelocity,
        &CharacterProfile,
        &CharacterStance,
        &SwitchBoard,
    )>,
) {
    for (mut input, mut desired, profile, stance, switch_board) in query.iter_mut() {
        let direction = input.consume();
        let mut max_speed = profile.max_speed;
        if stance.crouched {
            max_speed *= profile.crouch_speed_scale;
        }
        if switch_board.get(&switches::WALK) {
            max_speed *= WALK_SPEED_SCALE;
        }

        desired.x = direction.x * max_speed;
        desired.y = direction.y * max_speed;
    }
}

pub fn acceleration_friction_system(
    time: Res<Time>,
    mut query: Query<(&mut Velocity, &DesiredVelocity, &CharacterProfile, &Friction)>,
) {
    let dt = time.delta_secs();

    for (mut velocity, desired, profile, friction) in query.iter_mut() {
        let is_trying_to_move =
            desired.x.abs() > MIN_VELOCITY_THRESHOLD || desired.y.abs() > MIN_VELOCITY_THRESHOLD;
        let current_speed = velocity.x.abs() + velocity.y.abs();

        if !is_trying_to_move && current_speed < MIN_VELOCITY_THRESHOLD {
            continue;
        }

        if is_trying_to_move {
            let lerp_factor = (profile.acceleration * dt).min(1.0);
            velocity.x += (desired.x - velocity.x) * lerp_factor;
            velocity.y += (desired.y - velocity.y) * lerp_factor;
        } else {
            let friction_factor = 1.0 - (friction.coefficient * dt).min(1.0);
            velocity.x *= friction_factor;
            velocity.y *= friction_factor;

            if velocity.x.abs() < MIN_VELOCITY_THRESHOLD {
                velocity.x = 0.0;
            }
            if velocity.y.abs() < MIN_VELOCITY_THRESHOLD {
                velocity.y = 0.0;
            }
        }
    }
}

pub fn movement_system(time: Res<Time>, mut query: Query<(&mut Position, &Velocity)>) {
    let dt = time.delta_secs();

    for (mut position, velocity) in query.iter_mut() {
        if velocity.x.abs() < MIN_VELOCITY_THRESHOLD && velocity.y.abs() < MIN_VELOCITY_THRESHOLD {
            continue;
        }

        position.x += velocity.x * dt;
        position.y += velocity.y * dt;
    }
}

pub fn boundary_system(
    mut query: Query<(&mut Position, &mut Velocity), Changed<Position>>,
    config: Res<GameConfig>,
) {
    for (mut position, mut velocity) in query.iter_mut() {
        if position.x < 0.0 {
            position.x = 0.0;
            velocity.x = 0.0;
        }
        if position.x > config.world_bounds.x {
            position.x = config.world_bounds.x;
            velocity.x = 0.0;
        }
        if position.y < 0.0 {
            position.y = 0.0;
            velocity.y = 0.0;
        }
        if position.y > config.world_bounds.y {
            position.y = config.world_bounds.y;
            velocity.y = 0.0;
        }
    }
}

/// Ticks the jump timer down; held jumps fall back slower than released ones.
pub fn stance_tick_system(time: Res<Time>, mut query: Query<&mut CharacterStance>) {
    let dt = time.delta_secs();

    for mut stance in query.iter_mut() {
        if stance.is_airborne() {
            let decay = if stance.jump_held { 1.0 } else { 2.0 };
            stance.airborne_remaining = (stance.airborne_remaining - dt * decay).max(0.0);
            if !stance.is_airborne() {
                stance.jump_held = false;
            }
        }
    }
}
