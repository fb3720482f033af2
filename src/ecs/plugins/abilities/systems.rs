use bevy::prelude::*;

use crate::ecs::plugins::abilities::components::AbilityComponent;
use crate::ecs::plugins::input::components::{AvatarTarget, InputStack, SwitchBoard};
use crate::ecs::plugins::input::handler::DispatchContext;
use crate::ecs::plugins::movement::components::{CharacterStance, MovementInput, Orientation};
use crate::ecs::plugins::player::components::CharacterProfile;

/// Advances every avatar's active ability clock.
pub fn ability_tick_system(time: Res<Time>, mut query: Query<&mut AbilityComponent>) {
    let dt = time.delta_secs();
    for mut abilities in query.iter_mut() {
        abilities.tick(dt);
    }
}

/// Keeps each avatar's input buffer window in sync with its ability state:
/// open while an input-locking ability runs, flushed when the ability
/// completes, discarded when it was interrupted.
pub fn ability_buffer_window_system(
    mut query: Query<(
        &mut InputStack,
        &mut MovementInput,
        &mut Orientation,
        &mut CharacterStance,
        &mut AbilityComponent,
        &mut SwitchBoard,
        &CharacterProfile,
    )>,
) {
    for (
        mut stack,
        mut movement_input,
        mut orientation,
        mut stance,
        mut abilities,
        mut switches,
        profile,
    ) in query.iter_mut()
    {
        let locking = abilities
            .active()
            .is_some_and(|active| active.locks_input);
        if locking && !stack.manager.is_buffer_open() {
            stack.manager.open_buffer();
        }

        if let Some(end) = abilities.take_finished() {
            let InputStack {
                manager, forwarder, ..
            } = &mut *stack;
            let mut avatar = AvatarTarget {
                movement_input: &mut movement_input,
                orientation: &mut orientation,
                stance: &mut stance,
                abilities: &mut abilities,
                switches: &mut switches,
                profile,
            };
            let mut ctx = DispatchContext::new(&mut avatar).with_forwarder(&*forwarder);
            manager.close_buffer(end.interrupted, &mut ctx);
        }
    }
}
