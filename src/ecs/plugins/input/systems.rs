use bevy::prelude::*;

use crate::ecs::plugins::abilities::components::AbilityComponent;
use crate::ecs::plugins::input::action::TriggerEvent;
use crate::ecs::plugins::input::components::*;
use crate::ecs::plugins::input::handler::DispatchContext;
use crate::ecs::plugins::movement::components::{CharacterStance, MovementInput, Orientation};
use crate::ecs::plugins::player::components::{CharacterProfile, PlayerRegistry};

/// Resolves raw key events into action trigger events through each player's
/// key router. Keys no active context maps, and actions without a live
/// binding for the event kind, drop here.
pub fn route_raw_input_system(
    mut raw_events: EventReader<RawClientInputEvent>,
    mut action_events: EventWriter<ActionTriggerEvent>,
    registry: Res<PlayerRegistry>,
    query: Query<&InputStack>,
) {
    for raw in raw_events.read() {
        let Some(entity) = registry.get_player_entity(raw.player_id) else {
            continue;
        };
        let Ok(stack) = query.get(entity) else {
            continue;
        };

        if let Some(action) = stack.router.resolve(&raw.key, raw.event) {
            action_events.send(ActionTriggerEvent {
                player_id: raw.player_id,
                action,
                trigger: raw.event,
                value: raw.value,
            });
        }
    }
}

/// Feeds resolved action trigger events into each player's dispatcher, one
/// explicit entry point per trigger kind.
pub fn dispatch_action_events_system(
    mut action_events: EventReader<ActionTriggerEvent>,
    registry: Res<PlayerRegistry>,
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
    for event in action_events.read() {
        let Some(entity) = registry.get_player_entity(event.player_id) else {
            continue;
        };
        let Ok((
            mut stack,
            mut movement_input,
            mut orientation,
            mut stance,
            mut abilities,
            mut switches,
            profile,
        )) = query.get_mut(entity)
        else {
            continue;
        };

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

        match event.trigger {
            TriggerEvent::Started => manager.dispatch_started(&event.action, &event.value, &mut ctx),
            TriggerEvent::Ongoing => manager.dispatch_ongoing(&event.action, &event.value, &mut ctx),
            TriggerEvent::Triggered => {
                manager.dispatch_triggered(&event.action, &event.value, &mut ctx)
            }
            TriggerEvent::Completed => {
                manager.dispatch_completed(&event.action, &event.value, &mut ctx)
            }
            TriggerEvent::Canceled => {
                manager.dispatch_canceled(&event.action, &event.value, &mut ctx)
            }
            TriggerEvent::None => {
                warn!(player = event.player_id, action = %event.action, "dropping trigger event 'None'");
            }
        }
    }
}
