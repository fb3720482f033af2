use std::collections::HashMap;

use bevy::prelude::*;
use crossbeam_channel::Sender;
use tracing::trace;

use crate::ecs::plugins::abilities::components::AbilityComponent;
use crate::ecs::plugins::input::action::{ActionId, GameplayTag, InputValue, TriggerEvent};
use crate::ecs::plugins::input::bindings::KeyRouter;
use crate::ecs::plugins::input::handler::{EventForwarder, InputTarget};
use crate::ecs::plugins::input::manager::InputManager;
use crate::ecs::plugins::input::settings::InputSettings;
use crate::ecs::plugins::movement::components::{CharacterStance, MovementInput, Orientation};
use crate::ecs::plugins::network::components::ServerMessage;
use crate::ecs::plugins::player::components::CharacterProfile;

/// App-wide input settings, cloned into every spawned input stack.
#[derive(Resource, Clone, Default)]
pub struct InputSettingsRes(pub InputSettings);

/// A raw key/button trigger event as it came off the wire, before any
/// context resolution.
#[derive(Event, Debug, Clone)]
pub struct RawClientInputEvent {
    pub player_id: u32,
    pub key: String,
    pub event: TriggerEvent,
    pub value: InputValue,
}

/// A resolved action trigger event, ready for dispatch.
#[derive(Event, Debug, Clone)]
pub struct ActionTriggerEvent {
    pub player_id: u32,
    pub action: ActionId,
    pub trigger: TriggerEvent,
    pub value: InputValue,
}

/// Server-side remote-execution channel for one player: the server is the
/// authority and never the owning client, so "send to authority" is a local
/// no-op and "send to owning client" goes down this player's socket.
pub struct ClientChannelForwarder {
    player_id: u32,
    outgoing: Sender<(u32, ServerMessage)>,
}

impl ClientChannelForwarder {
    pub fn new(player_id: u32, outgoing: Sender<(u32, ServerMessage)>) -> Self {
        Self {
            player_id,
            outgoing,
        }
    }
}

impl EventForwarder for ClientChannelForwarder {
    fn is_authority(&self) -> bool {
        true
    }

    fn is_local(&self) -> bool {
        false
    }

    fn send_to_authority(&self, event: &GameplayTag, _value: &InputValue, _action: &ActionId) {
        trace!(%event, "already on the authority, nothing to forward");
    }

    fn send_to_owning_client(&self, event: &GameplayTag, value: &InputValue, action: &ActionId) {
        let _ = self.outgoing.send((
            self.player_id,
            ServerMessage::GameplayEvent {
                tag: event.clone(),
                action: action.clone(),
                value: *value,
            },
        ));
    }
}

/// The full input pipeline of one connected player: the key router (binding
/// subsystem), the dispatcher, and the remote-execution channel back to the
/// owning client.
#[derive(Component)]
pub struct InputStack {
    pub router: KeyRouter,
    pub manager: InputManager,
    pub forwarder: ClientChannelForwarder,
}

impl InputStack {
    pub fn new(settings: InputSettings, forwarder: ClientChannelForwarder) -> Self {
        Self {
            router: KeyRouter::default(),
            manager: InputManager::new(settings),
            forwarder,
        }
    }
}

/// Boolean gameplay toggles keyed by tag (walk/run and friends), flipped by
/// state-switch handlers.
#[derive(Component, Debug, Default)]
pub struct SwitchBoard {
    switches: HashMap<GameplayTag, bool>,
}

impl SwitchBoard {
    pub fn get(&self, switch: &GameplayTag) -> bool {
        self.switches.get(switch).copied().unwrap_or(false)
    }

    pub fn set(&mut self, switch: &GameplayTag, state: bool) {
        self.switches.insert(switch.clone(), state);
    }
}

/// Borrow-bundle over one avatar's gameplay components, assembled per
/// dispatch. This is the only surface handlers mutate gameplay through.
pub struct AvatarTarget<'a> {
    pub movement_input: &'a mut MovementInput,
    pub orientation: &'a mut Orientation,
    pub stance: &'a mut CharacterStance,
    pub abilities: &'a mut AbilityComponent,
    pub switches: &'a mut SwitchBoard,
    pub profile: &'a CharacterProfile,
}

impl InputTarget for AvatarTarget<'_> {
    fn add_movement_input(&mut self, direction: Vec2, scale: f32) {
        self.movement_input.add(direction, scale);
    }

    fn add_rotation_input(&mut self, yaw: f32, pitch: f32) {
        self.orientation
            .add_input(yaw * self.profile.turn_rate, pitch * self.profile.turn_rate);
    }

    fn forward_vector(&self) -> Vec2 {
        self.orientation.forward()
    }

    fn right_vector(&self) -> Vec2 {
        self.orientation.right()
    }

    fn jump(&mut self) {
        self.stance.begin_jump(self.profile.jump_duration);
    }

    fn stop_jumping(&mut self) {
        self.stance.release_jump();
    }

    fn is_crouched(&self) -> bool {
        self.stance.crouched
    }

    fn set_crouched(&mut self, crouched: bool) {
        // No crouching mid-air.
        if !crouched || !self.stance.is_airborne() {
            self.stance.crouched = crouched;
        }
    }

    fn has_any_tags(&self, tags: &[GameplayTag]) -> bool {
        self.abilities.has_any_tags(tags)
    }

    fn try_activate_ability(&mut self, ability: &GameplayTag) -> bool {
        self.abilities.try_activate(ability)
    }

    fn cancel_ability(&mut self, ability: &GameplayTag) -> bool {
        self.abilities.cancel(ability)
    }

    fn has_active_ability(&self, ability: &GameplayTag) -> bool {
        self.abilities.has_active(ability)
    }

    fn handle_gameplay_event(&mut self, event: &GameplayTag, value: &InputValue) -> u32 {
        self.abilities.handle_gameplay_event(event, value)
    }

    fn switch_state(&self, switch: &GameplayTag) -> bool {
        self.switches.get(switch)
    }

    fn set_switch_state(&mut self, switch: &GameplayTag, state: bool) {
        self.switches.set(switch, state);
    }
}
