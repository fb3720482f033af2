use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;

use crate::ecs::core::{GameConfig, Position};
use crate::ecs::plugins::abilities::components::{AbilityComponent, AbilitySpec};
use crate::ecs::plugins::input::action::{ActionId, GameplayTag};
use crate::ecs::plugins::input::context::{ContextId, MappingContext};
use crate::ecs::plugins::input::handler::InputHandler;
use crate::ecs::plugins::input::handlers::{
    AbilityActivationHandler, AbilityInterruptHandler, CrouchHandler, GameplayEventHandler,
    JumpHandler, LookHandler, MoveHandler, StateSwitchHandler,
};
use crate::ecs::plugins::input::settings::InputSettings;
use crate::ecs::plugins::input::setup::{InputSetup, SetupId};
use crate::ecs::plugins::movement::components::{
    CharacterStance, DesiredVelocity, Friction, MovementInput, Orientation, Velocity,
};

#[derive(Component, Debug, Clone, Copy)]
pub struct Player {
    pub id: u32,
}

/// Tuning knobs of one avatar's movement and input response.
#[derive(Component, Debug, Clone, Copy)]
pub struct CharacterProfile {
    pub max_speed: f32,
    pub acceleration: f32,
    pub crouch_speed_scale: f32,
    pub turn_rate: f32,
    pub jump_duration: f32,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            max_speed: 100.0,
            acceleration: 10.0,
            crouch_speed_scale: 0.5,
            turn_rate: 0.05,
            jump_duration: 0.8,
        }
    }
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub position: Position,
    pub velocity: Velocity,
    pub desired_velocity: DesiredVelocity,
    pub movement_input: MovementInput,
    pub friction: Friction,
    pub orientation: Orientation,
    pub stance: CharacterStance,
    pub profile: CharacterProfile,
}

impl PlayerBundle {
    pub fn new(player_id: u32, game_config: &GameConfig) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let x = rng.gen_range(0.0..game_config.world_bounds.x);
        let y = rng.gen_range(0.0..game_config.world_bounds.y);

        Self {
            player: Player { id: player_id },
            position: Position { x, y },
            velocity: Velocity::default(),
            desired_velocity: DesiredVelocity::default(),
            movement_input: MovementInput::default(),
            friction: Friction::default(),
            orientation: Orientation::default(),
            stance: CharacterStance::default(),
            profile: CharacterProfile::default(),
        }
    }
}

#[derive(Event)]
pub struct PlayerSpawnEvent {
    pub player_id: u32,
}

#[derive(Event)]
pub struct PlayerDespawnEvent {
    pub player_id: u32,
}

#[derive(Resource, Default)]
pub struct PlayerRegistry {
    pub players: HashMap<u32, Entity>,
}

impl PlayerRegistry {
    pub fn register_player(&mut self, player_id: u32, entity: Entity) {
        self.players.insert(player_id, entity);
    }

    pub fn unregister_player(&mut self, player_id: u32) -> Option<Entity> {
        self.players.remove(&player_id)
    }

    pub fn get_player_entity(&self, player_id: u32) -> Option<Entity> {
        self.players.get(&player_id).copied()
    }
}

pub mod abilities {
    use super::GameplayTag;

    pub const ATTACK: GameplayTag = GameplayTag::from_static("ability.attack");
    pub const DODGE: GameplayTag = GameplayTag::from_static("ability.dodge");
    pub const INTERACT: GameplayTag = GameplayTag::from_static("ability.interact");
}

pub mod events {
    use super::GameplayTag;

    pub const INTERACT: GameplayTag = GameplayTag::from_static("event.interact");
}

pub mod switches {
    use super::GameplayTag;

    pub const WALK: GameplayTag = GameplayTag::from_static("state.walk");
}

/// Abilities every fresh avatar starts with.
pub fn default_ability_kit() -> AbilityComponent {
    let mut component = AbilityComponent::default();
    component.grant(AbilitySpec {
        tag: abilities::ATTACK,
        duration: 0.6,
        locks_input: true,
        tags_while_active: vec![crate::ecs::plugins::input::action::tags::BLOCK_MOVEMENT],
        activation_event: None,
    });
    component.grant(AbilitySpec {
        tag: abilities::DODGE,
        duration: 0.35,
        locks_input: false,
        tags_while_active: Vec::new(),
        activation_event: None,
    });
    component.grant(AbilitySpec {
        tag: abilities::INTERACT,
        duration: 0.2,
        locks_input: false,
        tags_while_active: Vec::new(),
        activation_event: Some(events::INTERACT),
    });
    component
}

/// The two setups every fresh avatar registers: locomotion and combat.
/// Contexts and handlers are built per player and torn down with the player.
pub fn default_player_setups(settings: &InputSettings) -> Vec<Arc<InputSetup>> {
    let locomotion_context = Arc::new(
        MappingContext::new(ContextId::from_static("locomotion"))
            .with_mapping("LeftStick", ActionId::from_static("move"))
            .with_mapping("RightStick", ActionId::from_static("look"))
            .with_mapping("MouseDelta", ActionId::from_static("look"))
            .with_mapping("Space", ActionId::from_static("jump"))
            .with_mapping("GamepadFaceBottom", ActionId::from_static("jump"))
            .with_mapping("LeftCtrl", ActionId::from_static("crouch"))
            .with_mapping("CapsLock", ActionId::from_static("walk")),
    );
    let locomotion_handlers: Vec<Arc<dyn InputHandler>> = vec![
        Arc::new(MoveHandler::new(ActionId::from_static("move"), settings)),
        Arc::new(LookHandler::new(ActionId::from_static("look"), settings)),
        Arc::new(JumpHandler::new(ActionId::from_static("jump"), settings)),
        Arc::new(CrouchHandler::new(ActionId::from_static("crouch"), settings)),
        Arc::new(StateSwitchHandler::new(
            ActionId::from_static("walk"),
            switches::WALK,
        )),
    ];

    let combat_context = Arc::new(
        MappingContext::new(ContextId::from_static("combat"))
            .with_mapping("LeftMouse", ActionId::from_static("attack"))
            .with_mapping("GamepadShoulderRight", ActionId::from_static("attack"))
            .with_mapping("LeftShift", ActionId::from_static("dodge"))
            .with_mapping("RightMouse", ActionId::from_static("guard"))
            .with_mapping("E", ActionId::from_static("interact")),
    );
    let combat_handlers: Vec<Arc<dyn InputHandler>> = vec![
        Arc::new(AbilityActivationHandler::new(
            ActionId::from_static("attack"),
            abilities::ATTACK,
        )),
        Arc::new(AbilityActivationHandler::new(
            ActionId::from_static("dodge"),
            abilities::DODGE,
        )),
        Arc::new(AbilityInterruptHandler::new(
            ActionId::from_static("guard"),
            vec![abilities::ATTACK, abilities::DODGE],
        )),
        Arc::new(GameplayEventHandler::new(
            ActionId::from_static("interact"),
            events::INTERACT,
        )),
    ];

    vec![
        InputSetup::new(
            SetupId::from_static("locomotion"),
            locomotion_context,
            locomotion_handlers,
            0,
        ),
        InputSetup::new(
            SetupId::from_static("combat"),
            combat_context,
            combat_handlers,
            1,
        ),
    ]
}
