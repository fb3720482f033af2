use bevy::prelude::*;

use crate::ecs::core::GameConfig;
use crate::ecs::plugins::input::bindings::BindingSubsystem;
use crate::ecs::plugins::input::components::{
    ClientChannelForwarder, InputSettingsRes, InputStack, SwitchBoard,
};
use crate::ecs::plugins::input::validation::{determine_result, validate_setup, ValidationOutcome};
use crate::ecs::plugins::network::components::NetworkChannels;
use crate::ecs::plugins::player::components::*;

/// Spawns the avatar and its input stack for a freshly connected player,
/// registering the default setups with the player's key router.
pub fn player_spawn_system(
    mut commands: Commands,
    mut spawn_events: EventReader<PlayerSpawnEvent>,
    mut player_registry: ResMut<PlayerRegistry>,
    settings: Res<InputSettingsRes>,
    channels: Res<NetworkChannels>,
    game_config: Res<GameConfig>,
) {
    for event in spawn_events.read() {
        let forwarder =
            ClientChannelForwarder::new(event.player_id, channels.player_sender.clone());
        let mut stack = InputStack::new(settings.0.clone(), forwarder);

        for setup in default_player_setups(&settings.0) {
            let report = validate_setup(&setup, &settings.0);
            for warning in report.warnings() {
                warn!(setup = %setup.id(), %warning, "input setup validation warning");
            }
            for error in report.errors() {
                warn!(setup = %setup.id(), %error, "input setup validation error");
            }
            if determine_result(&report, &settings.0) == ValidationOutcome::Invalid {
                warn!(setup = %setup.id(), "input setup failed validation");
            }

            let InputStack {
                router, manager, ..
            } = &mut stack;
            manager.add_setup(&setup, router as &mut dyn BindingSubsystem);
        }

        let entity = commands
            .spawn((
                PlayerBundle::new(event.player_id, &game_config),
                stack,
                default_ability_kit(),
                SwitchBoard::default(),
            ))
            .id();
        player_registry.register_player(event.player_id, entity);
        info!(player = event.player_id, ?entity, "spawned player avatar");
    }
}

/// Tears a leaving player down: clears every input setup through the router,
/// then despawns the avatar.
pub fn player_despawn_system(
    mut commands: Commands,
    mut despawn_events: EventReader<PlayerDespawnEvent>,
    mut player_registry: ResMut<PlayerRegistry>,
    mut query: Query<&mut InputStack>,
) {
    for event in despawn_events.read() {
        let Some(entity) = player_registry.unregister_player(event.player_id) else {
            continue;
        };

        if let Ok(mut stack) = query.get_mut(entity) {
            let InputStack {
                router, manager, ..
            } = &mut *stack;
            manager.clear_all_setups(Some(router as &mut dyn BindingSubsystem));
        }

        commands.entity(entity).despawn();
        info!(player = event.player_id, "despawned player avatar");
    }
}
