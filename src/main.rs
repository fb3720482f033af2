/*!
# Arena Game Server

A real-time multiplayer action game server built with Bevy ECS.

## Architecture Overview

This server uses a plugin-based architecture where each major system is
implemented as a plugin:

- **CorePlugin**: Basic game state (positions, world configuration)
- **InputPlugin**: The input pipeline: mapping contexts, trigger-event
  dispatch to gameplay handlers, and command buffering
- **AbilitiesPlugin**: Ability activation, gameplay tags and the input
  buffer window tied to ability lifetimes
- **MovementPlugin**: Physics simulation (acceleration, friction, bounds)
- **PlayerPlugin**: Player lifecycle (spawn/despawn, default input setups)
- **NetworkPlugin**: WebSocket transport and client/server event forwarding
- **DebugPlugin**: Development status dumps

## How It Works

1. Clients connect via WebSocket and get an avatar with the default
   locomotion and combat input setups registered
2. Clients stream raw key trigger events; the server resolves them through
   each player's mapping contexts and dispatches them to input handlers
3. Handlers move the avatar, steer the camera, activate abilities or flip
   gameplay switches; while an ability commits the avatar, bufferable
   commands wait in the input buffer and release when the ability ends
4. The server simulates movement and broadcasts changed state to clients

Connect clients to `ws://localhost:5000`.
Input format: `{"Input": {"key": "Space", "event": "Triggered", "value": {"Bool": true}}}`
*/

use bevy::log::LogPlugin;
use bevy::prelude::*;

mod ecs;

use ecs::{
    AbilitiesPlugin, CorePlugin, DebugPlugin, InputPlugin, MovementPlugin, NetworkPlugin,
    PlayerPlugin,
};

fn main() {
    println!("🚀 Starting Arena Game Server...");
    println!("📡 Network Protocol: WebSocket");

    App::new()
        // Bevy's minimal plugins (no graphics/audio needed for a server),
        // plus logging.
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        // Game plugins
        .add_plugins(CorePlugin)
        .add_plugins(InputPlugin)
        .add_plugins(AbilitiesPlugin)
        .add_plugins(MovementPlugin)
        .add_plugins(PlayerPlugin)
        .add_plugins(NetworkPlugin::default())
        .add_plugins(DebugPlugin)
        // Fixed simulation rate
        .insert_resource(Time::<Fixed>::from_hz(30.0))
        .add_systems(Startup, setup_game_world)
        .run();
}

fn setup_game_world() {
    println!("🌍 Game world initialized!");
    println!("🎮 Server ready for player connections");
    println!("📍 WebSocket: ws://localhost:5000");
}
