use bevy::prelude::*;

use crate::ecs::plugins::network::components::NetworkChannels;
use crate::ecs::plugins::network::systems::*;

pub struct NetworkPlugin {
    pub port: u16,
}

impl Default for NetworkPlugin {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

impl Plugin for NetworkPlugin {
    fn build(&self, app: &mut App) {
        let port = self.port;
        app.insert_resource(NetworkChannels::default())
            .add_systems(Startup, move |channels: Res<NetworkChannels>| {
                setup_websocket_server(channels, port);
            })
            .add_systems(
                Update,
                handle_session_events_system
                    .before(crate::ecs::plugins::player::systems::player_spawn_system),
            )
            .add_systems(FixedUpdate, broadcast_state_system);
    }
}
