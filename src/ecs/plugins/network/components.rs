use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;

use crate::ecs::plugins::input::action::{ActionId, GameplayTag, InputValue, TriggerEvent};

/// Messages a client sends to the server. Trigger phases are evaluated
/// client-side; the server routes keys through the player's mapping contexts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientMessage {
    Input {
        key: String,
        event: TriggerEvent,
        value: InputValue,
    },
    Heartbeat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Messages the server sends to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    Welcome {
        player_id: u32,
    },
    PlayerJoined {
        player_id: u32,
    },
    PlayerLeft {
        player_id: u32,
    },
    StateSync {
        players: Vec<PlayerState>,
    },
    /// A gameplay event forwarded to the owning client.
    GameplayEvent {
        tag: GameplayTag,
        action: ActionId,
        value: InputValue,
    },
}

/// Session-level notifications from the socket threads to the ECS.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    PlayerJoined(u32),
    PlayerLeft(u32),
    PlayerInput {
        player_id: u32,
        key: String,
        event: TriggerEvent,
        value: InputValue,
    },
}

/// Channel plumbing between the WebSocket runtime and the ECS. The tokio side
/// owns the per-client socket senders; the crossbeam pairs carry traffic in
/// and out of the game loop.
#[derive(Resource)]
pub struct NetworkChannels {
    pub connections: Arc<Mutex<HashMap<u32, tokio::sync::mpsc::UnboundedSender<Message>>>>,
    pub incoming: Receiver<SessionEvent>,
    pub incoming_sender: Sender<SessionEvent>,
    pub broadcast_sender: Sender<ServerMessage>,
    pub broadcast_receiver: Receiver<ServerMessage>,
    pub player_sender: Sender<(u32, ServerMessage)>,
    pub player_receiver: Receiver<(u32, ServerMessage)>,
}

impl Default for NetworkChannels {
    fn default() -> Self {
        let (incoming_sender, incoming) = crossbeam_channel::unbounded();
        let (broadcast_sender, broadcast_receiver) = crossbeam_channel::unbounded();
        let (player_sender, player_receiver) = crossbeam_channel::unbounded();
        Self {
            connections: Arc::new(Mutex::new(HashMap::new())),
            incoming,
            incoming_sender,
            broadcast_sender,
            broadcast_receiver,
            player_sender,
            player_receiver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec2;

    #[test]
    fn client_input_round_trips_through_json() {
        let message = ClientMessage::Input {
            key: "LeftStick".into(),
            event: TriggerEvent::Ongoing,
            value: InputValue::Axis2D(Vec2::new(1.0, 0.0)),
        };

        let json = serde_json::to_string(&message).unwrap();
        let parsed: ClientMessage = serde_json::from_str(&json).unwrap();
        match parsed {
            ClientMessage::Input { key, event, value } => {
                assert_eq!(key, "LeftStick");
                assert_eq!(event, TriggerEvent::Ongoing);
                assert_eq!(value, InputValue::Axis2D(Vec2::new(1.0, 0.0)));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
