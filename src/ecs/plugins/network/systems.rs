use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use bevy::prelude::*;
use crossbeam_channel::Sender;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::{accept_async, tungstenite::Message};

use crate::ecs::core::Position;
use crate::ecs::plugins::input::components::RawClientInputEvent;
use crate::ecs::plugins::movement::components::Velocity;
use crate::ecs::plugins::network::components::*;
use crate::ecs::plugins::player::components::{
    Player, PlayerDespawnEvent, PlayerSpawnEvent,
};

static NEXT_PLAYER_ID: AtomicU32 = AtomicU32::new(1);

fn generate_player_id() -> u32 {
    NEXT_PLAYER_ID.fetch_add(1, Ordering::SeqCst)
}

type ConnectionMap = Arc<Mutex<HashMap<u32, tokio::sync::mpsc::UnboundedSender<Message>>>>;

/// Boots the WebSocket server on a dedicated thread with its own tokio
/// runtime, pumping the crossbeam channels from and to the ECS.
pub fn setup_websocket_server(channels: Res<NetworkChannels>, port: u16) {
    let connections = channels.connections.clone();
    let incoming_sender = channels.incoming_sender.clone();
    let broadcast_receiver = channels.broadcast_receiver.clone();
    let player_receiver = channels.player_receiver.clone();

    thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to build the network runtime");
        rt.block_on(async move {
            let listener = match TcpListener::bind(format!("0.0.0.0:{port}")).await {
                Ok(listener) => listener,
                Err(error) => {
                    error!(%error, port, "unable to bind the WebSocket listener");
                    return;
                }
            };
            println!("🌐 WebSocket server listening on ws://localhost:{port}");

            // Pump broadcast messages to every connected client.
            let connections_for_broadcast = connections.clone();
            tokio::spawn(async move {
                loop {
                    match broadcast_receiver.try_recv() {
                        Ok(message) => {
                            let json = serde_json::to_string(&message).unwrap_or_default();
                            let ws_message = Message::Text(json.into());
                            let conns = connections_for_broadcast.lock().await;
                            for sender in conns.values() {
                                let _ = sender.send(ws_message.clone());
                            }
                        }
                        Err(_) => {
                            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
                        }
                    }
                }
            });

            // Pump player-addressed messages (state syncs, forwarded gameplay
            // events) to their single recipient.
            let connections_for_player = connections.clone();
            tokio::spawn(async move {
                loop {
                    match player_receiver.try_recv() {
                        Ok((player_id, message)) => {
                            let json = serde_json::to_string(&message).unwrap_or_default();
                            let conns = connections_for_player.lock().await;
                            if let Some(sender) = conns.get(&player_id) {
                                let _ = sender.send(Message::Text(json.into()));
                            }
                        }
                        Err(_) => {
                            tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
                        }
                    }
                }
            });

            while let Ok((stream, addr)) = listener.accept().await {
                println!("📡 New connection from: {addr}");
                let connections = connections.clone();
                let sender = incoming_sender.clone();
                tokio::spawn(handle_client(stream, connections, sender));
            }
        });
    });
}

async fn handle_client(
    stream: TcpStream,
    connections: ConnectionMap,
    session_sender: Sender<SessionEvent>,
) {
    let ws_stream = match accept_async(stream).await {
        Ok(ws) => ws,
        Err(error) => {
            warn!(%error, "WebSocket handshake failed");
            return;
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let player_id = generate_player_id();
    connections.lock().await.insert(player_id, tx.clone());

    println!("✅ Player {player_id} connected");
    let welcome = serde_json::to_string(&ServerMessage::Welcome { player_id }).unwrap_or_default();
    let _ = tx.send(Message::Text(welcome.into()));
    let _ = session_sender.send(SessionEvent::PlayerJoined(player_id));

    // Outgoing pump for this client.
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if ws_sender.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = ws_receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Input { key, event, value }) => {
                    let _ = session_sender.send(SessionEvent::PlayerInput {
                        player_id,
                        key,
                        event,
                        value,
                    });
                }
                Ok(ClientMessage::Heartbeat) => {}
                Err(error) => {
                    debug!(player = player_id, %error, "discarding unparseable client message");
                }
            },
            Ok(Message::Ping(data)) => {
                let _ = tx.send(Message::Pong(data));
            }
            Ok(Message::Close(_)) => {
                println!("🔌 Player {player_id} disconnected");
                break;
            }
            _ => {}
        }
    }

    connections.lock().await.remove(&player_id);
    let _ = session_sender.send(SessionEvent::PlayerLeft(player_id));
    println!("🧹 Cleaned up connection for player {player_id}");
}

/// Converts session events from the socket threads into ECS events. A
/// joining player also gets a full state sync of everyone already in the
/// world.
pub fn handle_session_events_system(
    mut raw_input_events: EventWriter<RawClientInputEvent>,
    mut spawn_events: EventWriter<PlayerSpawnEvent>,
    mut despawn_events: EventWriter<PlayerDespawnEvent>,
    channels: Res<NetworkChannels>,
    players: Query<(&Player, &Position, &Velocity)>,
) {
    while let Ok(event) = channels.incoming.try_recv() {
        match event {
            SessionEvent::PlayerJoined(player_id) => {
                spawn_events.send(PlayerSpawnEvent { player_id });
                let _ = channels
                    .broadcast_sender
                    .send(ServerMessage::PlayerJoined { player_id });

                let snapshot: Vec<PlayerState> = players
                    .iter()
                    .map(|(player, position, velocity)| PlayerState {
                        id: player.id,
                        x: position.x,
                        y: position.y,
                        vx: velocity.x,
                        vy: velocity.y,
                    })
                    .collect();
                if !snapshot.is_empty() {
                    let _ = channels
                        .player_sender
                        .send((player_id, ServerMessage::StateSync { players: snapshot }));
                }
            }
            SessionEvent::PlayerLeft(player_id) => {
                despawn_events.send(PlayerDespawnEvent { player_id });
                let _ = channels
                    .broadcast_sender
                    .send(ServerMessage::PlayerLeft { player_id });
            }
            SessionEvent::PlayerInput {
                player_id,
                key,
                event,
                value,
            } => {
                raw_input_events.send(RawClientInputEvent {
                    player_id,
                    key,
                    event,
                    value,
                });
            }
        }
    }
}

/// Broadcasts the positions that changed this tick.
pub fn broadcast_state_system(
    channels: Res<NetworkChannels>,
    changed: Query<(&Player, &Position, &Velocity), Changed<Position>>,
) {
    let players: Vec<PlayerState> = changed
        .iter()
        .map(|(player, position, velocity)| PlayerState {
            id: player.id,
            x: position.x,
            y: position.y,
            vx: velocity.x,
            vy: velocity.y,
        })
        .collect();

    if !players.is_empty() {
        let _ = channels
            .broadcast_sender
            .send(ServerMessage::StateSync { players });
    }
}
