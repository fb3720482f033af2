pub mod abilities;
pub mod debug;
pub mod input;
pub mod movement;
pub mod network;
pub mod player;

pub use abilities::AbilitiesPlugin;
pub use debug::DebugPlugin;
pub use input::InputPlugin;
pub use movement::MovementPlugin;
pub use network::NetworkPlugin;
pub use player::PlayerPlugin;
