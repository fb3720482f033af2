pub mod core;
pub mod plugins;

pub use self::core::CorePlugin;
pub use plugins::{
    AbilitiesPlugin, DebugPlugin, InputPlugin, MovementPlugin, NetworkPlugin, PlayerPlugin,
};
