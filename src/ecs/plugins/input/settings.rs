use crate::ecs::plugins::input::action::{tags, GameplayTag, TriggerEvent};
use crate::ecs::plugins::input::buffer::BufferMode;

/// Static configuration consumed by an [`InputManager`] at construction time.
/// There is no ambient settings lookup; whoever builds a manager decides what
/// it tracks and which tags gate the stock handlers.
///
/// [`InputManager`]: crate::ecs::plugins::input::manager::InputManager
#[derive(Debug, Clone)]
pub struct InputSettings {
    /// Trigger kinds that get a binding when a context is registered.
    pub tracked_events: Vec<TriggerEvent>,

    /// Buffering policy for the manager's own command buffer.
    pub buffer_mode: BufferMode,

    pub block_movement_tag: GameplayTag,
    pub block_camera_tag: GameplayTag,
    pub block_rotation_tag: GameplayTag,

    /// Master switch for setup validation. Note that warnings reject a setup
    /// regardless of this flag; see `validation::determine_result`.
    pub enable_data_validation: bool,

    /// When validating, require every context action to have a compatible
    /// handler in the same setup.
    pub match_handlers_with_context: bool,

    /// Trace every dispatched trigger event. Noisy; meant for development.
    pub log_dispatched_events: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            tracked_events: TriggerEvent::ALL.to_vec(),
            buffer_mode: BufferMode::LastCommand,
            block_movement_tag: tags::BLOCK_MOVEMENT,
            block_camera_tag: tags::BLOCK_CAMERA,
            block_rotation_tag: tags::BLOCK_ROTATION,
            enable_data_validation: true,
            match_handlers_with_context: true,
            log_dispatched_events: false,
        }
    }
}
