use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::ecs::plugins::input::action::{ActionId, InputValue, TriggerEvent};
use crate::ecs::plugins::input::handler::{DispatchContext, InputHandler};

/// Acceptance policy of a command buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BufferMode {
    /// Buffering is turned off entirely for this buffer.
    Disabled,
    /// Only accept a batch while the buffer is empty; later batches are
    /// ignored until the buffer flushes.
    FirstCommand,
    /// Every accepted batch replaces the previous one wholesale.
    #[default]
    LastCommand,
}

/// A handler invocation captured for deferred execution: the action, the
/// handler, the payload at capture time and the trigger kind. The dispatch
/// context is supplied again when the command finally executes.
#[derive(Clone)]
pub struct BufferedCommand {
    pub action: ActionId,
    pub handler: Arc<dyn InputHandler>,
    pub value: InputValue,
    pub trigger: TriggerEvent,
}

impl BufferedCommand {
    pub fn new(
        action: ActionId,
        handler: Arc<dyn InputHandler>,
        value: InputValue,
        trigger: TriggerEvent,
    ) -> Self {
        Self {
            action,
            handler,
            value,
            trigger,
        }
    }

    /// A command is executable only with a real trigger kind. The other
    /// identity fields cannot be absent by construction.
    pub fn is_valid(&self) -> bool {
        !self.trigger.is_none()
    }

    pub fn execute(&self, ctx: &mut DispatchContext<'_>) {
        if self.is_valid() {
            self.handler.handle(ctx, &self.value, self.trigger, &self.action);
        }
    }
}

// Two commands are the same when they would invoke the same handler for the
// same action and trigger; the payload is deliberately excluded so a repeat
// press replaces rather than duplicates.
impl PartialEq for BufferedCommand {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
            && self.trigger == other.trigger
            && self.action == other.action
    }
}

impl fmt::Debug for BufferedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferedCommand")
            .field("action", &self.action)
            .field("handler", &self.handler.name())
            .field("value", &self.value)
            .field("trigger", &self.trigger)
            .finish()
    }
}

/// Holds at most one generation of pending commands while a buffering window
/// is open, then flushes or discards them when the window closes.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    mode: BufferMode,
    open: bool,
    commands: Vec<BufferedCommand>,
}

impl CommandBuffer {
    pub fn new(mode: BufferMode) -> Self {
        Self {
            mode,
            open: false,
            commands: Vec::new(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(BufferMode::Disabled)
    }

    pub fn mode(&self) -> BufferMode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.mode != BufferMode::Disabled
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[BufferedCommand] {
        &self.commands
    }

    /// Opens a buffering window, dropping anything left over from a previous
    /// one. No-op while already open.
    pub fn open(&mut self) {
        if !self.open {
            self.commands.clear();
            self.open = true;
        }
    }

    /// Closes the window. Unless `cancelled`, every pending command executes
    /// in insertion order; each entry is removed as it is consumed and the
    /// buffer is empty afterwards either way. No-op while not open.
    pub fn close(&mut self, cancelled: bool, ctx: &mut DispatchContext<'_>) {
        if !self.open {
            return;
        }
        self.open = false;

        for command in self.commands.drain(..) {
            if !cancelled && command.is_valid() {
                trace!(
                    action = %command.action,
                    handler = command.handler.name(),
                    "releasing command from input buffer"
                );
                command.execute(ctx);
            }
        }
    }

    /// Merges a candidate batch into the buffer according to the buffer mode.
    /// Empty batches are rejected outright.
    pub fn buffer_commands(&mut self, batch: Vec<BufferedCommand>) {
        if batch.is_empty() || !self.can_accept() {
            return;
        }

        debug!(
            action = %batch[0].action,
            handlers = batch.len(),
            "action added handlers to the input buffer"
        );
        self.commands = batch;
    }

    /// Drops every pending command owned by any of the given handlers.
    pub fn purge_handlers(&mut self, handlers: &[Arc<dyn InputHandler>]) {
        self.commands.retain(|command| {
            !handlers
                .iter()
                .any(|handler| Arc::ptr_eq(handler, &command.handler))
        });
    }

    fn can_accept(&self) -> bool {
        self.mode == BufferMode::LastCommand
            || self.mode == BufferMode::FirstCommand && self.commands.is_empty()
    }
}
