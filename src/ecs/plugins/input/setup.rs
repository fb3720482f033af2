use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::ecs::plugins::input::action::{ActionId, TriggerEvent};
use crate::ecs::plugins::input::context::MappingContext;
use crate::ecs::plugins::input::handler::InputHandler;

/// Identity of a setup descriptor. Two setups with the same id are the same
/// source of bindings as far as a manager is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SetupId(Cow<'static, str>);

impl SetupId {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable bundle describing one source of input bindings: a mapping
/// context, the handlers responding to its actions, and the priority the
/// context registers at. Owned by whoever assembles the player's input
/// (configuration, spawn code); managers only hold shared references.
pub struct InputSetup {
    id: SetupId,
    context: Arc<MappingContext>,
    handlers: Vec<Arc<dyn InputHandler>>,
    priority: i32,
}

impl InputSetup {
    pub fn new(
        id: SetupId,
        context: Arc<MappingContext>,
        handlers: Vec<Arc<dyn InputHandler>>,
        priority: i32,
    ) -> Arc<Self> {
        Arc::new(Self {
            id,
            context,
            handlers,
            priority,
        })
    }

    pub fn id(&self) -> &SetupId {
        &self.id
    }

    pub fn context(&self) -> &Arc<MappingContext> {
        &self.context
    }

    pub fn handlers(&self) -> &[Arc<dyn InputHandler>] {
        &self.handlers
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether any handler in this setup would respond to the given pair.
    pub fn has_compatible_handler(&self, trigger: TriggerEvent, action: &ActionId) -> bool {
        self.handlers
            .iter()
            .any(|handler| handler.can_handle(trigger, action))
    }
}

impl fmt::Debug for InputSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSetup")
            .field("id", &self.id)
            .field("context", self.context.id())
            .field("handlers", &self.handlers.len())
            .field("priority", &self.priority)
            .finish()
    }
}
