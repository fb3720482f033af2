use std::sync::Arc;

use crate::ecs::plugins::input::action::{ActionId, TriggerEvent};
use crate::ecs::plugins::input::context::{ContextId, MappingContext};
use crate::ecs::plugins::input::setup::InputSetup;

/// Opaque token identifying one low-level binding, returned by
/// [`BindingSubsystem::bind`] and redeemed by [`BindingSubsystem::unbind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingHandle(u64);

impl BindingHandle {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The low-level binding infrastructure the input manager drives. The manager
/// treats it as a black box: contexts go in and out as units, bindings are
/// opaque handles.
pub trait BindingSubsystem {
    fn register_context(&mut self, context: &MappingContext, priority: i32);
    fn unregister_context(&mut self, context: &ContextId);
    fn bind(&mut self, action: &ActionId, event: TriggerEvent) -> Option<BindingHandle>;
    fn unbind(&mut self, handle: BindingHandle);
    fn has_context(&self, context: &ContextId) -> bool;
}

/// One realized binding: the action/event pair and the low-level handle that
/// backs it. Lives exactly as long as its owning processed setup.
#[derive(Debug, Clone)]
pub struct ProcessedBinding {
    pub action: ActionId,
    pub event: TriggerEvent,
    pub handle: BindingHandle,
}

/// A setup descriptor that survived registration, together with the bindings
/// it produced. Only ever created with at least one binding.
pub struct ProcessedSetup {
    pub source: Arc<InputSetup>,
    pub bindings: Vec<ProcessedBinding>,
}

struct RouterContext {
    priority: i32,
    context: MappingContext,
}

struct RouterBinding {
    action: ActionId,
    event: TriggerEvent,
    handle: BindingHandle,
}

/// Production [`BindingSubsystem`]: resolves raw key events coming off the
/// wire into action trigger events through the registered contexts, highest
/// priority first (registration order breaks ties).
#[derive(Default)]
pub struct KeyRouter {
    contexts: Vec<RouterContext>,
    bindings: Vec<RouterBinding>,
    next_handle: u64,
}

impl KeyRouter {
    /// Maps a raw key to the action a bound handler is listening for, or
    /// `None` when no context maps the key or nothing is bound to the
    /// resulting (action, event) pair.
    pub fn resolve(&self, key: &str, event: TriggerEvent) -> Option<ActionId> {
        let action = self
            .contexts
            .iter()
            .find_map(|entry| entry.context.action_for_key(key))?;

        self.bindings
            .iter()
            .any(|binding| binding.action == *action && binding.event == event)
            .then(|| action.clone())
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }
}

impl BindingSubsystem for KeyRouter {
    fn register_context(&mut self, context: &MappingContext, priority: i32) {
        if self.has_context(context.id()) {
            return;
        }

        let entry = RouterContext {
            priority,
            context: context.clone(),
        };
        let index = self
            .contexts
            .iter()
            .position(|existing| existing.priority < priority)
            .unwrap_or(self.contexts.len());
        self.contexts.insert(index, entry);
    }

    fn unregister_context(&mut self, context: &ContextId) {
        self.contexts
            .retain(|existing| existing.context.id() != context);
    }

    fn bind(&mut self, action: &ActionId, event: TriggerEvent) -> Option<BindingHandle> {
        self.next_handle += 1;
        let handle = BindingHandle::from_raw(self.next_handle);
        self.bindings.push(RouterBinding {
            action: action.clone(),
            event,
            handle,
        });
        Some(handle)
    }

    fn unbind(&mut self, handle: BindingHandle) {
        self.bindings.retain(|binding| binding.handle != handle);
    }

    fn has_context(&self, context: &ContextId) -> bool {
        self.contexts
            .iter()
            .any(|existing| existing.context.id() == context)
    }
}
