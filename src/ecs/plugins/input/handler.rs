use bevy::math::Vec2;
use tracing::warn;

use crate::ecs::plugins::input::action::{ActionId, GameplayTag, InputValue, TriggerEvent};
use crate::ecs::plugins::input::buffer::CommandBuffer;

/// Gameplay-effect surface a handler acts on: the avatar's movement, camera,
/// stance, abilities and toggles. The input core never mutates gameplay state
/// directly; everything goes through this trait.
///
/// Defaults are permissive no-ops so partial targets (tests, headless tools)
/// only implement what they observe.
pub trait InputTarget {
    fn add_movement_input(&mut self, _direction: Vec2, _scale: f32) {}
    fn add_rotation_input(&mut self, _yaw: f32, _pitch: f32) {}

    /// World-space reference vectors for directional movement input.
    fn forward_vector(&self) -> Vec2 {
        Vec2::Y
    }
    fn right_vector(&self) -> Vec2 {
        Vec2::X
    }

    fn jump(&mut self) {}
    fn stop_jumping(&mut self) {}

    fn is_crouched(&self) -> bool {
        false
    }
    fn set_crouched(&mut self, _crouched: bool) {}

    /// True when the avatar currently holds any of the given gameplay tags.
    fn has_any_tags(&self, _tags: &[GameplayTag]) -> bool {
        false
    }

    fn try_activate_ability(&mut self, _ability: &GameplayTag) -> bool {
        false
    }
    fn cancel_ability(&mut self, _ability: &GameplayTag) -> bool {
        false
    }
    fn has_active_ability(&self, _ability: &GameplayTag) -> bool {
        false
    }

    /// Deliver a gameplay event to the avatar, returning how many ability
    /// activations it triggered.
    fn handle_gameplay_event(&mut self, _event: &GameplayTag, _value: &InputValue) -> u32 {
        0
    }

    fn switch_state(&self, _switch: &GameplayTag) -> bool {
        false
    }
    fn set_switch_state(&mut self, _switch: &GameplayTag, _state: bool) {}
}

/// One-way remote-execution channel between the owning client and the
/// authority, plus the role queries the routing decision needs. Transport is
/// external; both sends are fire-and-forget.
pub trait EventForwarder {
    fn is_authority(&self) -> bool;
    fn is_local(&self) -> bool;
    fn send_to_authority(&self, event: &GameplayTag, value: &InputValue, action: &ActionId);
    fn send_to_owning_client(&self, event: &GameplayTag, value: &InputValue, action: &ActionId);
}

/// Everything a handler may reach during one dispatch call: the gameplay
/// target, the optional remote-execution channel, and any external command
/// buffers collaborating with the manager's own.
pub struct DispatchContext<'a> {
    pub target: &'a mut dyn InputTarget,
    pub forwarder: Option<&'a dyn EventForwarder>,
    pub external_buffers: &'a mut [CommandBuffer],
}

impl<'a> DispatchContext<'a> {
    /// A purely local context: no remote channel, no external buffers.
    pub fn new(target: &'a mut dyn InputTarget) -> Self {
        Self {
            target,
            forwarder: None,
            external_buffers: &mut [],
        }
    }

    pub fn with_forwarder(mut self, forwarder: &'a dyn EventForwarder) -> Self {
        self.forwarder = Some(forwarder);
        self
    }

    pub fn with_external_buffers(mut self, buffers: &'a mut [CommandBuffer]) -> Self {
        self.external_buffers = buffers;
        self
    }

    /// Routes a gameplay event between the local peer, the authority and the
    /// owning client.
    ///
    /// The event executes locally when it was requested locally on a locally
    /// controlled peer, or requested on the authority while being the
    /// authority. It is then forwarded across the channel when the other peer
    /// also asked for it. Without a forwarder the context counts as a
    /// standalone peer: local and authoritative at once.
    ///
    /// Returns the number of ability activations triggered locally.
    pub fn send_gameplay_event(
        &mut self,
        event: &GameplayTag,
        value: &InputValue,
        action: &ActionId,
        send_locally: bool,
        send_to_server: bool,
    ) -> u32 {
        let (is_local, is_authority) = match self.forwarder {
            Some(forwarder) => (forwarder.is_local(), forwarder.is_authority()),
            None => (true, true),
        };

        let mut activations = 0;
        if (send_locally && is_local) || (send_to_server && is_authority) {
            activations = self.target.handle_gameplay_event(event, value);
        }

        if let Some(forwarder) = self.forwarder {
            if is_local && send_to_server && !is_authority {
                forwarder.send_to_authority(event, value, action);
            }
            if is_authority && send_locally && !is_local {
                forwarder.send_to_owning_client(event, value, action);
            }
        }

        activations
    }
}

/// A unit of gameplay response bound to one or more (action, trigger event)
/// pairs. Handlers are shared read-only between the setup that owns them and
/// every manager dispatching through that setup, so implementations keep
/// their configuration immutable and push all state onto the target.
pub trait InputHandler: Send + Sync {
    /// Actions this handler recognizes.
    fn actions(&self) -> &[ActionId];

    /// Trigger kinds this handler recognizes.
    fn trigger_events(&self) -> &[TriggerEvent];

    /// Short name used in logs.
    fn name(&self) -> &str {
        "input handler"
    }

    /// Whether dispatch may defer this handler into an open command buffer.
    fn can_be_buffered(&self) -> bool {
        false
    }

    /// Default rule: a real trigger kind, a recognized action and a recognized
    /// kind. Implementations may narrow this further (tag state and similar),
    /// never widen it.
    fn can_handle(&self, trigger: TriggerEvent, action: &ActionId) -> bool {
        !trigger.is_none()
            && self.actions().contains(action)
            && self.trigger_events().contains(&trigger)
    }

    /// Dispatches to the per-event callback for `trigger`. An unrecognized
    /// kind logs a warning and does nothing.
    fn handle(
        &self,
        ctx: &mut DispatchContext<'_>,
        value: &InputValue,
        trigger: TriggerEvent,
        action: &ActionId,
    ) {
        match trigger {
            TriggerEvent::Triggered => self.handle_triggered(ctx, value, action),
            TriggerEvent::Started => self.handle_started(ctx, value, action),
            TriggerEvent::Ongoing => self.handle_ongoing(ctx, value, action),
            TriggerEvent::Canceled => self.handle_canceled(ctx, value, action),
            TriggerEvent::Completed => self.handle_completed(ctx, value, action),
            TriggerEvent::None => {
                warn!(
                    handler = self.name(),
                    %action,
                    "unable to handle trigger event 'None'"
                );
            }
        }
    }

    fn handle_started(&self, _ctx: &mut DispatchContext<'_>, _value: &InputValue, _action: &ActionId) {
    }

    fn handle_ongoing(&self, _ctx: &mut DispatchContext<'_>, _value: &InputValue, _action: &ActionId) {
    }

    fn handle_triggered(
        &self,
        _ctx: &mut DispatchContext<'_>,
        _value: &InputValue,
        _action: &ActionId,
    ) {
    }

    fn handle_completed(
        &self,
        _ctx: &mut DispatchContext<'_>,
        _value: &InputValue,
        _action: &ActionId,
    ) {
    }

    fn handle_canceled(
        &self,
        _ctx: &mut DispatchContext<'_>,
        _value: &InputValue,
        _action: &ActionId,
    ) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareHandler {
        actions: Vec<ActionId>,
        events: Vec<TriggerEvent>,
    }

    impl InputHandler for BareHandler {
        fn actions(&self) -> &[ActionId] {
            &self.actions
        }

        fn trigger_events(&self) -> &[TriggerEvent] {
            &self.events
        }
    }

    struct NullTarget;
    impl InputTarget for NullTarget {}

    #[test]
    fn default_can_handle_requires_recognized_pair() {
        let handler = BareHandler {
            actions: vec![ActionId::from_static("jump")],
            events: vec![TriggerEvent::Triggered],
        };

        let jump = ActionId::from_static("jump");
        let walk = ActionId::from_static("walk");
        assert!(handler.can_handle(TriggerEvent::Triggered, &jump));
        assert!(!handler.can_handle(TriggerEvent::Completed, &jump));
        assert!(!handler.can_handle(TriggerEvent::Triggered, &walk));
        assert!(!handler.can_handle(TriggerEvent::None, &jump));
    }

    #[test]
    fn standalone_context_executes_locally() {
        struct CountingTarget(u32);
        impl InputTarget for CountingTarget {
            fn handle_gameplay_event(&mut self, _event: &GameplayTag, _value: &InputValue) -> u32 {
                self.0 += 1;
                1
            }
        }

        let mut target = CountingTarget(0);
        let mut ctx = DispatchContext::new(&mut target);
        let activations = ctx.send_gameplay_event(
            &GameplayTag::from_static("event.test"),
            &InputValue::Bool(true),
            &ActionId::from_static("test"),
            true,
            false,
        );
        assert_eq!(activations, 1);
        assert_eq!(target.0, 1);
    }

    #[test]
    fn authority_forwards_local_events_to_owning_client() {
        use std::sync::atomic::{AtomicU32, Ordering};

        #[derive(Default)]
        struct RecordingForwarder {
            to_client: AtomicU32,
            to_authority: AtomicU32,
        }

        impl EventForwarder for RecordingForwarder {
            fn is_authority(&self) -> bool {
                true
            }
            fn is_local(&self) -> bool {
                false
            }
            fn send_to_authority(&self, _: &GameplayTag, _: &InputValue, _: &ActionId) {
                self.to_authority.fetch_add(1, Ordering::Relaxed);
            }
            fn send_to_owning_client(&self, _: &GameplayTag, _: &InputValue, _: &ActionId) {
                self.to_client.fetch_add(1, Ordering::Relaxed);
            }
        }

        let forwarder = RecordingForwarder::default();
        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target).with_forwarder(&forwarder);
        ctx.send_gameplay_event(
            &GameplayTag::from_static("event.test"),
            &InputValue::Bool(true),
            &ActionId::from_static("test"),
            true,
            true,
        );

        assert_eq!(forwarder.to_client.load(Ordering::Relaxed), 1);
        assert_eq!(forwarder.to_authority.load(Ordering::Relaxed), 0);
    }
}
