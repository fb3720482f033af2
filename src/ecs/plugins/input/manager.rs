use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::ecs::plugins::input::action::{ActionId, InputValue, TriggerEvent};
use crate::ecs::plugins::input::bindings::{
    BindingSubsystem, ProcessedBinding, ProcessedSetup,
};
use crate::ecs::plugins::input::buffer::{BufferedCommand, CommandBuffer};
use crate::ecs::plugins::input::context::ContextId;
use crate::ecs::plugins::input::handler::DispatchContext;
use crate::ecs::plugins::input::settings::InputSettings;
use crate::ecs::plugins::input::setup::{InputSetup, SetupId};

/// Orchestrates input setups for one avatar: registers mapping contexts with
/// the binding subsystem, dispatches trigger events to the handlers of every
/// processed setup, and defers bufferable handlers into a command buffer
/// while a buffering window is open.
///
/// The processed-setup table and the command buffer are owned exclusively by
/// this manager; all mutation goes through the registration, removal and
/// dispatch API.
pub struct InputManager {
    settings: InputSettings,
    setups: Vec<ProcessedSetup>,
    buffer: CommandBuffer,
}

impl InputManager {
    pub fn new(settings: InputSettings) -> Self {
        let buffer = CommandBuffer::new(settings.buffer_mode);
        Self {
            settings,
            setups: Vec::new(),
            buffer,
        }
    }

    pub fn settings(&self) -> &InputSettings {
        &self.settings
    }

    pub fn setup_count(&self) -> usize {
        self.setups.len()
    }

    pub fn has_setup(&self, id: &SetupId) -> bool {
        self.setups.iter().any(|setup| setup.source.id() == id)
    }

    pub fn has_context(&self, id: &ContextId) -> bool {
        self.setup_for_context(id).is_some()
    }

    /// Whether any processed setup would respond to the given pair.
    pub fn has_compatible_handler(&self, trigger: TriggerEvent, action: &ActionId) -> bool {
        self.setups
            .iter()
            .any(|setup| setup.source.has_compatible_handler(trigger, action))
    }

    // Buffer control, driven by the ability layer.

    pub fn is_buffer_open(&self) -> bool {
        self.buffer.is_open()
    }

    pub fn buffered_commands(&self) -> usize {
        self.buffer.len()
    }

    pub fn open_buffer(&mut self) {
        self.buffer.open();
    }

    pub fn close_buffer(&mut self, cancelled: bool, ctx: &mut DispatchContext<'_>) {
        self.buffer.close(cancelled, ctx);
    }

    /// Registers a setup descriptor. Either a fully bound processed setup
    /// exists afterwards, or nothing does: duplicate descriptors, duplicate
    /// contexts and setups yielding zero bindings are logged and leave prior
    /// state untouched.
    pub fn add_setup(&mut self, setup: &Arc<InputSetup>, subsystem: &mut dyn BindingSubsystem) {
        if self.has_setup(setup.id()) {
            warn!(setup = %setup.id(), "received a duplicated input setup");
            return;
        }

        let context_id = setup.context().id();
        if let Some(original) = self.setup_for_context(context_id) {
            warn!(
                context = %context_id,
                original = %original.source.id(),
                provided = %setup.id(),
                "mapping context is already registered by another setup"
            );
            return;
        }
        if subsystem.has_context(context_id) {
            warn!(
                context = %context_id,
                setup = %setup.id(),
                "mapping context is already active in the binding subsystem"
            );
            return;
        }

        let bindings = self.bind_context(setup, subsystem);
        if bindings.is_empty() {
            // A context without a single binding is pointless; roll the
            // registration back so it can be added again later.
            subsystem.unregister_context(context_id);
            warn!(setup = %setup.id(), "discarded input setup as it has no bindings");
            return;
        }

        debug!(setup = %setup.id(), bindings = bindings.len(), "added input setup");
        self.setups.push(ProcessedSetup {
            source: Arc::clone(setup),
            bindings,
        });
    }

    /// Removes a previously registered setup: purges its handlers from the
    /// command buffer, releases its bindings and unregisters its context.
    ///
    /// `subsystem` is `None` when the binding infrastructure is already gone
    /// (shutdown teardown); bookkeeping is erased regardless. Silent no-op
    /// for unknown setups.
    pub fn remove_setup(&mut self, id: &SetupId, subsystem: Option<&mut (dyn BindingSubsystem + '_)>) {
        let Some(index) = self.setups.iter().position(|setup| setup.source.id() == id) else {
            return;
        };
        let processed = self.setups.remove(index);

        // Buffered handlers from this setup must never execute later.
        self.buffer.purge_handlers(processed.source.handlers());

        if let Some(subsystem) = subsystem {
            for binding in &processed.bindings {
                subsystem.unbind(binding.handle);
            }
            subsystem.unregister_context(processed.source.context().id());
        }

        debug!(setup = %id, "removed input setup");
    }

    /// Removes every registered setup, iterating over a snapshot of the ids
    /// so removal never mutates the table it walks.
    pub fn clear_all_setups(&mut self, mut subsystem: Option<&mut (dyn BindingSubsystem + '_)>) {
        let ids: Vec<SetupId> = self
            .setups
            .iter()
            .map(|setup| setup.source.id().clone())
            .collect();

        for id in ids {
            if self.has_setup(&id) {
                self.remove_setup(&id, subsystem.as_deref_mut());
            }
        }
    }

    // Dispatch entry points. The kind reported inside a raw event payload is
    // unreliable when several kinds fire within one update, so each entry
    // point passes its own explicit kind to the shared routine.

    pub fn dispatch_started(
        &mut self,
        action: &ActionId,
        value: &InputValue,
        ctx: &mut DispatchContext<'_>,
    ) {
        self.dispatch(TriggerEvent::Started, action, value, ctx);
    }

    pub fn dispatch_ongoing(
        &mut self,
        action: &ActionId,
        value: &InputValue,
        ctx: &mut DispatchContext<'_>,
    ) {
        self.dispatch(TriggerEvent::Ongoing, action, value, ctx);
    }

    pub fn dispatch_triggered(
        &mut self,
        action: &ActionId,
        value: &InputValue,
        ctx: &mut DispatchContext<'_>,
    ) {
        self.dispatch(TriggerEvent::Triggered, action, value, ctx);
    }

    pub fn dispatch_completed(
        &mut self,
        action: &ActionId,
        value: &InputValue,
        ctx: &mut DispatchContext<'_>,
    ) {
        self.dispatch(TriggerEvent::Completed, action, value, ctx);
    }

    pub fn dispatch_canceled(
        &mut self,
        action: &ActionId,
        value: &InputValue,
        ctx: &mut DispatchContext<'_>,
    ) {
        self.dispatch(TriggerEvent::Canceled, action, value, ctx);
    }

    fn dispatch(
        &mut self,
        trigger: TriggerEvent,
        action: &ActionId,
        value: &InputValue,
        ctx: &mut DispatchContext<'_>,
    ) {
        debug_assert!(!trigger.is_none(), "dispatch requires a real trigger kind");

        if self.settings.log_dispatched_events {
            trace!(%action, %trigger, ?value, "dispatching trigger event");
        }

        // Exactly one buffer is consulted per dispatch: the manager's own
        // when enabled, otherwise the first enabled external collaborator.
        let own_enabled = self.buffer.is_enabled();
        let buffering = if own_enabled {
            self.buffer.is_open()
        } else {
            ctx.external_buffers
                .iter()
                .find(|buffer| buffer.is_enabled())
                .is_some_and(CommandBuffer::is_open)
        };

        let mut candidates: Vec<BufferedCommand> = Vec::new();
        for processed in &self.setups {
            for handler in processed.source.handlers() {
                if !handler.can_handle(trigger, action) {
                    continue;
                }

                if buffering && handler.can_be_buffered() {
                    let command =
                        BufferedCommand::new(action.clone(), Arc::clone(handler), *value, trigger);
                    if !candidates.contains(&command) {
                        candidates.push(command);
                    }
                } else {
                    handler.handle(ctx, value, trigger, action);
                }
            }
        }

        let buffer = if own_enabled {
            Some(&mut self.buffer)
        } else {
            ctx.external_buffers
                .iter_mut()
                .find(|buffer| buffer.is_enabled())
        };
        if let Some(buffer) = buffer {
            buffer.buffer_commands(candidates);
        }
    }

    fn setup_for_context(&self, id: &ContextId) -> Option<&ProcessedSetup> {
        self.setups
            .iter()
            .find(|setup| setup.source.context().id() == id)
    }

    fn bind_context(
        &self,
        setup: &InputSetup,
        subsystem: &mut dyn BindingSubsystem,
    ) -> Vec<ProcessedBinding> {
        subsystem.register_context(setup.context(), setup.priority());

        let actions = setup.context().unique_actions();
        let mut bindings = Vec::with_capacity(actions.len() * self.settings.tracked_events.len());
        for action in &actions {
            for &event in &self.settings.tracked_events {
                if event.is_none() {
                    warn!(%action, "unable to track trigger event 'None'");
                    continue;
                }
                if let Some(handle) = subsystem.bind(action, event) {
                    bindings.push(ProcessedBinding {
                        action: action.clone(),
                        event,
                        handle,
                    });
                }
            }
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::plugins::input::buffer::BufferMode;
    use crate::ecs::plugins::input::context::MappingContext;
    use crate::ecs::plugins::input::handler::{InputHandler, InputTarget};
    use bevy::math::Vec2;
    use std::sync::Mutex;

    use crate::ecs::plugins::input::bindings::BindingHandle;

    // Minimal binding subsystem that records what the manager asks of it.
    #[derive(Default)]
    struct TestBindings {
        contexts: Vec<ContextId>,
        bound: Vec<(ActionId, TriggerEvent, BindingHandle)>,
        next_handle: u64,
    }

    impl BindingSubsystem for TestBindings {
        fn register_context(&mut self, context: &MappingContext, _priority: i32) {
            self.contexts.push(context.id().clone());
        }

        fn unregister_context(&mut self, context: &ContextId) {
            self.contexts.retain(|existing| existing != context);
        }

        fn bind(&mut self, action: &ActionId, event: TriggerEvent) -> Option<BindingHandle> {
            self.next_handle += 1;
            let handle = BindingHandle::from_raw(self.next_handle);
            self.bound.push((action.clone(), event, handle));
            Some(handle)
        }

        fn unbind(&mut self, handle: BindingHandle) {
            self.bound.retain(|(_, _, existing)| *existing != handle);
        }

        fn has_context(&self, context: &ContextId) -> bool {
            self.contexts.contains(context)
        }
    }

    struct NullTarget;
    impl InputTarget for NullTarget {}

    type CallLog = Arc<Mutex<Vec<(String, TriggerEvent, f32)>>>;

    struct RecordingHandler {
        label: &'static str,
        actions: Vec<ActionId>,
        events: Vec<TriggerEvent>,
        bufferable: bool,
        log: CallLog,
    }

    impl RecordingHandler {
        fn new(
            label: &'static str,
            action: &'static str,
            events: Vec<TriggerEvent>,
            bufferable: bool,
            log: &CallLog,
        ) -> Arc<Self> {
            Arc::new(Self {
                label,
                actions: vec![ActionId::from_static(action)],
                events,
                bufferable,
                log: Arc::clone(log),
            })
        }

        fn record(&self, trigger: TriggerEvent, value: &InputValue) {
            self.log
                .lock()
                .unwrap()
                .push((format!("{}:{}", self.label, trigger), trigger, value.axis1()));
        }
    }

    impl InputHandler for RecordingHandler {
        fn actions(&self) -> &[ActionId] {
            &self.actions
        }

        fn trigger_events(&self) -> &[TriggerEvent] {
            &self.events
        }

        fn name(&self) -> &str {
            self.label
        }

        fn can_be_buffered(&self) -> bool {
            self.bufferable
        }

        fn handle_started(&self, _: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
            self.record(TriggerEvent::Started, value);
        }

        fn handle_ongoing(&self, _: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
            self.record(TriggerEvent::Ongoing, value);
        }

        fn handle_triggered(&self, _: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
            self.record(TriggerEvent::Triggered, value);
        }

        fn handle_completed(&self, _: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
            self.record(TriggerEvent::Completed, value);
        }

        fn handle_canceled(&self, _: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
            self.record(TriggerEvent::Canceled, value);
        }
    }

    fn locomotion_context() -> Arc<MappingContext> {
        Arc::new(
            MappingContext::new(ContextId::from_static("locomotion"))
                .with_mapping("LeftStick", ActionId::from_static("move"))
                .with_mapping("Space", ActionId::from_static("jump"))
                .with_mapping("GamepadFaceBottom", ActionId::from_static("jump")),
        )
    }

    fn manager() -> InputManager {
        InputManager::new(InputSettings::default())
    }

    #[test]
    fn readding_a_setup_is_a_no_op() {
        let log = CallLog::default();
        let handler = RecordingHandler::new(
            "move",
            "move",
            vec![TriggerEvent::Triggered],
            false,
            &log,
        );
        let setup = InputSetup::new(
            SetupId::from_static("locomotion"),
            locomotion_context(),
            vec![handler],
            0,
        );

        let mut manager = manager();
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);
        assert_eq!(manager.setup_count(), 1);
        let bound_before = bindings.bound.len();

        manager.add_setup(&setup, &mut bindings);
        assert_eq!(manager.setup_count(), 1);
        assert_eq!(bindings.bound.len(), bound_before);
        assert_eq!(bindings.contexts.len(), 1);
    }

    #[test]
    fn a_context_registers_at_most_once() {
        let log = CallLog::default();
        let handler = RecordingHandler::new(
            "move",
            "move",
            vec![TriggerEvent::Triggered],
            false,
            &log,
        );
        let context = locomotion_context();
        let first = InputSetup::new(
            SetupId::from_static("first"),
            Arc::clone(&context),
            vec![Arc::clone(&handler) as Arc<dyn InputHandler>],
            0,
        );
        let second = InputSetup::new(
            SetupId::from_static("second"),
            context,
            vec![handler],
            5,
        );

        let mut manager = manager();
        let mut bindings = TestBindings::default();
        manager.add_setup(&first, &mut bindings);
        manager.add_setup(&second, &mut bindings);

        assert_eq!(manager.setup_count(), 1);
        assert!(manager.has_setup(&SetupId::from_static("first")));
        assert!(!manager.has_setup(&SetupId::from_static("second")));
    }

    #[test]
    fn zero_binding_registration_rolls_back() {
        let log = CallLog::default();
        let handler = RecordingHandler::new(
            "move",
            "move",
            vec![TriggerEvent::Triggered],
            false,
            &log,
        );
        // A context with no key mappings produces no unique actions, hence no
        // bindings.
        let empty_context = Arc::new(MappingContext::new(ContextId::from_static("empty")));
        let setup = InputSetup::new(
            SetupId::from_static("pointless"),
            empty_context,
            vec![handler],
            0,
        );

        let mut manager = manager();
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);

        assert!(!manager.has_setup(&SetupId::from_static("pointless")));
        assert!(!bindings.has_context(&ContextId::from_static("empty")));
        assert_eq!(manager.setup_count(), 0);
    }

    #[test]
    fn tracked_none_events_are_skipped() {
        let log = CallLog::default();
        let handler = RecordingHandler::new(
            "move",
            "move",
            vec![TriggerEvent::Triggered],
            false,
            &log,
        );
        let mut settings = InputSettings::default();
        settings.tracked_events = vec![TriggerEvent::None, TriggerEvent::Triggered];
        let setup = InputSetup::new(
            SetupId::from_static("locomotion"),
            locomotion_context(),
            vec![handler],
            0,
        );

        let mut manager = InputManager::new(settings);
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);

        // Two unique actions, one trackable event each.
        assert_eq!(bindings.bound.len(), 2);
    }

    #[test]
    fn removal_tolerates_a_dead_binding_subsystem() {
        let log = CallLog::default();
        let handler = RecordingHandler::new(
            "move",
            "move",
            vec![TriggerEvent::Triggered],
            false,
            &log,
        );
        let setup = InputSetup::new(
            SetupId::from_static("locomotion"),
            locomotion_context(),
            vec![handler],
            0,
        );

        let mut manager = manager();
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);

        manager.remove_setup(&SetupId::from_static("locomotion"), None);
        assert_eq!(manager.setup_count(), 0);
        assert!(!manager.has_setup(&SetupId::from_static("locomotion")));
    }

    #[test]
    fn dispatch_reaches_only_compatible_handlers() {
        // Move recognizes {Triggered, Ongoing} on "move"; Jump recognizes
        // {Triggered, Completed} on "jump".
        let log = CallLog::default();
        let move_handler = RecordingHandler::new(
            "Move",
            "move",
            vec![TriggerEvent::Triggered, TriggerEvent::Ongoing],
            false,
            &log,
        );
        let jump_handler = RecordingHandler::new(
            "Jump",
            "jump",
            vec![TriggerEvent::Triggered, TriggerEvent::Completed],
            false,
            &log,
        );
        let setup = InputSetup::new(
            SetupId::from_static("locomotion"),
            locomotion_context(),
            vec![move_handler, jump_handler],
            0,
        );

        let mut manager = manager();
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);

        assert!(manager.has_compatible_handler(TriggerEvent::Ongoing, &ActionId::from_static("move")));
        assert!(!manager.has_compatible_handler(TriggerEvent::Started, &ActionId::from_static("move")));

        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target);
        manager.dispatch_triggered(
            &ActionId::from_static("move"),
            &InputValue::Axis2D(Vec2::new(1.0, 0.0)),
            &mut ctx,
        );
        manager.dispatch_completed(
            &ActionId::from_static("jump"),
            &InputValue::Bool(false),
            &mut ctx,
        );

        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "Move:Triggered");
        assert_eq!(calls[1].0, "Jump:Completed");
    }

    fn buffered_fixture(
        labels: &[&'static str],
        log: &CallLog,
    ) -> (InputManager, TestBindings) {
        let handlers: Vec<Arc<dyn InputHandler>> = labels
            .iter()
            .map(|label| {
                RecordingHandler::new(label, "attack", vec![TriggerEvent::Triggered], true, log)
                    as Arc<dyn InputHandler>
            })
            .collect();
        let context = Arc::new(
            MappingContext::new(ContextId::from_static("combat"))
                .with_mapping("LeftMouse", ActionId::from_static("attack")),
        );
        let setup = InputSetup::new(SetupId::from_static("combat"), context, handlers, 0);

        let mut manager = manager();
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);
        (manager, bindings)
    }

    #[test]
    fn flush_executes_in_insertion_order_and_empties_the_buffer() {
        let log = CallLog::default();
        let (mut manager, _bindings) = buffered_fixture(&["C1", "C2", "C3"], &log);

        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target);
        manager.open_buffer();
        manager.dispatch_triggered(
            &ActionId::from_static("attack"),
            &InputValue::Bool(true),
            &mut ctx,
        );
        assert_eq!(manager.buffered_commands(), 3);
        assert!(log.lock().unwrap().is_empty());

        manager.close_buffer(false, &mut ctx);
        let calls = log.lock().unwrap();
        let order: Vec<&str> = calls.iter().map(|entry| entry.0.as_str()).collect();
        assert_eq!(order, vec!["C1:Triggered", "C2:Triggered", "C3:Triggered"]);
        drop(calls);
        assert_eq!(manager.buffered_commands(), 0);
    }

    #[test]
    fn cancelled_close_discards_without_executing() {
        let log = CallLog::default();
        let (mut manager, _bindings) = buffered_fixture(&["C"], &log);

        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target);
        manager.open_buffer();
        manager.dispatch_triggered(
            &ActionId::from_static("attack"),
            &InputValue::Bool(true),
            &mut ctx,
        );
        assert_eq!(manager.buffered_commands(), 1);

        manager.close_buffer(true, &mut ctx);
        assert!(log.lock().unwrap().is_empty());
        assert_eq!(manager.buffered_commands(), 0);
    }

    #[test]
    fn last_command_policy_keeps_the_latest_payload() {
        let log = CallLog::default();
        let (mut manager, _bindings) = buffered_fixture(&["C"], &log);

        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target);
        manager.open_buffer();
        manager.dispatch_triggered(
            &ActionId::from_static("attack"),
            &InputValue::Axis1D(5.0),
            &mut ctx,
        );
        manager.dispatch_triggered(
            &ActionId::from_static("attack"),
            &InputValue::Axis1D(9.0),
            &mut ctx,
        );
        assert_eq!(manager.buffered_commands(), 1);

        manager.close_buffer(false, &mut ctx);
        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].2, 9.0);
    }

    #[test]
    fn first_command_policy_keeps_the_first_batch() {
        let log = CallLog::default();
        let first = RecordingHandler::new("B1", "attack", vec![TriggerEvent::Triggered], true, &log);
        let second = RecordingHandler::new("B2", "guard", vec![TriggerEvent::Triggered], true, &log);
        let context = Arc::new(
            MappingContext::new(ContextId::from_static("combat"))
                .with_mapping("LeftMouse", ActionId::from_static("attack"))
                .with_mapping("RightMouse", ActionId::from_static("guard")),
        );
        let setup = InputSetup::new(
            SetupId::from_static("combat"),
            context,
            vec![
                first as Arc<dyn InputHandler>,
                second as Arc<dyn InputHandler>,
            ],
            0,
        );

        let mut settings = InputSettings::default();
        settings.buffer_mode = BufferMode::FirstCommand;
        let mut manager = InputManager::new(settings);
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);

        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target);
        manager.open_buffer();
        manager.dispatch_triggered(
            &ActionId::from_static("attack"),
            &InputValue::Bool(true),
            &mut ctx,
        );
        manager.dispatch_triggered(
            &ActionId::from_static("guard"),
            &InputValue::Bool(true),
            &mut ctx,
        );

        manager.close_buffer(false, &mut ctx);
        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "B1:Triggered");
    }

    #[test]
    fn removing_a_setup_purges_its_buffered_commands() {
        let log = CallLog::default();
        let (mut manager, mut bindings) = buffered_fixture(&["H"], &log);

        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target);
        manager.open_buffer();
        manager.dispatch_triggered(
            &ActionId::from_static("attack"),
            &InputValue::Bool(true),
            &mut ctx,
        );
        assert_eq!(manager.buffered_commands(), 1);

        manager.remove_setup(&SetupId::from_static("combat"), Some(&mut bindings));
        manager.close_buffer(false, &mut ctx);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn clear_all_setups_empties_the_table() {
        let log = CallLog::default();
        let move_handler = RecordingHandler::new(
            "move",
            "move",
            vec![TriggerEvent::Triggered],
            false,
            &log,
        );
        let attack_handler = RecordingHandler::new(
            "attack",
            "attack",
            vec![TriggerEvent::Triggered],
            true,
            &log,
        );
        let locomotion = InputSetup::new(
            SetupId::from_static("locomotion"),
            locomotion_context(),
            vec![move_handler],
            0,
        );
        let combat = InputSetup::new(
            SetupId::from_static("combat"),
            Arc::new(
                MappingContext::new(ContextId::from_static("combat"))
                    .with_mapping("LeftMouse", ActionId::from_static("attack")),
            ),
            vec![attack_handler],
            1,
        );

        let mut manager = manager();
        let mut bindings = TestBindings::default();
        manager.add_setup(&locomotion, &mut bindings);
        manager.add_setup(&combat, &mut bindings);
        assert_eq!(manager.setup_count(), 2);

        manager.clear_all_setups(Some(&mut bindings));
        assert_eq!(manager.setup_count(), 0);
        assert!(bindings.contexts.is_empty());
    }

    #[test]
    fn disabled_own_buffer_defers_to_an_external_collaborator() {
        let log = CallLog::default();
        let handler =
            RecordingHandler::new("H", "attack", vec![TriggerEvent::Triggered], true, &log);
        let context = Arc::new(
            MappingContext::new(ContextId::from_static("combat"))
                .with_mapping("LeftMouse", ActionId::from_static("attack")),
        );
        let setup = InputSetup::new(SetupId::from_static("combat"), context, vec![handler], 0);

        let mut settings = InputSettings::default();
        settings.buffer_mode = BufferMode::Disabled;
        let mut manager = InputManager::new(settings);
        let mut bindings = TestBindings::default();
        manager.add_setup(&setup, &mut bindings);

        let mut external = [CommandBuffer::new(BufferMode::LastCommand)];
        external[0].open();

        let mut target = NullTarget;
        let mut ctx = DispatchContext::new(&mut target).with_external_buffers(&mut external);
        manager.dispatch_triggered(
            &ActionId::from_static("attack"),
            &InputValue::Bool(true),
            &mut ctx,
        );

        assert_eq!(external[0].len(), 1);
        assert!(log.lock().unwrap().is_empty());
    }
}
