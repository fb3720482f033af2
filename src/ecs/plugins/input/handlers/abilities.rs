//! Handlers bridging input to the ability layer: activation, interruption,
//! raw gameplay events and boolean state switches.

use tracing::{debug, warn};

use crate::ecs::plugins::input::action::{ActionId, GameplayTag, InputValue, TriggerEvent};
use crate::ecs::plugins::input::handler::{DispatchContext, InputHandler};

/// Drives one ability from a button action. Pressing activates (or, when the
/// ability is already running, optionally sends its active event and/or
/// cancels in toggle mode); releasing, completing or cancelling the input
/// cancels the ability.
///
/// Activation commonly happens while another ability still commits the
/// avatar, so this handler is bufferable by default.
pub struct AbilityActivationHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    ability_tag: GameplayTag,
    toggled_activation: bool,
    active_event_tag: Option<GameplayTag>,
    trigger_event_locally: bool,
    trigger_event_on_server: bool,
}

impl AbilityActivationHandler {
    pub fn new(action: ActionId, ability_tag: GameplayTag) -> Self {
        Self {
            actions: vec![action],
            events: vec![
                TriggerEvent::Triggered,
                TriggerEvent::Completed,
                TriggerEvent::Canceled,
            ],
            ability_tag,
            toggled_activation: false,
            active_event_tag: None,
            trigger_event_locally: true,
            trigger_event_on_server: true,
        }
    }

    /// Pressing again while active cancels instead of re-activating.
    pub fn with_toggle(mut self) -> Self {
        self.toggled_activation = true;
        self
    }

    /// Event to send when the action fires while the ability is active.
    pub fn with_active_event(mut self, event: GameplayTag) -> Self {
        self.active_event_tag = Some(event);
        self
    }

    fn try_handle_active(
        &self,
        ctx: &mut DispatchContext<'_>,
        value: &InputValue,
        action: &ActionId,
    ) -> bool {
        if !ctx.target.has_active_ability(&self.ability_tag) {
            return false;
        }

        if let Some(event) = &self.active_event_tag {
            ctx.send_gameplay_event(
                event,
                value,
                action,
                self.trigger_event_locally,
                self.trigger_event_on_server,
            );
        }
        if self.toggled_activation {
            ctx.target.cancel_ability(&self.ability_tag);
        }

        true
    }

    fn cancel(&self, ctx: &mut DispatchContext<'_>) {
        ctx.target.cancel_ability(&self.ability_tag);
    }
}

impl InputHandler for AbilityActivationHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "ability activation"
    }

    fn can_be_buffered(&self) -> bool {
        true
    }

    fn handle_triggered(
        &self,
        ctx: &mut DispatchContext<'_>,
        value: &InputValue,
        action: &ActionId,
    ) {
        let Some(pressed) = value.as_bool() else {
            warn!(
                %action,
                ?value,
                "invalid value type for ability activation, expected a boolean"
            );
            return;
        };

        if pressed {
            if !self.try_handle_active(ctx, value, action)
                && !ctx.target.try_activate_ability(&self.ability_tag)
            {
                debug!(ability = %self.ability_tag, "ability activation rejected");
            }
        } else {
            self.cancel(ctx);
        }
    }

    fn handle_completed(&self, ctx: &mut DispatchContext<'_>, _: &InputValue, _: &ActionId) {
        self.cancel(ctx);
    }

    fn handle_canceled(&self, ctx: &mut DispatchContext<'_>, _: &InputValue, _: &ActionId) {
        self.cancel(ctx);
    }
}

/// Cancels a set of abilities the moment its action triggers. Runs
/// unbuffered on purpose: an interrupt that waits in the buffer is not an
/// interrupt.
pub struct AbilityInterruptHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    interrupted_abilities: Vec<GameplayTag>,
}

impl AbilityInterruptHandler {
    pub fn new(action: ActionId, interrupted_abilities: Vec<GameplayTag>) -> Self {
        Self {
            actions: vec![action],
            events: vec![TriggerEvent::Triggered],
            interrupted_abilities,
        }
    }
}

impl InputHandler for AbilityInterruptHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "ability interrupt"
    }

    fn handle_triggered(&self, ctx: &mut DispatchContext<'_>, _: &InputValue, _: &ActionId) {
        for ability in &self.interrupted_abilities {
            if ctx.target.cancel_ability(ability) {
                debug!(%ability, "ability interrupted by input");
            }
        }
    }
}

/// Sends a configured gameplay event when its action triggers, routed through
/// the remote-execution channel like any other gameplay event.
pub struct GameplayEventHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    event_tag: GameplayTag,
    send_locally: bool,
    send_to_server: bool,
}

impl GameplayEventHandler {
    pub fn new(action: ActionId, event_tag: GameplayTag) -> Self {
        Self {
            actions: vec![action],
            events: vec![TriggerEvent::Triggered],
            event_tag,
            send_locally: true,
            send_to_server: true,
        }
    }
}

impl InputHandler for GameplayEventHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "gameplay event"
    }

    fn handle_triggered(
        &self,
        ctx: &mut DispatchContext<'_>,
        value: &InputValue,
        action: &ActionId,
    ) {
        ctx.send_gameplay_event(
            &self.event_tag,
            value,
            action,
            self.send_locally,
            self.send_to_server,
        );
    }
}

/// Flips a boolean switch on the target, keyed by tag: walk/run, lock-on and
/// similar toggles.
pub struct StateSwitchHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    switch_tag: GameplayTag,
}

impl StateSwitchHandler {
    pub fn new(action: ActionId, switch_tag: GameplayTag) -> Self {
        Self {
            actions: vec![action],
            events: vec![TriggerEvent::Triggered],
            switch_tag,
        }
    }
}

impl InputHandler for StateSwitchHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "state switch"
    }

    fn handle_triggered(&self, ctx: &mut DispatchContext<'_>, _: &InputValue, _: &ActionId) {
        let state = !ctx.target.switch_state(&self.switch_tag);
        ctx.target.set_switch_state(&self.switch_tag, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::plugins::input::handler::InputTarget;
    use std::collections::HashMap;

    #[derive(Default)]
    struct StubAvatar {
        active: Option<GameplayTag>,
        activations: u32,
        cancellations: u32,
        events: Vec<GameplayTag>,
        switches: HashMap<GameplayTag, bool>,
    }

    impl InputTarget for StubAvatar {
        fn try_activate_ability(&mut self, ability: &GameplayTag) -> bool {
            if self.active.is_some() {
                return false;
            }
            self.active = Some(ability.clone());
            self.activations += 1;
            true
        }

        fn cancel_ability(&mut self, ability: &GameplayTag) -> bool {
            if self.active.as_ref() == Some(ability) {
                self.active = None;
                self.cancellations += 1;
                return true;
            }
            false
        }

        fn has_active_ability(&self, ability: &GameplayTag) -> bool {
            self.active.as_ref() == Some(ability)
        }

        fn handle_gameplay_event(&mut self, event: &GameplayTag, _: &InputValue) -> u32 {
            self.events.push(event.clone());
            0
        }

        fn switch_state(&self, switch: &GameplayTag) -> bool {
            self.switches.get(switch).copied().unwrap_or(false)
        }

        fn set_switch_state(&mut self, switch: &GameplayTag, state: bool) {
            self.switches.insert(switch.clone(), state);
        }
    }

    fn attack() -> GameplayTag {
        GameplayTag::from_static("ability.attack")
    }

    fn action() -> ActionId {
        ActionId::from_static("attack")
    }

    #[test]
    fn press_activates_and_release_cancels() {
        let handler = AbilityActivationHandler::new(action(), attack());
        let mut avatar = StubAvatar::default();

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &action(),
        );
        assert!(avatar.has_active_ability(&attack()));

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(false),
            &action(),
        );
        assert!(!avatar.has_active_ability(&attack()));
        assert_eq!(avatar.cancellations, 1);
    }

    #[test]
    fn toggle_mode_cancels_on_second_press() {
        let handler = AbilityActivationHandler::new(action(), attack()).with_toggle();
        let mut avatar = StubAvatar::default();

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &action(),
        );
        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &action(),
        );

        assert!(!avatar.has_active_ability(&attack()));
        assert_eq!(avatar.activations, 1);
        assert_eq!(avatar.cancellations, 1);
    }

    #[test]
    fn active_event_fires_instead_of_reactivating() {
        let combo = GameplayTag::from_static("event.combo");
        let handler =
            AbilityActivationHandler::new(action(), attack()).with_active_event(combo.clone());
        let mut avatar = StubAvatar::default();

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &action(),
        );
        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &action(),
        );

        assert_eq!(avatar.activations, 1);
        assert_eq!(avatar.events, vec![combo]);
    }

    #[test]
    fn non_boolean_payloads_are_ignored() {
        let handler = AbilityActivationHandler::new(action(), attack());
        let mut avatar = StubAvatar::default();

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Axis1D(1.0),
            &action(),
        );

        assert_eq!(avatar.activations, 0);
    }

    #[test]
    fn interrupt_cancels_only_running_abilities() {
        let handler = AbilityInterruptHandler::new(
            ActionId::from_static("guard"),
            vec![attack(), GameplayTag::from_static("ability.dodge")],
        );
        let mut avatar = StubAvatar::default();
        avatar.try_activate_ability(&attack());

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &ActionId::from_static("guard"),
        );

        assert!(avatar.active.is_none());
        assert_eq!(avatar.cancellations, 1);
    }

    #[test]
    fn state_switch_flips() {
        let walk = GameplayTag::from_static("state.walk");
        let handler = StateSwitchHandler::new(ActionId::from_static("walk"), walk.clone());
        let mut avatar = StubAvatar::default();

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &ActionId::from_static("walk"),
        );
        assert!(avatar.switch_state(&walk));

        handler.handle_triggered(
            &mut DispatchContext::new(&mut avatar),
            &InputValue::Bool(true),
            &ActionId::from_static("walk"),
        );
        assert!(!avatar.switch_state(&walk));
    }
}
