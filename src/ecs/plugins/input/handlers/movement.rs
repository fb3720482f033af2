//! Stock handlers for locomotion and camera control.
//!
//! Each handler is constructed with the action it listens for and takes its
//! blocking tags from [`InputSettings`], so different avatars can gate the
//! same handler type on different state.

use crate::ecs::plugins::input::action::{ActionId, GameplayTag, InputValue, TriggerEvent};
use crate::ecs::plugins::input::handler::{DispatchContext, InputHandler};
use crate::ecs::plugins::input::settings::InputSettings;

/// Applies directional movement input along the target's forward and right
/// reference vectors. Responds to Triggered and Ongoing so held sticks keep
/// feeding movement every update.
pub struct MoveHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    block_tags: Vec<GameplayTag>,
}

impl MoveHandler {
    pub fn new(action: ActionId, settings: &InputSettings) -> Self {
        Self {
            actions: vec![action],
            events: vec![TriggerEvent::Triggered, TriggerEvent::Ongoing],
            block_tags: vec![settings.block_movement_tag.clone()],
        }
    }

    fn apply(&self, ctx: &mut DispatchContext<'_>, value: &InputValue) {
        if value.magnitude() == 0.0 || ctx.target.has_any_tags(&self.block_tags) {
            return;
        }

        let direction = value.axis2();
        let forward = ctx.target.forward_vector();
        ctx.target.add_movement_input(forward, direction.y);
        let right = ctx.target.right_vector();
        ctx.target.add_movement_input(right, direction.x);
    }
}

impl InputHandler for MoveHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "move"
    }

    fn handle_triggered(&self, ctx: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
        self.apply(ctx, value);
    }

    fn handle_ongoing(&self, ctx: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
        self.apply(ctx, value);
    }
}

/// Feeds camera yaw/pitch input from a 2D axis.
pub struct LookHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    block_tags: Vec<GameplayTag>,
}

impl LookHandler {
    pub fn new(action: ActionId, settings: &InputSettings) -> Self {
        Self {
            actions: vec![action],
            events: vec![TriggerEvent::Triggered, TriggerEvent::Ongoing],
            block_tags: vec![settings.block_camera_tag.clone()],
        }
    }

    fn apply(&self, ctx: &mut DispatchContext<'_>, value: &InputValue) {
        if value.magnitude() == 0.0 || ctx.target.has_any_tags(&self.block_tags) {
            return;
        }

        let axis = value.axis2();
        ctx.target.add_rotation_input(axis.x, axis.y);
    }
}

impl InputHandler for LookHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "look"
    }

    fn handle_triggered(&self, ctx: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
        self.apply(ctx, value);
    }

    fn handle_ongoing(&self, ctx: &mut DispatchContext<'_>, value: &InputValue, _: &ActionId) {
        self.apply(ctx, value);
    }
}

/// Starts a jump on Triggered and cuts the ascent on Completed. Releasing is
/// never blocked; only starting a jump checks the blocking tags.
pub struct JumpHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    block_tags: Vec<GameplayTag>,
}

impl JumpHandler {
    pub fn new(action: ActionId, settings: &InputSettings) -> Self {
        Self {
            actions: vec![action],
            events: vec![TriggerEvent::Triggered, TriggerEvent::Completed],
            block_tags: vec![settings.block_movement_tag.clone()],
        }
    }
}

impl InputHandler for JumpHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "jump"
    }

    fn handle_triggered(&self, ctx: &mut DispatchContext<'_>, _: &InputValue, _: &ActionId) {
        if !ctx.target.has_any_tags(&self.block_tags) {
            ctx.target.jump();
        }
    }

    fn handle_completed(&self, ctx: &mut DispatchContext<'_>, _: &InputValue, _: &ActionId) {
        ctx.target.stop_jumping();
    }
}

/// Toggles the crouched stance on Triggered.
pub struct CrouchHandler {
    actions: Vec<ActionId>,
    events: Vec<TriggerEvent>,
    block_tags: Vec<GameplayTag>,
}

impl CrouchHandler {
    pub fn new(action: ActionId, settings: &InputSettings) -> Self {
        Self {
            actions: vec![action],
            events: vec![TriggerEvent::Triggered],
            block_tags: vec![settings.block_movement_tag.clone()],
        }
    }
}

impl InputHandler for CrouchHandler {
    fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    fn trigger_events(&self) -> &[TriggerEvent] {
        &self.events
    }

    fn name(&self) -> &str {
        "crouch"
    }

    fn handle_triggered(&self, ctx: &mut DispatchContext<'_>, _: &InputValue, _: &ActionId) {
        if ctx.target.has_any_tags(&self.block_tags) {
            return;
        }

        let crouched = ctx.target.is_crouched();
        ctx.target.set_crouched(!crouched);
    }
}
