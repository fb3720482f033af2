use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::ecs::plugins::input::action::{GameplayTag, InputValue};

/// Static description of one grantable ability.
#[derive(Debug, Clone)]
pub struct AbilitySpec {
    pub tag: GameplayTag,
    /// Seconds the ability runs before completing on its own.
    pub duration: f32,
    /// While active, the avatar's input buffer collects bufferable commands
    /// instead of executing them.
    pub locks_input: bool,
    /// Tags the avatar holds for as long as the ability is active.
    pub tags_while_active: Vec<GameplayTag>,
    /// Gameplay event that activates this ability when delivered.
    pub activation_event: Option<GameplayTag>,
}

#[derive(Debug, Clone)]
pub struct ActiveAbility {
    pub tag: GameplayTag,
    pub remaining: f32,
    pub locks_input: bool,
}

/// How the last active ability ended. Consumed by the buffer-window system
/// to decide between flushing and discarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityEnd {
    pub interrupted: bool,
}

/// Per-avatar ability state: the granted set, at most one active ability,
/// and the gameplay tags other systems key off.
#[derive(Component, Default)]
pub struct AbilityComponent {
    granted: HashMap<GameplayTag, AbilitySpec>,
    active: Option<ActiveAbility>,
    loose_tags: HashSet<GameplayTag>,
    finished: Option<AbilityEnd>,
}

impl AbilityComponent {
    pub fn grant(&mut self, spec: AbilitySpec) {
        self.granted.insert(spec.tag.clone(), spec);
    }

    pub fn add_loose_tag(&mut self, tag: GameplayTag) {
        self.loose_tags.insert(tag);
    }

    pub fn remove_loose_tag(&mut self, tag: &GameplayTag) {
        self.loose_tags.remove(tag);
    }

    pub fn active(&self) -> Option<&ActiveAbility> {
        self.active.as_ref()
    }

    pub fn has_active(&self, ability: &GameplayTag) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.tag == *ability)
    }

    /// True when the avatar holds any of the given tags, either loose or
    /// applied by the active ability.
    pub fn has_any_tags(&self, tags: &[GameplayTag]) -> bool {
        if tags.iter().any(|tag| self.loose_tags.contains(tag)) {
            return true;
        }

        self.active.as_ref().is_some_and(|active| {
            self.granted
                .get(&active.tag)
                .is_some_and(|spec| tags.iter().any(|tag| spec.tags_while_active.contains(tag)))
        })
    }

    /// Activates a granted ability. Fails while another ability is running
    /// or when the tag was never granted.
    pub fn try_activate(&mut self, ability: &GameplayTag) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(spec) = self.granted.get(ability) else {
            return false;
        };

        self.active = Some(ActiveAbility {
            tag: spec.tag.clone(),
            remaining: spec.duration,
            locks_input: spec.locks_input,
        });
        true
    }

    /// Cancels the active ability if it matches. Cancellation counts as an
    /// interruption for the buffer window.
    pub fn cancel(&mut self, ability: &GameplayTag) -> bool {
        if !self.has_active(ability) {
            return false;
        }
        self.active = None;
        self.finished = Some(AbilityEnd { interrupted: true });
        true
    }

    /// Activates every granted ability listening for this event. Returns the
    /// number of activations.
    pub fn handle_gameplay_event(&mut self, event: &GameplayTag, _value: &InputValue) -> u32 {
        let listeners: Vec<GameplayTag> = self
            .granted
            .values()
            .filter(|spec| spec.activation_event.as_ref() == Some(event))
            .map(|spec| spec.tag.clone())
            .collect();

        let mut activations = 0;
        for tag in listeners {
            if self.try_activate(&tag) {
                activations += 1;
            }
        }
        activations
    }

    /// Advances the active ability's clock; completes it when the duration
    /// runs out.
    pub fn tick(&mut self, dt: f32) {
        if let Some(active) = &mut self.active {
            active.remaining -= dt;
            if active.remaining <= 0.0 {
                self.active = None;
                self.finished = Some(AbilityEnd { interrupted: false });
            }
        }
    }

    /// Takes the pending end-of-ability note, if any.
    pub fn take_finished(&mut self) -> Option<AbilityEnd> {
        self.finished.take()
    }
}
