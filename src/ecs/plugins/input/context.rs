use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ecs::plugins::input::action::ActionId;

/// Identity of a mapping context. A context is registered and unregistered as
/// a unit, and at most once per input manager.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(Cow<'static, str>);

impl ContextId {
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

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One raw key (or button, or stick) mapped to a logical action. Several keys
/// may map to the same action.
#[derive(Debug, Clone)]
pub struct KeyMapping {
    pub key: Cow<'static, str>,
    pub action: ActionId,
}

/// A named collection of key-to-action mappings with a registration priority.
#[derive(Debug, Clone)]
pub struct MappingContext {
    id: ContextId,
    mappings: Vec<KeyMapping>,
}

impl MappingContext {
    pub fn new(id: ContextId) -> Self {
        Self {
            id,
            mappings: Vec::new(),
        }
    }

    pub fn with_mapping(mut self, key: impl Into<Cow<'static, str>>, action: ActionId) -> Self {
        self.mappings.push(KeyMapping {
            key: key.into(),
            action,
        });
        self
    }

    pub fn id(&self) -> &ContextId {
        &self.id
    }

    pub fn mappings(&self) -> &[KeyMapping] {
        &self.mappings
    }

    /// Unique actions referenced by this context, in first-seen order. Actions
    /// reachable through several key mappings appear once.
    pub fn unique_actions(&self) -> Vec<ActionId> {
        let mut actions: Vec<ActionId> = Vec::with_capacity(self.mappings.len());
        for mapping in &self.mappings {
            if !actions.contains(&mapping.action) {
                actions.push(mapping.action.clone());
            }
        }
        actions
    }

    pub fn action_for_key(&self, key: &str) -> Option<&ActionId> {
        self.mappings
            .iter()
            .find(|mapping| mapping.key == key)
            .map(|mapping| &mapping.action)
    }
}
