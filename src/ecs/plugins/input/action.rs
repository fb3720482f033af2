use std::borrow::Cow;
use std::fmt;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Phase of an input's lifecycle, as reported by the client-side trigger
/// evaluation. `None` is the sentinel for "no trigger" and never dispatches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    #[default]
    None,
    Started,
    Ongoing,
    Triggered,
    Completed,
    Canceled,
}

impl TriggerEvent {
    /// Every kind that can actually fire, in the order they are tracked by default.
    pub const ALL: [TriggerEvent; 5] = [
        TriggerEvent::Started,
        TriggerEvent::Triggered,
        TriggerEvent::Ongoing,
        TriggerEvent::Completed,
        TriggerEvent::Canceled,
    ];

    pub fn is_none(self) -> bool {
        self == TriggerEvent::None
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriggerEvent::None => "None",
            TriggerEvent::Started => "Started",
            TriggerEvent::Ongoing => "Ongoing",
            TriggerEvent::Triggered => "Triggered",
            TriggerEvent::Completed => "Completed",
            TriggerEvent::Canceled => "Canceled",
        };
        f.write_str(name)
    }
}

/// Identity of a logical input ("move", "jump"), independent of the physical
/// keys or buttons bound to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionId(Cow<'static, str>);

impl ActionId {
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

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hierarchical gameplay state tag, e.g. `input.block.movement` or
/// `ability.attack`. Tags identify blocking state, abilities, switches and
/// gameplay events across the input and ability layers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameplayTag(Cow<'static, str>);

impl GameplayTag {
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

impl fmt::Display for GameplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Well-known tags used by the default handler wiring.
pub mod tags {
    use super::GameplayTag;

    pub const BLOCK_MOVEMENT: GameplayTag = GameplayTag::from_static("input.block.movement");
    pub const BLOCK_CAMERA: GameplayTag = GameplayTag::from_static("input.block.camera");
    pub const BLOCK_ROTATION: GameplayTag = GameplayTag::from_static("input.block.rotation");
}

/// Value payload carried by a trigger event. Narrow payloads convert up the
/// same way analog input values do: a button reads as a 0/1 axis, a 1D axis
/// reads as the X component of a 2D axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputValue {
    Bool(bool),
    Axis1D(f32),
    Axis2D(Vec2),
}

impl InputValue {
    pub fn magnitude(&self) -> f32 {
        match self {
            InputValue::Bool(pressed) => u8::from(*pressed) as f32,
            InputValue::Axis1D(value) => value.abs(),
            InputValue::Axis2D(value) => value.length(),
        }
    }

    /// The boolean reading, only available for actual button payloads.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InputValue::Bool(pressed) => Some(*pressed),
            _ => None,
        }
    }

    pub fn axis1(&self) -> f32 {
        match self {
            InputValue::Bool(pressed) => u8::from(*pressed) as f32,
            InputValue::Axis1D(value) => *value,
            InputValue::Axis2D(value) => value.x,
        }
    }

    pub fn axis2(&self) -> Vec2 {
        match self {
            InputValue::Bool(pressed) => Vec2::new(u8::from(*pressed) as f32, 0.0),
            InputValue::Axis1D(value) => Vec2::new(*value, 0.0),
            InputValue::Axis2D(value) => *value,
        }
    }
}

impl Default for InputValue {
    fn default() -> Self {
        InputValue::Bool(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_convert_up() {
        assert_eq!(InputValue::Bool(true).axis2(), Vec2::new(1.0, 0.0));
        assert_eq!(InputValue::Axis1D(-0.5).axis2(), Vec2::new(-0.5, 0.0));
        assert_eq!(InputValue::Axis1D(-0.5).magnitude(), 0.5);
        assert_eq!(InputValue::Bool(false).magnitude(), 0.0);
        assert_eq!(InputValue::Axis2D(Vec2::new(3.0, 4.0)).magnitude(), 5.0);
    }

    #[test]
    fn only_buttons_read_as_bool() {
        assert_eq!(InputValue::Bool(true).as_bool(), Some(true));
        assert_eq!(InputValue::Axis1D(1.0).as_bool(), None);
    }
}
