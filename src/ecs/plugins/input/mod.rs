//! Input handling: mapping contexts, trigger-event dispatch and command
//! buffering.
//!
//! The engine-agnostic core lives in [`action`], [`context`], [`setup`],
//! [`bindings`], [`buffer`], [`handler`], [`manager`], [`settings`] and
//! [`validation`]; the remaining modules wire one core instance per player
//! into the ECS.

pub mod action;
pub mod bindings;
pub mod buffer;
pub mod components;
pub mod context;
pub mod handler;
pub mod handlers;
pub mod manager;
pub mod plugin;
pub mod settings;
pub mod setup;
pub mod systems;
pub mod validation;

pub use plugin::InputPlugin;
