pub mod abilities;
pub mod movement;

pub use abilities::{
    AbilityActivationHandler, AbilityInterruptHandler, GameplayEventHandler, StateSwitchHandler,
};
pub use movement::{CrouchHandler, JumpHandler, LookHandler, MoveHandler};
