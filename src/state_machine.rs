//! Chat cycle state machine
//!
//! Pure transitions in the Elm style: `(state, event) -> (state, effects)`.
//! The controller executes the effects; nothing here does I/O.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::ChatState;
pub use transition::{transition, TransitionError};
