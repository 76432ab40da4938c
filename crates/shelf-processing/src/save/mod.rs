//! The save attempt state machine.

mod error;
mod orchestrator;
mod state;

pub use error::{SaveError, SavedProduct};
pub use orchestrator::SaveOrchestrator;
pub use state::SaveState;
