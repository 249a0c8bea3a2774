/*!
 * Memory Module
 * Shared instruction storage for loaded scripts
 */

pub mod arena;
pub mod types;

// Re-export for convenience
pub use arena::InstructionArena;
pub use types::*;
