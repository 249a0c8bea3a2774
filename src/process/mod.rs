/*!
 * Process Module
 * Process descriptors, the ready queue and the program loader
 */

pub mod loader;
pub mod pcb;
pub mod queue;

// Re-export for convenience
pub use loader::{read_program, Loader};
pub use pcb::ProcessControlBlock;
pub use queue::ReadyQueue;
