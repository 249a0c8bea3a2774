/*!
 * Monitoring
 * Logging setup and command tracing
 */

mod tracer;

pub use tracer::{init_tracing, span_command, CommandSpan};
