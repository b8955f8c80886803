//! Session events module.
//!
//! Provides session event types and the sink trait for emitting events
//! after successful session-state changes. The embedding shell implements
//! the sink to translate events into platform-specific actions.

mod session_event;
mod sink;

pub use session_event::*;
pub use sink::*;
