//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! - **InMemorySessionStore** - Keeps sessions in memory for the process lifetime
//! - **IdleSessionSweeper** - Background loop dropping idle sessions

mod idle_sweeper;
mod in_memory_session_store;

pub use idle_sweeper::{IdleSessionSweeper, IdleSweeperConfig};
pub use in_memory_session_store::{InMemorySessionStore, DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS};
