//! Lead Adapters
//!
//! - **InMemoryLeadRecorder** - Logs captured leads and keeps them in memory

mod in_memory_lead_recorder;

pub use in_memory_lead_recorder::InMemoryLeadRecorder;
