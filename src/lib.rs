//! Client for a documentation-lookup backend.
//!
//! Each backend tool answers inside an envelope whose text part may itself
//! be JSON. This crate unwraps those envelopes, tells the different error
//! layers apart, and renders every tool's payload as an HTML fragment.

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod envelope;
pub mod errors;
pub mod params;
pub mod render;
pub mod tools;
pub mod transport;

pub use controller::{Dispatcher, RunState};
pub use errors::{ClipboardError, DispatchError};
pub use params::ToolInput;
pub use tools::ToolKind;
