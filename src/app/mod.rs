//! The session/controller layer: mutable session state plus the background
//! tasks that run scans and stream [`events::ScanEvent`]s back to the
//! initiating context.

pub mod events;
pub mod state;
pub mod tasks;

pub use events::ScanEvent;
pub use state::SessionState;
