//! Defines the event structures sent from background tasks to consumers.

use std::path::PathBuf;

use crate::core::SearchResult;

/// Events streamed over an unbounded channel from a background task to the
/// context that started it.
///
/// A task run emits zero or more `Progress` events followed by exactly one
/// terminal event: the completion variant for its operation, or `Error`.
#[derive(Debug)]
pub enum ScanEvent {
    /// Advisory liveness update: the number of entries seen in the
    /// directory just listed. Consumers may coalesce or drop these.
    Progress(usize),
    /// A tree build finished; carries the rendered tree text.
    TreeComplete(String),
    /// A search finished; carries the ordered result records.
    SearchComplete(Vec<SearchResult>),
    /// A structure file was written to this path.
    SaveComplete(PathBuf),
    /// The operation aborted; carries a user-facing message.
    Error(String),
}
