//! Directory tree visualization and pattern-based file search.
//!
//! The [`core`] module holds the pure scanning logic: a depth-bounded,
//! exclusion-filtered tree builder and a recursive filename search. The
//! [`app`] module wraps them in background tasks that stream progress and
//! completion events over a channel, serialized through a session busy
//! flag. Presentation is left to the embedding application.

pub mod app;
pub mod config;
pub mod core;
pub mod utils;
