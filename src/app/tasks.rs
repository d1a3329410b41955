//! Background tasks for tree building, searching, and saving.
//!
//! Each task claims the session's busy flag, runs the filesystem walk on a
//! blocking worker, and streams [`ScanEvent`]s over the caller's channel.
//! The busy flag is released before the terminal event is sent, so a
//! consumer observing `TreeComplete`, `SearchComplete`, `SaveComplete`, or
//! `Error` may immediately start the next operation.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;

use super::events::ScanEvent;
use super::state::SessionState;
use crate::core::{CoreError, ScanConfig, SearchEngine, TreeBuilder};

/// Starts a background tree build of `root`.
///
/// Refused (with a warning, no events) while another operation is in
/// flight.
pub fn start_tree_build(
    root: PathBuf,
    events: UnboundedSender<ScanEvent>,
    state: Arc<Mutex<SessionState>>,
) {
    let Some(config) = claim(&state, "tree build") else {
        return;
    };

    tokio::spawn(async move {
        tracing::info!("Building tree for {:?}", root);
        let progress_events = events.clone();
        let worker_root = root.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            let progress = move |count: usize| {
                progress_events.send(ScanEvent::Progress(count)).ok();
            };
            TreeBuilder::render(&worker_root, &config, &progress)
        })
        .await;

        state.lock().unwrap().finish();
        match outcome {
            Ok(tree) => {
                tracing::info!("Tree build for {:?} complete", root);
                events.send(ScanEvent::TreeComplete(tree)).ok();
            }
            Err(e) => {
                tracing::error!("Tree build for {:?} aborted: {}", root, e);
                events
                    .send(ScanEvent::Error(format!("Tree generation failed: {e}")))
                    .ok();
            }
        }
    });
}

/// Starts a background filename search under `root`.
///
/// Callers must reject empty patterns before invoking this; pattern
/// emptiness is not validated here.
pub fn start_search(
    root: PathBuf,
    pattern: String,
    events: UnboundedSender<ScanEvent>,
    state: Arc<Mutex<SessionState>>,
) {
    let Some(config) = claim(&state, "search") else {
        return;
    };

    tokio::spawn(async move {
        tracing::info!("Searching {:?} for '{}'", root, pattern);
        let progress_events = events.clone();
        let worker_root = root.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            let progress = move |count: usize| {
                progress_events.send(ScanEvent::Progress(count)).ok();
            };
            SearchEngine::search(&worker_root, &pattern, &config, &progress)
        })
        .await;

        state.lock().unwrap().finish();
        match outcome {
            Ok(Ok(results)) => {
                tracing::info!("Search under {:?} found {} matches", root, results.len());
                events.send(ScanEvent::SearchComplete(results)).ok();
            }
            Ok(Err(e)) => {
                tracing::error!("Search under {:?} failed: {}", root, e);
                events.send(ScanEvent::Error(e.to_string())).ok();
            }
            Err(e) => {
                tracing::error!("Search task for {:?} aborted: {}", root, e);
                events
                    .send(ScanEvent::Error(format!("Search failed: {e}")))
                    .ok();
            }
        }
    });
}

/// Starts a background save of `tree_text` to `destination` as a structure
/// document (metadata header, blank line, tree verbatim).
pub fn start_save(
    root: PathBuf,
    destination: PathBuf,
    tree_text: String,
    events: UnboundedSender<ScanEvent>,
    state: Arc<Mutex<SessionState>>,
) {
    let Some(config) = claim(&state, "save") else {
        return;
    };

    tokio::spawn(async move {
        tracing::info!("Saving structure of {:?} to {:?}", root, destination);
        let worker_destination = destination.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            let document = structure_document(&root, &config, &tree_text);
            std::fs::write(&worker_destination, document)
                .map_err(|e| CoreError::Io(e, worker_destination))
        })
        .await;

        state.lock().unwrap().finish();
        match outcome {
            Ok(Ok(())) => {
                events.send(ScanEvent::SaveComplete(destination)).ok();
            }
            Ok(Err(e)) => {
                tracing::error!("Save to {:?} failed: {}", destination, e);
                events.send(ScanEvent::Error(e.to_string())).ok();
            }
            Err(e) => {
                tracing::error!("Save task for {:?} aborted: {}", destination, e);
                events
                    .send(ScanEvent::Error(format!("Save failed: {e}")))
                    .ok();
            }
        }
    });
}

/// Renders the full contents of a saved structure file: a header block with
/// the root path, generation timestamp, and active options, then a blank
/// line, then the tree text verbatim.
pub fn structure_document(root: &Path, config: &ScanConfig, tree_text: &str) -> String {
    let hidden = if config.show_hidden {
        "Show hidden"
    } else {
        "Hide hidden"
    };
    let depth = config
        .max_depth
        .map(|d| d.to_string())
        .unwrap_or_else(|| "Unlimited".to_string());
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        "# File Structure: {}\n# Generated on: {}\n# Options: {}, Max depth: {}\n\n{}",
        root.display(),
        generated,
        hidden,
        depth,
        tree_text
    )
}

/// Takes the busy flag and a config snapshot, or logs a refusal.
fn claim(state: &Arc<Mutex<SessionState>>, operation: &str) -> Option<ScanConfig> {
    let mut guard = state.lock().unwrap();
    if !guard.try_begin() {
        tracing::warn!("Refusing to start {}: another operation is in flight", operation);
        return None;
    }
    Some(guard.config.scan_config())
}
