//! Integration tests for the background scan tasks.
//!
//! These drive `app::tasks` end to end over a tokio MPSC channel, the same
//! channel type an embedding UI would poll, and assert the event protocol:
//! zero or more `Progress` events followed by exactly one terminal event.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use treescope::app::{self, events::ScanEvent, state::SessionState};
use treescope::config::AppConfig;
use treescope::core::EntryKind;
use treescope::utils::test_helpers::setup_test_logging;

/// Contains the test infrastructure.
mod helpers {
    use super::*;
    use std::fs;

    /// Sets up a complete, isolated environment for each test case.
    pub struct TestHarness {
        pub state: Arc<Mutex<SessionState>>,
        pub event_tx: mpsc::UnboundedSender<ScanEvent>,
        pub event_rx: mpsc::UnboundedReceiver<ScanEvent>,
        pub root_path: PathBuf,
        _temp_dir: TempDir,
    }

    impl TestHarness {
        pub fn new() -> Self {
            setup_test_logging();
            let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
            let root_path = temp_dir.path().join("proj");
            fs::create_dir_all(&root_path).expect("Failed to create scan root");
            let (event_tx, event_rx) = mpsc::unbounded_channel();

            let mut state = SessionState::new(AppConfig::default());
            state.select_directory(root_path.clone());

            Self {
                state: Arc::new(Mutex::new(state)),
                event_tx,
                event_rx,
                root_path,
                _temp_dir: temp_dir,
            }
        }

        /// Creates a file inside the scan root.
        pub fn create_file(&self, path: &str, content: &str) {
            let file_path = self.root_path.join(path);
            if let Some(parent) = file_path.parent() {
                fs::create_dir_all(parent).expect("Failed to create parent dir");
            }
            fs::write(file_path, content).expect("Failed to write file");
        }

        /// Sets up the standard fixture: a `src` directory, a top-level
        /// file, and a `.git` directory excluded by the default config.
        pub fn setup_basic_project(&self) {
            self.create_file("src/main.py", "print('hi')");
            self.create_file("README.md", "# My Project");
            self.create_file(".git/HEAD", "ref: refs/heads/main");
        }

        /// Drains events until the terminal one, returning it together with
        /// the progress counts seen along the way.
        pub async fn wait_for_terminal(&mut self) -> (Vec<usize>, ScanEvent) {
            let mut progress = Vec::new();
            loop {
                match tokio::time::timeout(Duration::from_secs(5), self.event_rx.recv()).await {
                    Ok(Some(ScanEvent::Progress(count))) => progress.push(count),
                    Ok(Some(terminal)) => return (progress, terminal),
                    _ => panic!("Task did not finish within timeout or channel closed"),
                }
            }
        }

        pub fn is_busy(&self) -> bool {
            self.state.lock().unwrap().is_busy
        }
    }
}

#[tokio::test]
async fn tree_task_streams_progress_then_completion() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();

    app::tasks::start_tree_build(
        harness.root_path.clone(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );

    let (progress, terminal) = harness.wait_for_terminal().await;

    // Two directories listed: the root (2 kept entries) and src (1).
    assert_eq!(progress, vec![2, 1]);

    let ScanEvent::TreeComplete(tree) = terminal else {
        panic!("Expected TreeComplete, got {terminal:?}");
    };
    assert_eq!(tree, "proj/\n├── src\n│   └── main.py\n└── README.md");

    // The busy flag is released before the terminal event is sent.
    assert!(!harness.is_busy());
}

#[tokio::test]
async fn search_task_returns_matching_records() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();

    app::tasks::start_search(
        harness.root_path.clone(),
        "*.py".to_string(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );

    let (_, terminal) = harness.wait_for_terminal().await;
    let ScanEvent::SearchComplete(results) = terminal else {
        panic!("Expected SearchComplete, got {terminal:?}");
    };

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "main.py");
    assert_eq!(results[0].relative_path, PathBuf::from("src/main.py"));
    assert_eq!(results[0].kind, EntryKind::File);
    assert!(results[0].size.is_some());
    assert!(!harness.is_busy());
}

#[tokio::test]
async fn invalid_pattern_surfaces_as_error_event() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();

    app::tasks::start_search(
        harness.root_path.clone(),
        "[*".to_string(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );

    let (_, terminal) = harness.wait_for_terminal().await;
    let ScanEvent::Error(message) = terminal else {
        panic!("Expected Error, got {terminal:?}");
    };
    assert!(message.contains("Invalid search pattern"));
    // A failed operation must reset the busy state.
    assert!(!harness.is_busy());
}

#[tokio::test]
async fn save_task_writes_structure_document() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();

    let tree_text = "proj/\n└── README.md".to_string();
    let destination = harness.root_path.join("proj_structure.txt");

    app::tasks::start_save(
        harness.root_path.clone(),
        destination.clone(),
        tree_text.clone(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );

    let (_, terminal) = harness.wait_for_terminal().await;
    let ScanEvent::SaveComplete(saved_path) = terminal else {
        panic!("Expected SaveComplete, got {terminal:?}");
    };
    assert_eq!(saved_path, destination);

    let contents = std::fs::read_to_string(&destination).unwrap();
    assert!(contents.starts_with(&format!(
        "# File Structure: {}",
        harness.root_path.display()
    )));
    assert!(contents.contains("# Options: Hide hidden, Max depth: Unlimited"));
    // Header and tree are separated by a blank line; the tree is verbatim.
    assert!(contents.ends_with(&format!("\n\n{tree_text}")));
    assert!(!harness.is_busy());
}

#[tokio::test]
async fn busy_session_refuses_a_second_operation() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();

    harness.state.lock().unwrap().is_busy = true;

    app::tasks::start_tree_build(
        harness.root_path.clone(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );

    // No worker was spawned, so no events arrive.
    let refused =
        tokio::time::timeout(Duration::from_millis(200), harness.event_rx.recv()).await;
    assert!(refused.is_err(), "Expected no events from a refused start");
    assert!(harness.is_busy());
}

#[tokio::test]
async fn completed_scan_allows_the_next_operation() {
    let mut harness = helpers::TestHarness::new();
    harness.setup_basic_project();

    app::tasks::start_tree_build(
        harness.root_path.clone(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );
    let (_, first) = harness.wait_for_terminal().await;
    assert!(matches!(first, ScanEvent::TreeComplete(_)));

    app::tasks::start_search(
        harness.root_path.clone(),
        "readme".to_string(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );
    let (_, second) = harness.wait_for_terminal().await;
    let ScanEvent::SearchComplete(results) = second else {
        panic!("Expected SearchComplete, got {second:?}");
    };
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "README.md");
}

#[tokio::test]
async fn respects_max_depth_from_session_config() {
    let mut harness = helpers::TestHarness::new();
    harness.create_file("l1/l2/l3/bottom.txt", "deep");
    harness.state.lock().unwrap().config.max_depth = Some(1);

    app::tasks::start_tree_build(
        harness.root_path.clone(),
        harness.event_tx.clone(),
        harness.state.clone(),
    );

    let (_, terminal) = harness.wait_for_terminal().await;
    let ScanEvent::TreeComplete(tree) = terminal else {
        panic!("Expected TreeComplete, got {terminal:?}");
    };
    assert_eq!(tree, "proj/\n└── l1\n    └── l2");
}
