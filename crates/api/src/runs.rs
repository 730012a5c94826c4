//! In-flight AI pipeline run tracking.
//!
//! At most one pipeline run is in flight per workspace. The manager
//! holds a cancellation token per active run so the cancel endpoint and
//! server shutdown can stop the runner cooperatively; the spawned task
//! deregisters itself when it finishes.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

use launchos_core::types::DbId;

/// A registered in-flight run.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    pub run_id: DbId,
    pub cancel: CancellationToken,
}

/// Tracks the active pipeline run per workspace.
#[derive(Debug, Default)]
pub struct RunManager {
    active: Mutex<HashMap<DbId, ActiveRun>>,
}

impl RunManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a run for a workspace, returning its cancellation
    /// token. Returns `None` if the workspace already has an active
    /// run.
    pub fn register(&self, workspace_id: DbId, run_id: DbId) -> Option<CancellationToken> {
        let mut active = self.active.lock().expect("run manager lock poisoned");
        if active.contains_key(&workspace_id) {
            return None;
        }
        let cancel = CancellationToken::new();
        active.insert(
            workspace_id,
            ActiveRun {
                run_id,
                cancel: cancel.clone(),
            },
        );
        Some(cancel)
    }

    /// The active run for a workspace, if any.
    pub fn get(&self, workspace_id: DbId) -> Option<ActiveRun> {
        let active = self.active.lock().expect("run manager lock poisoned");
        active.get(&workspace_id).cloned()
    }

    /// Cancel the active run for a workspace. Returns the run id if
    /// one was in flight.
    pub fn cancel(&self, workspace_id: DbId) -> Option<DbId> {
        let active = self.active.lock().expect("run manager lock poisoned");
        active.get(&workspace_id).map(|run| {
            run.cancel.cancel();
            run.run_id
        })
    }

    /// Deregister a finished run. A later run with a different id is
    /// left untouched.
    pub fn finish(&self, workspace_id: DbId, run_id: DbId) {
        let mut active = self.active.lock().expect("run manager lock poisoned");
        if active.get(&workspace_id).is_some_and(|r| r.run_id == run_id) {
            active.remove(&workspace_id);
        }
    }

    /// Cancel every active run (server shutdown).
    pub fn cancel_all(&self) {
        let active = self.active.lock().expect("run manager lock poisoned");
        for run in active.values() {
            run.cancel.cancel();
        }
    }
}
