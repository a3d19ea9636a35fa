//! Registry of cancellation handles for in-flight executions.
//!
//! Holds one [`ExecutionHandle`] per job id while that job's execution task
//! is running. The handle is non-owning bookkeeping: the job record itself
//! lives in the store, and the execution task deregisters its own handle
//! when it finishes (whatever the outcome).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Cooperative cancellation handle for one running execution.
///
/// `cancel` requests interruption at the execution's next suspension point;
/// it does not stop the work immediately. `is_done` flips to `true` just
/// before the execution task deregisters itself.
#[derive(Clone)]
pub struct ExecutionHandle {
    token: CancellationToken,
    done: Arc<AtomicBool>,
}

impl ExecutionHandle {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cooperative cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the execution task has already finished.
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Mark the execution finished. Called by the execution task itself,
    /// immediately before it deregisters.
    pub fn mark_done(&self) {
        self.done.store(true, Ordering::SeqCst);
    }

    /// Whether `other` refers to the same execution as this handle.
    pub fn same_execution(&self, other: &ExecutionHandle) -> bool {
        Arc::ptr_eq(&self.done, &other.done)
    }
}

/// Tracks the cancellation handle of the currently running execution per
/// job id. Thread-safe via interior `RwLock`; wrapped in `Arc` by the
/// engine.
pub struct CancellationRegistry {
    handles: RwLock<HashMap<String, ExecutionHandle>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self {
            handles: RwLock::new(HashMap::new()),
        }
    }

    /// Register the handle for a freshly spawned execution. Replaces any
    /// previous handle for the same id (a superseded execution).
    pub async fn register(&self, id: String, handle: ExecutionHandle) {
        self.handles.write().await.insert(id, handle);
    }

    /// Clone of the handle for a running execution, if any.
    pub async fn lookup(&self, id: &str) -> Option<ExecutionHandle> {
        self.handles.read().await.get(id).cloned()
    }

    /// Drop the handle for a job id.
    pub async fn unregister(&self, id: &str) {
        self.handles.write().await.remove(id);
    }

    /// Drop the handle for a job id only if it still belongs to the given
    /// execution. A superseded execution deregistering late must not remove
    /// the handle of the execution that replaced it.
    pub async fn unregister_execution(&self, id: &str, handle: &ExecutionHandle) {
        let mut handles = self.handles.write().await;
        if let Some(current) = handles.get(id) {
            if current.same_execution(handle) {
                handles.remove(id);
            }
        }
    }

    /// Number of currently registered handles.
    pub async fn len(&self) -> usize {
        self.handles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.handles.read().await.is_empty()
    }
}

impl Default for CancellationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
