//! # Edit Session
//!
//! Binds widgets to a host-owned document.
//!
//! An [`EditSession`] owns the timers for one rendered form. Widgets call
//! [`SessionHandle::on_change`]; a tokio task runs the [`UpdateScheduler`]
//! and hands each merged commit to the host's [`DocumentSink`] as a function
//! of the previous document.
//!
//! Disposing the session (explicitly or by dropping it) cancels every pending
//! timer. Nothing reaches the sink afterwards.

use crate::config::EditorConfig;
use crate::mutations::Patch;
use crate::scheduler::UpdateScheduler;
use crate::{Document, EditorError};
use formthinker_common::{Path, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Function from the previous document to the next one
pub type Updater = Box<dyn FnOnce(&Value) -> Value + Send>;

/// Host-owned document storage
///
/// `set_data` is called from the session's timer task, at most once per
/// throttle interval. A panic inside it ends the task; the session performs
/// no recovery or retry.
pub trait DocumentSink: Send + 'static {
    fn set_data(&mut self, updater: Updater);
}

/// Re-render subscribers read the receiving side
impl DocumentSink for watch::Sender<Value> {
    fn set_data(&mut self, updater: Updater) {
        self.send_modify(|doc| *doc = updater(&*doc));
    }
}

impl DocumentSink for watch::Sender<Document> {
    fn set_data(&mut self, updater: Updater) {
        self.send_modify(|doc| {
            doc.root = updater(&doc.root);
            doc.version += 1;
        });
    }
}

#[derive(Debug)]
struct Change {
    path: Path,
    patch: Patch,
}

/// Scheduler lifetime for one rendered form
#[derive(Debug)]
pub struct EditSession {
    handle: SessionHandle,
    task: JoinHandle<()>,
}

/// Cloneable entry point handed to widgets
#[derive(Debug, Clone)]
pub struct SessionHandle {
    changes: mpsc::UnboundedSender<Change>,
    disposed: Arc<AtomicBool>,
}

impl EditSession {
    /// Start the timer task. Must be called from within a tokio runtime.
    pub fn spawn<S: DocumentSink>(config: &EditorConfig, sink: S) -> Self {
        let (changes, receiver) = mpsc::unbounded_channel();
        let disposed = Arc::new(AtomicBool::new(false));

        let task = tokio::spawn(run(
            UpdateScheduler::new(config),
            sink,
            receiver,
            Arc::clone(&disposed),
        ));

        Self {
            handle: SessionHandle { changes, disposed },
            task,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// See [`SessionHandle::on_change`]
    pub fn on_change(
        &self,
        path: impl Into<Path>,
        value: Value,
        remove: bool,
    ) -> Result<(), EditorError> {
        self.handle.on_change(path, value, remove)
    }

    /// Cancel all pending timers. Idempotent.
    pub fn dispose(&self) {
        if !self.handle.disposed.swap(true, Ordering::AcqRel) {
            tracing::debug!("disposing edit session");
        }
        self.task.abort();
    }

    pub fn is_disposed(&self) -> bool {
        self.handle.is_disposed()
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl SessionHandle {
    /// Report a widget edit; `remove` requests a delete at `path`
    pub fn on_change(
        &self,
        path: impl Into<Path>,
        value: Value,
        remove: bool,
    ) -> Result<(), EditorError> {
        if self.is_disposed() {
            return Err(EditorError::SessionClosed);
        }

        let change = Change {
            path: path.into(),
            patch: Patch::from_change(value, remove),
        };
        self.changes
            .send(change)
            .map_err(|_| EditorError::SessionClosed)
    }

    /// True once disposed, or once the timer task has ended (for example
    /// after the sink panicked)
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire) || self.changes.is_closed()
    }
}

async fn run<S: DocumentSink>(
    mut scheduler: UpdateScheduler,
    mut sink: S,
    mut changes: mpsc::UnboundedReceiver<Change>,
    disposed: Arc<AtomicBool>,
) {
    loop {
        let wake = scheduler.next_deadline().map(Instant::from_std);

        tokio::select! {
            change = changes.recv() => {
                let Some(change) = change else { break };
                let now = Instant::now().into_std();
                flush_due(&mut scheduler, &mut sink, &disposed, now);
                scheduler.schedule(change.path, change.patch, now);
            }
            _ = tokio::time::sleep_until(wake.unwrap_or_else(Instant::now)), if wake.is_some() => {
                flush_due(&mut scheduler, &mut sink, &disposed, Instant::now().into_std());
            }
        }
    }

    scheduler.cancel_all();
}

fn flush_due<S: DocumentSink>(
    scheduler: &mut UpdateScheduler,
    sink: &mut S,
    disposed: &AtomicBool,
    now: std::time::Instant,
) {
    while let Some(commit) = scheduler.poll(now) {
        if disposed.load(Ordering::Acquire) {
            scheduler.cancel_all();
            return;
        }
        tracing::debug!(updates = commit.len(), "committing to document sink");
        sink.set_data(commit.into_updater());
    }
}
