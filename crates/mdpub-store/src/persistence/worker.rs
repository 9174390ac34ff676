//! Debounced persistence worker
//!
//! A dedicated thread receives state snapshots over a channel. Every new
//! snapshot restarts the quiet period; once it elapses the latest snapshot is
//! written. All persisted slices share one timer and are written together.

use mdpub_config::{PersistedRecord, Storage};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{self, PersistError};
use crate::state::{AppState, SliceName};

enum Command {
    Schedule(AppState),
    Flush(Sender<()>),
    Shutdown,
}

/// Owner of the worker thread; dropping it writes any pending snapshot and
/// joins the thread
pub struct PersistWorker {
    tx: Sender<Command>,
    thread: Option<JoinHandle<()>>,
}

impl PersistWorker {
    pub fn spawn(storage: Arc<dyn Storage>, slices: Vec<SliceName>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let thread = thread::Builder::new()
            .name("mdpub-persist".to_string())
            .spawn(move || worker_loop(rx, storage, slices, debounce));

        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::error!("Failed to start persistence worker: {}", e);
                None
            }
        };
        Self { tx, thread }
    }

    /// Hand a new snapshot to the worker, restarting the quiet period
    pub fn schedule(&self, state: AppState) {
        schedule(&self.tx, state);
    }

    pub fn handle(&self) -> PersistenceHandle {
        PersistenceHandle {
            tx: self.tx.clone(),
        }
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Persistence worker panicked");
            }
        }
    }
}

/// Cloneable handle to force pending writes out
#[derive(Clone)]
pub struct PersistenceHandle {
    tx: Sender<Command>,
}

impl PersistenceHandle {
    /// Same as [`PersistWorker::schedule`], usable without the worker
    pub fn schedule(&self, state: AppState) {
        schedule(&self.tx, state);
    }

    /// Write the pending snapshot now, if any, and wait until it is written
    pub fn flush(&self) -> Result<(), PersistError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.tx
            .send(Command::Flush(ack_tx))
            .map_err(|_| PersistError::WorkerStopped)?;
        ack_rx.recv().map_err(|_| PersistError::WorkerStopped)
    }
}

fn schedule(tx: &Sender<Command>, state: AppState) {
    if tx.send(Command::Schedule(state)).is_err() {
        log::warn!("Persistence worker is gone, dropping snapshot");
    }
}

fn worker_loop(
    rx: Receiver<Command>,
    storage: Arc<dyn Storage>,
    slices: Vec<SliceName>,
    debounce: Duration,
) {
    log::debug!(
        "Persistence worker started ({:?} debounce, slices {:?})",
        debounce,
        slices
    );

    let mut pending: Option<(AppState, Instant)> = None;
    loop {
        let command = match &pending {
            Some((_, deadline)) => {
                let timeout = deadline.saturating_duration_since(Instant::now());
                match rx.recv_timeout(timeout) {
                    Ok(command) => Some(command),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => Some(Command::Shutdown),
                }
            }
            None => match rx.recv() {
                Ok(command) => Some(command),
                Err(_) => Some(Command::Shutdown),
            },
        };

        match command {
            // Quiet period elapsed
            None => {
                if let Some((state, _)) = pending.take() {
                    write_slices(storage.as_ref(), &state, &slices);
                }
            }
            Some(Command::Schedule(state)) => {
                pending = Some((state, Instant::now() + debounce));
            }
            Some(Command::Flush(ack)) => {
                if let Some((state, _)) = pending.take() {
                    write_slices(storage.as_ref(), &state, &slices);
                }
                let _ = ack.send(());
            }
            Some(Command::Shutdown) => {
                if let Some((state, _)) = pending.take() {
                    write_slices(storage.as_ref(), &state, &slices);
                }
                break;
            }
        }
    }

    log::debug!("Persistence worker stopped");
}

/// Write every slice in `slices`; failures are reported per slice.
/// Returns the number of slices written.
pub fn write_slices(storage: &dyn Storage, state: &AppState, slices: &[SliceName]) -> usize {
    let mut written = 0;
    for &slice in slices {
        match persist_slice(storage, state, slice) {
            Ok(()) => written += 1,
            Err(e) => error::report("Failed to persist slice", &e),
        }
    }
    written
}

/// Serialize one slice into its record and store it under the slice name
pub fn persist_slice(
    storage: &dyn Storage,
    state: &AppState,
    slice: SliceName,
) -> Result<(), PersistError> {
    let value = state
        .slice_json(slice)
        .map_err(|source| PersistError::Serialize { slice, source })?;
    let raw = PersistedRecord::new(value)
        .encode()
        .map_err(|source| PersistError::Encode { slice, source })?;
    storage
        .set_item(slice.as_ref(), &raw)
        .map_err(|source| PersistError::Storage { slice, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{Action, EditorAction};
    use crate::reducer::reduce;
    use mdpub_config::MemoryStorage;
    use serde_json::Value;

    fn set_content(state: &AppState, content: &str) -> AppState {
        reduce(
            state,
            &Action::Editor(EditorAction::SetContent {
                content: content.to_string(),
            }),
        )
    }

    fn stored_content(storage: &MemoryStorage) -> Option<String> {
        let raw = storage.get_item("editor").ok()??;
        let record: Value = serde_json::from_str(&raw).ok()?;
        record["state"]["content"].as_str().map(str::to_string)
    }

    #[test]
    fn test_burst_is_written_once_after_quiet_period() {
        let storage = Arc::new(MemoryStorage::new());
        let worker = PersistWorker::spawn(
            storage.clone(),
            vec![SliceName::Editor, SliceName::Ui],
            Duration::from_millis(1000),
        );

        let mut state = AppState::default();
        for i in 1..=5 {
            state = set_content(&state, &format!("revision {}", i));
            worker.schedule(state.clone());
            thread::sleep(Duration::from_millis(20));
        }

        // Still inside the quiet period
        thread::sleep(Duration::from_millis(300));
        assert_eq!(storage.total_writes(), 0);

        thread::sleep(Duration::from_millis(1200));
        assert_eq!(storage.write_count("editor"), 1);
        assert_eq!(storage.write_count("ui"), 1);
        assert_eq!(stored_content(&storage).as_deref(), Some("revision 5"));
    }

    #[test]
    fn test_flush_writes_pending_snapshot_immediately() {
        let storage = Arc::new(MemoryStorage::new());
        let worker = PersistWorker::spawn(
            storage.clone(),
            vec![SliceName::Editor],
            Duration::from_secs(60),
        );

        worker.schedule(set_content(&AppState::default(), "flushed"));
        worker.handle().flush().unwrap();

        assert_eq!(storage.write_count("editor"), 1);
        assert_eq!(stored_content(&storage).as_deref(), Some("flushed"));

        // Nothing pending, so a second flush writes nothing
        worker.handle().flush().unwrap();
        assert_eq!(storage.write_count("editor"), 1);
    }

    #[test]
    fn test_drop_writes_pending_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let worker = PersistWorker::spawn(
            storage.clone(),
            vec![SliceName::Editor],
            Duration::from_secs(60),
        );
        let handle = worker.handle();

        worker.schedule(set_content(&AppState::default(), "on exit"));
        drop(worker);

        assert_eq!(stored_content(&storage).as_deref(), Some("on exit"));
        assert!(matches!(handle.flush(), Err(PersistError::WorkerStopped)));
    }

    #[test]
    fn test_failed_slice_does_not_stop_others() {
        // Quota fits the small ui record but not the editor record
        let storage = MemoryStorage::with_quota(200);
        let state = set_content(&AppState::default(), &"x".repeat(500));

        let written = write_slices(&storage, &state, &[SliceName::Editor, SliceName::Ui]);
        assert_eq!(written, 1);
        assert_eq!(storage.write_count("editor"), 0);
        assert_eq!(storage.write_count("ui"), 1);
    }
}
