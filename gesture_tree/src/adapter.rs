//! The gesture classifier adapter: owns a backend, brings it up off the
//! frame thread and turns its frames into at most one [`GestureSample`] per
//! distinct source timestamp.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, trace, warn};

use crate::error::InitError;
use crate::gesture::{Classifier, GestureBackend, GestureSample};

/// Lifecycle of the adapter.  Leaves `Uninitialized` exactly once.
#[derive(Clone, Debug, PartialEq)]
pub enum AdapterStatus {
    Uninitialized,
    Ready,
    Failed(InitError),
}

type InitOutcome = (Box<dyn GestureBackend>, Result<(), InitError>);

/// An initialization task still in flight.
struct PendingInit {
    rx:     Receiver<InitOutcome>,
    worker: JoinHandle<()>,
}

/// Frame counters, mostly for the headless summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdapterStats {
    pub classified: u64,
    pub duplicates: u64,
    pub errors:     u64,
}

pub struct GestureAdapter {
    status:         AdapterStatus,
    backend:        Option<Box<dyn GestureBackend>>,
    pending:        Option<PendingInit>,
    classifier:     Classifier,
    last_timestamp: Option<u64>,
    stats:          AdapterStats,
}

impl GestureAdapter {
    /// Hand `backend` to a fresh thread for initialization and return
    /// immediately.  The outcome is picked up by [`poll`](Self::poll).
    pub fn start(backend: Box<dyn GestureBackend>, classifier: Classifier) -> Self {
        info!(backend = backend.name(), "initializing gesture backend");
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || {
            let mut backend = backend;
            let result = backend.initialize();
            // Receiver gone means the adapter was dropped mid-init.
            if let Err(mpsc::SendError((mut backend, _))) = tx.send((backend, result)) {
                backend.close();
            }
        });
        GestureAdapter {
            status:         AdapterStatus::Uninitialized,
            backend:        None,
            pending:        Some(PendingInit { rx, worker }),
            classifier,
            last_timestamp: None,
            stats:          AdapterStats::default(),
        }
    }

    pub fn status(&self) -> &AdapterStatus { &self.status }
    pub fn is_active(&self) -> bool { self.status == AdapterStatus::Ready }
    pub fn stats(&self) -> AdapterStats { self.stats }
    pub fn last_timestamp(&self) -> Option<u64> { self.last_timestamp }

    /// Per render frame.  Returns a sample only when the backend is ready
    /// and its newest frame is newer than the last one processed.
    pub fn poll(&mut self) -> Option<GestureSample> {
        self.refresh_status();
        let backend = self.backend.as_mut()?;
        if self.status != AdapterStatus::Ready {
            return None;
        }

        let ts = backend.latest_frame()?;
        if self.last_timestamp.is_some_and(|last| ts <= last) {
            self.stats.duplicates += 1;
            trace!(ts, "source frame unchanged");
            return None;
        }
        self.last_timestamp = Some(ts);

        let classified = backend
            .classify_frame(ts)
            .and_then(|det| self.classifier.classify(ts, &det));
        match classified {
            Ok(sample) => {
                self.stats.classified += 1;
                Some(sample)
            }
            Err(e) => {
                self.stats.errors += 1;
                debug!(ts, error = %e, "frame classification failed");
                Some(GestureSample::no_hand(ts))
            }
        }
    }

    /// Pick up the initialization outcome if it has arrived.
    pub fn refresh_status(&mut self) -> &AdapterStatus {
        let Some(pending) = &self.pending else { return &self.status };
        let outcome = match pending.rx.try_recv() {
            Ok(outcome)                     => Some(outcome),
            Err(TryRecvError::Empty)        => return &self.status,
            Err(TryRecvError::Disconnected) => None,
        };
        if let Some(p) = self.pending.take() {
            let _ = p.worker.join();
        }

        match outcome {
            Some((backend, Ok(()))) => {
                info!(backend = backend.name(), "gesture backend ready");
                self.backend = Some(backend);
                self.status  = AdapterStatus::Ready;
            }
            Some((mut backend, Err(e))) => {
                warn!(backend = backend.name(), error = %e, "gesture backend failed to initialize");
                backend.close();
                self.status = AdapterStatus::Failed(e);
            }
            None => {
                warn!("gesture initialization task was lost");
                self.status = AdapterStatus::Failed(InitError::InitTaskLost);
            }
        }
        &self.status
    }

    /// Release the backend, waiting for an in-flight initialization first.
    /// Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(p) = self.pending.take() {
            if let Ok((mut backend, _)) = p.rx.recv() {
                backend.close();
            }
            let _ = p.worker.join();
            info!("gesture backend closed during initialization");
        }
        if let Some(mut backend) = self.backend.take() {
            backend.close();
            info!(backend = backend.name(), "gesture backend closed");
        }
    }
}

impl Drop for GestureAdapter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{GestureLabel, ScriptedBackend, ScriptedFrame};
    use glam::Vec2;
    use std::sync::atomic::Ordering;
    use std::time::{Duration, Instant};

    fn wait_ready(adapter: &mut GestureAdapter) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while *adapter.refresh_status() == AdapterStatus::Uninitialized && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn duplicate_timestamps_skipped() {
        let script = vec![
            ScriptedFrame::gesture(1, "Open_Palm", 0.9, Vec2::splat(0.5)),
            ScriptedFrame::gesture(1, "Closed_Fist", 0.9, Vec2::splat(0.5)),
            ScriptedFrame::gesture(2, "Closed_Fist", 0.9, Vec2::splat(0.5)),
        ];
        let mut a = GestureAdapter::start(Box::new(ScriptedBackend::new(script)), Classifier::default());
        wait_ready(&mut a);
        assert!(a.is_active());

        let s1 = a.poll().unwrap();
        assert_eq!((s1.timestamp, s1.label), (1, GestureLabel::Open));
        assert!(a.poll().is_none());
        let s2 = a.poll().unwrap();
        assert_eq!((s2.timestamp, s2.label), (2, GestureLabel::Closed));
        assert!(a.poll().is_none());
        assert_eq!(a.stats(), AdapterStats { classified: 2, duplicates: 2, errors: 0 });
    }

    #[test]
    fn classification_error_becomes_no_hand() {
        let script = vec![ScriptedFrame::failure(4)];
        let mut a = GestureAdapter::start(Box::new(ScriptedBackend::new(script)), Classifier::default());
        wait_ready(&mut a);
        assert_eq!(a.poll(), Some(GestureSample::no_hand(4)));
        assert_eq!(a.stats().errors, 1);
    }

    #[test]
    fn init_failure_reports_inactive_and_closes() {
        let backend = ScriptedBackend::new(vec![ScriptedFrame::no_hand(1)])
            .failing(InitError::CameraUnavailable("no device".into()));
        let closed = backend.closed_flag();
        let mut a = GestureAdapter::start(Box::new(backend), Classifier::default());
        wait_ready(&mut a);
        assert_eq!(*a.status(), AdapterStatus::Failed(InitError::CameraUnavailable("no device".into())));
        assert!(!a.is_active());
        assert!(a.poll().is_none());
        assert!(closed.load(Ordering::SeqCst));
    }

    #[test]
    fn nothing_before_ready() {
        let backend = ScriptedBackend::new(vec![ScriptedFrame::no_hand(1)])
            .with_init_delay(Duration::from_millis(200));
        let mut a = GestureAdapter::start(Box::new(backend), Classifier::default());
        assert!(a.poll().is_none());
        assert_eq!(*a.status(), AdapterStatus::Uninitialized);
    }

    #[test]
    fn shutdown_during_init_closes_backend() {
        let backend = ScriptedBackend::new(vec![]).with_init_delay(Duration::from_millis(50));
        let closed = backend.closed_flag();
        let mut a = GestureAdapter::start(Box::new(backend), Classifier::default());
        a.shutdown();
        assert!(closed.load(Ordering::SeqCst));
        a.shutdown();
    }

    #[test]
    fn drop_after_ready_closes_backend() {
        let backend = ScriptedBackend::new(vec![]);
        let closed = backend.closed_flag();
        let mut a = GestureAdapter::start(Box::new(backend), Classifier::default());
        wait_ready(&mut a);
        drop(a);
        assert!(closed.load(Ordering::SeqCst));
    }
}
