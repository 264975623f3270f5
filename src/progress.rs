//! Progress reporting for a render.  Reporters only observe; nothing
//! they do can change the bitmap.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives notice of each finished work unit.  Must be shareable
/// across the worker pool.
pub trait Progress: Sync {
    /// Called once, before any unit starts, with the number of units.
    fn start(&self, total: usize);

    /// Called once per finished unit with that unit's row index.
    /// Indices arrive in completion order, which need not be row order.
    fn advance(&self, index: usize);

    /// Called once after every unit has finished.
    fn finish(&self);
}

/// Reports nothing.
#[derive(Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _total: usize) {}
    fn advance(&self, _index: usize) {}
    fn finish(&self) {}
}

/// Logs every tenth row index along with how much of the render is
/// done.
#[derive(Debug, Default)]
pub struct LogProgress {
    total: AtomicUsize,
    done: AtomicUsize,
}

impl LogProgress {
    /// A reporter with nothing done yet.
    pub fn new() -> Self {
        LogProgress::default()
    }

    /// The number of units finished so far.
    pub fn done(&self) -> usize {
        self.done.load(Ordering::SeqCst)
    }
}

impl Progress for LogProgress {
    fn start(&self, total: usize) {
        self.total.store(total, Ordering::SeqCst);
        self.done.store(0, Ordering::SeqCst);
        info!("Computing {} rows", total);
    }

    fn advance(&self, index: usize) {
        let done = self.done.fetch_add(1, Ordering::SeqCst) + 1;
        if index % 10 == 0 {
            let total = self.total.load(Ordering::SeqCst).max(1);
            info!("Computed row {} ({}/{}, {}%)", index, done, total, done * 100 / total);
        }
    }

    fn finish(&self) {
        debug!("Finished {} rows", self.done());
    }
}
