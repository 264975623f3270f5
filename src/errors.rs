//! The error type shared by every fallible operation in the crate.

use failure::Fail;
use std::io;

/// Everything that can go wrong between parsing a region and writing
/// the finished image.  The evaluator itself cannot fail; these are
/// all precondition violations or failures of the machinery around
/// it.
#[derive(Debug, Fail)]
pub enum MandelbrotError {
    /// The requested image has no pixels.
    #[fail(display = "Image size must be greater than zero")]
    InvalidSize,

    /// The region bounds are not finite, or not ordered low to high.
    #[fail(display = "Invalid region: {}", _0)]
    InvalidRegion(String),

    /// The escape radius must be a finite, positive number.
    #[fail(display = "Escape radius must be finite and positive, got {}", _0)]
    InvalidRadius(f64),

    /// The worker pool needs at least one thread.
    #[fail(display = "Worker count must be at least one")]
    InvalidWorkers,

    /// A worker thread panicked before handing back its rows.
    #[fail(display = "A render worker failed")]
    WorkerFailed,

    /// Writing the output image failed.
    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for MandelbrotError {
    fn from(err: io::Error) -> Self {
        MandelbrotError::Io(err)
    }
}
