// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Samples a region of the complex plane into a membership bitmap.
//!
//! The unit of work is one row of the bitmap.  A row holds every point
//! sharing one imaginary coordinate, walking the real axis from the
//! low bound upward; row zero is the low imaginary bound.  The serial
//! renderer walks the rows in order.  The threaded renderer hands rows
//! out to a fixed pool of workers, each of which keeps the rows it
//! finished, keyed by row index, until it is joined.  Only then are
//! the rows dropped into their slots and stitched together, so the
//! result cannot depend on which worker finished first.

use crossbeam;
use num::Complex;
use std::sync::Mutex;

use bitmap::Bitmap;
use errors::MandelbrotError;
use membership::{is_bounded, ESCAPE_RADIUS, ITERATION_CAP};
use planes::{PlaneMapper, Region};
use progress::{NoProgress, Progress};

/// Number of worker threads used when none is asked for.
pub const DEFAULT_WORKERS: usize = 4;

/// The knobs for a render: how long to iterate each point, how far it
/// may wander before it counts as escaped, and how many threads share
/// the work.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplerConfig {
    /// Iteration cap for the membership test.
    pub iterations: usize,
    /// Escape radius for the membership test.
    pub radius: f64,
    /// Size of the worker pool.  Ignored by the serial renderer.
    pub workers: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        SamplerConfig {
            iterations: ITERATION_CAP,
            radius: ESCAPE_RADIUS,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl SamplerConfig {
    /// Builds and validates a configuration.
    pub fn new(iterations: usize, radius: f64, workers: usize) -> Result<Self, MandelbrotError> {
        let config = SamplerConfig {
            iterations,
            radius,
            workers,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the radius and worker count.  Any iteration cap is
    /// accepted, including zero.
    pub fn validate(&self) -> Result<(), MandelbrotError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MandelbrotError::InvalidRadius(self.radius));
        }
        if self.workers == 0 {
            return Err(MandelbrotError::InvalidWorkers);
        }
        Ok(())
    }
}

/// Tests every point on one row of the plane.
fn render_row(plane: &PlaneMapper, row: usize, config: &SamplerConfig) -> Vec<u8> {
    let im = plane.row_to_im(row);
    (0..plane.size())
        .map(|column| {
            let c = Complex::new(plane.column_to_re(column), im);
            if is_bounded(c, config.iterations, config.radius) {
                1
            } else {
                0
            }
        })
        .collect()
}

/// Single-threaded render of a `size` x `size` bitmap.
pub fn compute_bitmap(
    size: usize,
    region: &Region,
    config: &SamplerConfig,
) -> Result<Bitmap, MandelbrotError> {
    compute_bitmap_with_progress(size, region, config, &NoProgress)
}

/// Single-threaded render, reporting each finished row.
pub fn compute_bitmap_with_progress(
    size: usize,
    region: &Region,
    config: &SamplerConfig,
    progress: &dyn Progress,
) -> Result<Bitmap, MandelbrotError> {
    config.validate()?;
    let plane = PlaneMapper::new(size, *region)?;
    debug!("Rendering {}x{} serially over {:?}", size, size, region);

    progress.start(size);
    let rows = (0..size)
        .map(|row| {
            let line = render_row(&plane, row, config);
            progress.advance(row);
            line
        })
        .collect();
    progress.finish();

    Ok(Bitmap::from_rows(rows))
}

/// Multi-threaded render using `config.workers` threads.  Produces
/// exactly the bitmap `compute_bitmap` would.  If any worker panics
/// the whole render fails; nothing partial is returned.
pub fn compute_bitmap_threaded(
    size: usize,
    region: &Region,
    config: &SamplerConfig,
    progress: &dyn Progress,
) -> Result<Bitmap, MandelbrotError> {
    config.validate()?;
    let plane = PlaneMapper::new(size, *region)?;
    debug!(
        "Rendering {}x{} on {} workers over {:?}",
        size, size, config.workers, region
    );

    let units = Mutex::new(0..size);
    progress.start(size);

    let joined = crossbeam::scope(|spawner| {
        let handles: Vec<_> = (0..config.workers)
            .map(|worker| {
                let units = &units;
                let plane = &plane;
                spawner.spawn(move |_| {
                    let mut rows: Vec<(usize, Vec<u8>)> = vec![];
                    loop {
                        // A poisoned queue means another worker died; stop
                        // taking work and let the join report it.
                        let unit = match units.lock() {
                            Ok(mut units) => units.next(),
                            Err(_) => None,
                        };
                        match unit {
                            Some(row) => {
                                rows.push((row, render_row(plane, row, config)));
                                progress.advance(row);
                            }
                            None => {
                                break;
                            }
                        }
                    }
                    debug!("Worker {} finished {} rows", worker, rows.len());
                    rows
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join())
            .collect::<Vec<_>>()
    })
    .map_err(|_| MandelbrotError::WorkerFailed)?;

    let mut slots: Vec<Option<Vec<u8>>> = vec![None; size];
    for result in joined {
        let rows = result.map_err(|_| MandelbrotError::WorkerFailed)?;
        for (index, row) in rows {
            slots[index] = Some(row);
        }
    }

    let rows = slots
        .into_iter()
        .collect::<Option<Vec<Vec<u8>>>>()
        .ok_or(MandelbrotError::WorkerFailed)?;
    progress.finish();

    Ok(Bitmap::from_rows(rows))
}
