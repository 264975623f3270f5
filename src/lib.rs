#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot membership renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which the orbit of z = z * z + c, starting at zero, stays bounded.
//! No finite computation can prove a point is bounded, so we iterate
//! each point up to a cap and call it a member if it never left the
//! escape radius; any point that does leave is certainly outside.
//!
//! This crate samples a square grid of such points over a rectangle
//! of the complex plane, producing a bitmap of ones (members) and
//! zeros (escaped), and writes that bitmap out as a black and white
//! image.  Rendering can be done on one thread or spread row by row
//! over a pool of workers; both give the same bitmap.

extern crate crossbeam;
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;

#[cfg(test)]
#[macro_use]
extern crate itertools;
#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate tempfile;

pub mod bitmap;
pub mod errors;
pub mod membership;
pub mod planes;
pub mod progress;
pub mod sampler;

pub use bitmap::Bitmap;
pub use errors::MandelbrotError;
pub use membership::{is_bounded, ESCAPE_RADIUS, ITERATION_CAP};
pub use planes::{Pixel, PlaneMapper, Region};
pub use progress::{LogProgress, NoProgress, Progress};
pub use sampler::{
    compute_bitmap, compute_bitmap_threaded, compute_bitmap_with_progress, SamplerConfig,
    DEFAULT_WORKERS,
};
