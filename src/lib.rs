#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cyclebrot
//!
//! The Mandelbrot set is usually drawn by asking how fast the orbit of
//! x -> x² + c runs off to infinity.  Cyclebrot asks a different
//! question of every point on a grid of the complex plane: does the
//! orbit, started at zero, ever produce *exactly* a value it has
//! produced before, and if so, on which iteration?  Answering that means
//! remembering every value the orbit visits, so it is a good deal more
//! memory-hungry than the escape-radius test, and the answers depend
//! on the bit-for-bit behaviour of IEEE doubles.
//!
//! The grid is described by a `Plane`, the per-point question is
//! answered by `orbit::iterations_to_repeat`, and `field::evaluate`
//! spreads the plane across threads and gathers the answers into a
//! single `Field`.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

#[cfg(test)]
extern crate rand;

pub mod errors;
pub mod field;
pub mod orbit;
pub mod planes;

pub use errors::FieldError;
pub use field::{evaluate, evaluate_grid, evaluate_single, Field, Summary};
pub use orbit::{iterations_to_repeat, Orbit};
pub use planes::{InclusiveRange, Plane, Point};

/// The number of workers to use when the caller has no opinion: one per
/// logical CPU, and never fewer than one.
pub fn default_workers() -> usize {
    std::cmp::max(num_cpus::get(), 1)
}
