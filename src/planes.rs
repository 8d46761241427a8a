// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Plane struct, which describes a rectangle on the
//! complex plane by two inclusive ranges (one for the real axis, one
//! for the imaginary axis) and the step at which both are sampled,
//! along with the Point key under which every sample is recorded.
use std::cmp::{self, Ordering};
use std::hash::{Hash, Hasher};

use itertools;
use num::Complex;

use errors::FieldError;

/// A sampled location, or a value visited by an orbit.  A bare
/// `Complex<f64>` is neither `Eq` nor `Hash`, so this wrapper compares,
/// hashes and orders on the raw bit patterns of both components.  Two
/// points are equal only when they are identical: `0.0` and `-0.0`
/// differ, and a NaN equals a NaN with the same payload.
#[derive(Copy, Clone, Debug)]
pub struct Point(pub Complex<f64>);

impl Point {
    /// Build a point from its real and imaginary parts.
    pub fn new(re: f64, im: f64) -> Point {
        Point(Complex::new(re, im))
    }

    fn bits(&self) -> (u64, u64) {
        (self.0.re.to_bits(), self.0.im.to_bits())
    }
}

impl From<Complex<f64>> for Point {
    fn from(z: Complex<f64>) -> Point {
        Point(z)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Point) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

/// Not numeric order; any total order will do for ordered sets.
impl Ord for Point {
    fn cmp(&self, other: &Point) -> Ordering {
        self.bits().cmp(&other.bits())
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Point) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A closed interval on one axis.  The only way to get one is through
/// `new`, which refuses an interval whose start lies past its end.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InclusiveRange {
    start: f64,
    end: f64,
}

impl InclusiveRange {
    /// Fails immediately if `start > end`.  Bounds are never swapped.
    pub fn new(start: f64, end: f64) -> Result<InclusiveRange, FieldError> {
        if !(start <= end) {
            return Err(FieldError::InvertedRange { start, end });
        }
        Ok(InclusiveRange { start, end })
    }

    /// The first value of the range.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// The last value of the range.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Walks from `start` towards `end` by repeatedly adding `step`,
    /// stopping at the first running value that exceeds `end`.  There
    /// is no drift correction: whether the end itself is sampled
    /// depends on how the additions round.  `step` must be positive.
    pub fn samples(&self, step: f64) -> impl Iterator<Item = f64> {
        let end = self.end;
        itertools::iterate(self.start, move |v| v + step).take_while(move |v| *v <= end)
    }

    // Adding `step` must move every value in the range.  The coarsest
    // spacing of doubles is at whichever bound has the larger magnitude.
    fn advances_by(&self, step: f64) -> bool {
        self.start + step > self.start && self.end + step > self.end
    }
}

/// The rectangle to evaluate: a real range, an imaginary range, and the
/// step used to sample both.
#[derive(Copy, Clone, Debug)]
pub struct Plane {
    /// The range walked along the real axis.
    pub real: InclusiveRange,
    /// The range walked along the imaginary axis.
    pub imag: InclusiveRange,
    step: f64,
}

impl Plane {
    /// Fails if `step` is not a positive, finite number, or if it is so
    /// small next to the bounds that adding it would not move a sample.
    pub fn new(real: InclusiveRange, imag: InclusiveRange, step: f64) -> Result<Plane, FieldError> {
        if !(step.is_finite() && step > 0.0) || !real.advances_by(step) || !imag.advances_by(step) {
            return Err(FieldError::BadStep(step));
        }
        Ok(Plane { real, imag, step })
    }

    /// The sampling step, shared by both axes.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Every real-axis sample, in order.
    pub fn columns(&self) -> Vec<f64> {
        self.real.samples(self.step).collect()
    }

    /// Every imaginary-axis sample, in order.
    pub fn rows(&self) -> Vec<f64> {
        self.imag.samples(self.step).collect()
    }

    /// The total number of points in the grid.
    pub fn len(&self) -> usize {
        self.real.samples(self.step).count() * self.imag.samples(self.step).count()
    }

    /// Since a range always contains its start, a plane is never empty;
    /// provided for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cuts the plane into vertical strips, one per worker.  The real
    /// samples are generated once for the whole plane and then dealt
    /// out in contiguous runs, so each strip holds exactly the columns
    /// a single sweep would visit, and every strip spans the complete
    /// imaginary range.  A zero worker count is treated as one; there
    /// are never more strips than columns, and no strip is empty.
    pub fn strips(&self, workers: usize) -> Vec<Vec<f64>> {
        let columns = self.columns();
        let count = cmp::max(columns.len(), 1);
        let workers = cmp::min(cmp::max(workers, 1), count);
        let width = count / workers + if count % workers != 0 { 1 } else { 0 };
        columns.chunks(width).map(|strip| strip.to_vec()).collect()
    }
}
