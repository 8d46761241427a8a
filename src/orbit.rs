// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Orbit analysis
//!
//! An orbit is what you get by starting at zero and feeding a function
//! its own output, over and over: f(0), f(f(0)), f(f(f(0))), and so on.
//! The classic Mandelbrot test watches for the orbit to leave a circle
//! of radius two.  This one does something stricter and hungrier: it
//! remembers every value the orbit has produced and reports the moment
//! one of them comes back *exactly*.  Floating point being what it is,
//! that only happens for orbits that fall into a true cycle of
//! representable values, which is what makes the result interesting.

use num::{Complex, Zero};
use std::collections::{BTreeSet, HashSet};

use planes::Point;

/// What became of an orbit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Orbit {
    /// The orbit produced a value it had already produced, on this
    /// (1-based) application of the map.  Never less than 2.
    Cycle(usize),
    /// The orbit diverged, or the iteration budget ran out first.
    Undetermined,
}

impl Orbit {
    /// The iteration on which a repeat was seen, if one was.
    pub fn iterations(&self) -> Option<usize> {
        match *self {
            Orbit::Cycle(n) => Some(n),
            Orbit::Undetermined => None,
        }
    }

    /// True if the orbit repeated itself.
    pub fn is_cycle(&self) -> bool {
        self.iterations().is_some()
    }
}

/// A store of the values an orbit has visited.
pub trait Visited: Default {
    /// Remember `point`.  Returns false if it was already remembered.
    fn visit(&mut self, point: Point) -> bool;
}

impl Visited for HashSet<Point> {
    fn visit(&mut self, point: Point) -> bool {
        self.insert(point)
    }
}

impl Visited for BTreeSet<Point> {
    fn visit(&mut self, point: Point) -> bool {
        self.insert(point)
    }
}

/// Infinity minus infinity is NaN, and NaN minus anything is NaN;
/// every finite value minus itself is zero.
#[inline]
pub fn is_divergent(z: Complex<f64>) -> bool {
    z - z != Complex::zero()
}

/// The quadratic map x -> x² + c.
pub fn mandelbrot(c: Complex<f64>) -> impl Fn(Complex<f64>) -> Complex<f64> {
    move |x| x * x + c
}

/// Iterate `f` from zero at most `max_iterations` times, and return the
/// iteration on which it first produced a value it had produced before.
/// An orbit that diverges, or that outlasts the budget, is
/// `Undetermined`.
pub fn iterations_to_repeat<F>(f: F, max_iterations: usize) -> Orbit
where
    F: Fn(Complex<f64>) -> Complex<f64>,
{
    iterations_to_repeat_in::<HashSet<Point>, F>(f, max_iterations)
}

/// As `iterations_to_repeat`, with the visited values kept in `S`.
pub fn iterations_to_repeat_in<S, F>(f: F, max_iterations: usize) -> Orbit
where
    S: Visited,
    F: Fn(Complex<f64>) -> Complex<f64>,
{
    let mut seen = S::default();
    let mut z: Complex<f64> = Complex::zero();
    for iteration in 1..=max_iterations {
        z = f(z);
        if !seen.visit(z.into()) {
            return Orbit::Cycle(iteration);
        }
        if is_divergent(z) {
            return Orbit::Undetermined;
        }
    }
    Orbit::Undetermined
}
