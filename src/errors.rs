// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The handful of ways an evaluation can be refused or fail.

/// Everything that can go wrong between describing a plane and
/// getting a field back.  Floating point trouble inside an orbit
/// (overflow, NaN) is not an error; it comes back as
/// `Orbit::Undetermined`.
#[derive(Debug, Fail, PartialEq)]
pub enum FieldError {
    /// A range whose start lies beyond its end.  NaN bounds land
    /// here too, since they cannot be ordered.
    #[fail(display = "Start {} should not be greater than end {}", start, end)]
    InvertedRange {
        /// The offending start.
        start: f64,
        /// The offending end.
        end: f64,
    },

    /// A step that would never walk off the end of a range.
    #[fail(display = "Step must be a positive, finite number, got {}", _0)]
    BadStep(f64),

    /// One of the strip workers panicked; the whole field is discarded.
    #[fail(display = "A worker thread panicked while sweeping its strip")]
    WorkerPanicked,
}
