// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid evaluation
//!
//! Walks every sample point of a plane, runs the orbit analysis for
//! the map x -> x² + c at each one, and collects the answers into a
//! field keyed by the sample point.  The threaded version cuts the
//! plane into vertical strips, sweeps each strip on its own thread
//! with nothing shared between them, and unions the partial fields
//! once every thread has finished.

extern crate crossbeam;

use num::Complex;
use std::collections::HashMap;

use errors::FieldError;
use orbit::{iterations_to_repeat, mandelbrot, Orbit};
use planes::{InclusiveRange, Plane, Point};

/// Every sampled point, and what became of its orbit.
pub type Field = HashMap<Point, Orbit>;

/// Sweep one strip: each of the given real-axis columns, crossed with
/// each of the imaginary-axis rows.
pub fn sweep(columns: &[f64], rows: &[f64], max_iterations: usize) -> Field {
    sweep_by(columns, rows, &|c: Complex<f64>| {
        iterations_to_repeat(mandelbrot(c), max_iterations)
    })
}

fn sweep_by<A>(columns: &[f64], rows: &[f64], analyze: &A) -> Field
where
    A: Fn(Complex<f64>) -> Orbit,
{
    let mut field = Field::with_capacity(columns.len() * rows.len());
    for &re in columns {
        for &im in rows {
            let c = Complex::new(re, im);
            field.insert(c.into(), analyze(c));
        }
    }
    field
}

/// The whole plane, on the calling thread.
pub fn evaluate_single(plane: &Plane, max_iterations: usize) -> Field {
    sweep(&plane.columns(), &plane.rows(), max_iterations)
}

/// The whole plane, one thread per strip.  A worker count of zero is
/// treated as one.  The result does not depend on the worker count.
pub fn evaluate(plane: &Plane, max_iterations: usize, workers: usize) -> Result<Field, FieldError> {
    evaluate_by(plane, workers, &|c: Complex<f64>| {
        iterations_to_repeat(mandelbrot(c), max_iterations)
    })
}

fn evaluate_by<A>(plane: &Plane, workers: usize, analyze: &A) -> Result<Field, FieldError>
where
    A: Fn(Complex<f64>) -> Orbit + Sync,
{
    let strips = plane.strips(workers);
    let rows = plane.rows();
    debug!(
        "Sweeping {} points in {} strips ({} requested)",
        plane.len(),
        strips.len(),
        workers
    );

    let partials = crossbeam::scope(|spawner| {
        let rows = &rows;
        let handles: Vec<_> = strips
            .iter()
            .enumerate()
            .map(|(index, strip)| {
                spawner.spawn(move |_| {
                    let partial = sweep_by(strip, rows, analyze);
                    trace!("Strip {} finished with {} points", index, partial.len());
                    partial
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| FieldError::WorkerPanicked))
            .collect::<Result<Vec<Field>, FieldError>>()
    })
    .map_err(|_| FieldError::WorkerPanicked)??;

    let mut field = Field::with_capacity(partials.iter().map(|partial| partial.len()).sum());
    for partial in partials {
        field.extend(partial);
    }
    debug!("Merged {} points", field.len());
    Ok(field)
}

/// Evaluate the grid over `real` x `imag` sampled every `step`.  Fails
/// only if the step cannot walk the ranges.
pub fn evaluate_grid(
    real: InclusiveRange,
    imag: InclusiveRange,
    step: f64,
    max_iterations: usize,
    workers: usize,
) -> Result<Field, FieldError> {
    let plane = Plane::new(real, imag, step)?;
    evaluate(&plane, max_iterations, workers)
}

/// Totals over a field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Summary {
    /// Points in the field.
    pub points: usize,
    /// Points whose orbit repeated.
    pub cycles: usize,
    /// Points whose orbit diverged or ran out of iterations.
    pub undetermined: usize,
    /// The largest iteration count at which a repeat was seen.
    pub longest: Option<usize>,
}

impl Summary {
    /// Tally a field.
    pub fn of(field: &Field) -> Summary {
        let cycles = field.values().filter(|orbit| orbit.is_cycle()).count();
        Summary {
            points: field.len(),
            cycles,
            undetermined: field.len() - cycles,
            longest: field.values().filter_map(|orbit| orbit.iterations()).max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{self, Rng};
    use std::collections::HashSet;

    fn plane(real: (f64, f64), imag: (f64, f64), step: f64) -> Plane {
        Plane::new(
            InclusiveRange::new(real.0, real.1).unwrap(),
            InclusiveRange::new(imag.0, imag.1).unwrap(),
            step,
        )
        .unwrap()
    }

    #[test]
    fn the_real_line_from_minus_one_to_one() {
        for workers in 0..5 {
            let field = evaluate_grid(
                InclusiveRange::new(-1.0, 1.0).unwrap(),
                InclusiveRange::new(0.0, 0.0).unwrap(),
                1.0,
                1000,
                workers,
            )
            .unwrap();
            assert_eq!(field.len(), 3);
            assert_eq!(field[&Point::new(-1.0, 0.0)], Orbit::Cycle(3));
            assert_eq!(field[&Point::new(0.0, 0.0)], Orbit::Cycle(2));
            assert_eq!(field[&Point::new(1.0, 0.0)], Orbit::Undetermined);
        }
    }

    #[test]
    fn a_bad_step_is_refused() {
        let unit = InclusiveRange::new(0.0, 1.0).unwrap();
        assert_eq!(evaluate_grid(unit, unit, 0.0, 10, 2), Err(FieldError::BadStep(0.0)));
    }

    #[test]
    fn cycles_are_never_shorter_than_two() {
        let field = evaluate(&plane((-2.0, 0.5), (-1.0, 1.0), 0.125), 200, 3).unwrap();
        assert!(field.values().filter_map(|orbit| orbit.iterations()).all(|n| n >= 2));
        assert!(field.values().any(|orbit| orbit.is_cycle()));
    }

    #[test]
    fn threads_do_not_change_the_field() {
        let pm = plane((-1.5, 0.5), (-0.5, 0.75), 0.25);
        let single = evaluate_single(&pm, 100);
        assert_eq!(single.len(), pm.len());
        for workers in 1..10 {
            assert_eq!(evaluate(&pm, 100, workers).unwrap(), single);
        }
    }

    #[test]
    fn random_planes_cover_the_same_keys() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let (a, b): (f64, f64) = (rng.gen_range(-2.0, 1.0), rng.gen_range(-2.0, 1.0));
            let (c, d): (f64, f64) = (rng.gen_range(-1.5, 1.5), rng.gen_range(-1.5, 1.5));
            let step: f64 = rng.gen_range(0.05, 0.5);
            let workers: usize = rng.gen_range(1, 17);
            let pm = plane((a.min(b), a.max(b)), (c.min(d), c.max(d)), step);

            let expected: HashSet<Point> = evaluate_single(&pm, 30).keys().cloned().collect();
            let actual: HashSet<Point> = evaluate(&pm, 30, workers).unwrap().keys().cloned().collect();
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn a_panicking_worker_fails_the_whole_field() {
        let pm = plane((-1.0, 1.0), (0.0, 0.0), 1.0);
        let result = evaluate_by(&pm, 3, &|c: Complex<f64>| {
            if c.re > 0.5 {
                panic!("strip at {} gave up", c.re);
            }
            Orbit::Undetermined
        });
        assert_eq!(result, Err(FieldError::WorkerPanicked));
    }

    #[test]
    fn sweep_crosses_columns_with_rows() {
        let field = sweep(&[-1.0, 0.0], &[0.0, 0.5], 50);
        assert_eq!(field.len(), 4);
        assert_eq!(field[&Point::new(-1.0, 0.0)], Orbit::Cycle(3));
        assert!(field.contains_key(&Point::new(0.0, 0.5)));
    }

    #[test]
    fn summary_tallies_the_field() {
        let field = evaluate(&plane((-1.0, 1.0), (0.0, 0.0), 1.0), 1000, 2).unwrap();
        assert_eq!(
            Summary::of(&field),
            Summary {
                points: 3,
                cycles: 2,
                undetermined: 1,
                longest: Some(3),
            }
        );
    }

    #[test]
    fn an_empty_field_has_an_empty_summary() {
        assert_eq!(Summary::of(&Field::new()), Summary::default());
    }
}
