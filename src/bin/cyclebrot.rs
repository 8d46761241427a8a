// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate cyclebrot;
extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use cyclebrot::{InclusiveRange, Plane, Summary};
use std::str::FromStr;
use std::time::Instant;

fn parse_range(s: &str) -> Result<InclusiveRange, failure::Error> {
    let mut bounds = s.splitn(2, ',').map(f64::from_str);
    match (bounds.next(), bounds.next()) {
        (Some(Ok(start)), Some(Ok(end))) => Ok(InclusiveRange::new(start, end)?),
        _ => Err(failure::err_msg(format!("Could not parse range '{}'", s))),
    }
}

fn validate_range(s: String) -> Result<(), String> {
    parse_range(&s).map(|_| ()).map_err(|e| e.to_string())
}

fn validate_step(s: String) -> Result<(), String> {
    match f64::from_str(&s) {
        Ok(step) if step.is_finite() && step > 0.0 => Ok(()),
        Ok(_) => Err("Step must be a positive number".to_string()),
        Err(_) => Err("Could not parse step".to_string()),
    }
}

fn validate_count(s: &str, what: &str, high: usize) -> Result<(), String> {
    match usize::from_str(s) {
        Ok(n) if n >= 1 && n <= high => Ok(()),
        Ok(_) => Err(format!("{} must be between 1 and {}", what, high)),
        Err(_) => Err(format!("Could not parse {}", what.to_lowercase())),
    }
}

const REAL: &str = "real";
const IMAG: &str = "imag";
const STEP: &str = "step";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

const MAX_THREADS: usize = 4096;
const MAX_ITERATIONS: usize = 1_000_000;

fn args<'a>(default_threads: &'a str) -> ArgMatches<'a> {
    App::new("cyclebrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Finds the points whose orbits repeat exactly")
        .arg(
            Arg::with_name(REAL)
                .long(REAL)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,4")
                .validator(validate_range)
                .help("Inclusive range of the real axis, as start,end"),
        )
        .arg(
            Arg::with_name(IMAG)
                .long(IMAG)
                .short("m")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0,4")
                .validator(validate_range)
                .help("Inclusive range of the imaginary axis, as start,end"),
        )
        .arg(
            Arg::with_name(STEP)
                .long(STEP)
                .short("s")
                .takes_value(true)
                .default_value("0.001")
                .validator(validate_step)
                .help("Distance between samples on both axes"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(|s| validate_count(&s, "Thread count", MAX_THREADS))
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| validate_count(&s, "Iteration count", MAX_ITERATIONS))
                .help("Iterations to try per point before giving up"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let real = parse_range(matches.value_of(REAL).unwrap_or_default())?;
    let imag = parse_range(matches.value_of(IMAG).unwrap_or_default())?;
    let step = f64::from_str(matches.value_of(STEP).unwrap_or_default())?;
    let threads = usize::from_str(matches.value_of(THREADS).unwrap_or_default())?;
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap_or_default())?;

    let plane = Plane::new(real, imag, step)?;
    info!(
        "Evaluating {} points over [{}, {}] x [{}, {}]i with {} threads, {} iterations each",
        plane.len(),
        plane.real.start(),
        plane.real.end(),
        plane.imag.start(),
        plane.imag.end(),
        threads,
        iterations
    );

    let start = Instant::now();
    let field = cyclebrot::evaluate(&plane, iterations, threads)?;
    let elapsed = start.elapsed();
    info!("Evaluation took {:?}", elapsed);

    let summary = Summary::of(&field);
    println!("points: {}", summary.points);
    println!("cycles: {}", summary.cycles);
    println!("undetermined: {}", summary.undetermined);
    match summary.longest {
        Some(n) => println!("longest cycle: {}", n),
        None => println!("longest cycle: none"),
    }
    println!(
        "elapsed ms: {}",
        elapsed.as_secs() * 1000 + u64::from(elapsed.subsec_millis())
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let default_threads = cyclebrot::default_workers().to_string();
    let matches = args(&default_threads);

    if let Err(e) = run(&matches) {
        eprintln!("Evaluation failure: {}", e);
        std::process::exit(1);
    }
}
