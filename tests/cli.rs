// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate assert_cmd;
extern crate predicates;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn cyclebrot() -> Command {
    Command::cargo_bin("cyclebrot").unwrap()
}

#[test]
fn reports_the_real_line() {
    cyclebrot()
        .args(&["--real=-1,1", "--imag=0,0", "--step=1", "--threads=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("points: 3"))
        .stdout(predicate::str::contains("cycles: 2"))
        .stdout(predicate::str::contains("undetermined: 1"))
        .stdout(predicate::str::contains("longest cycle: 3"))
        .stdout(predicate::str::contains("elapsed ms: "));
}

#[test]
fn hyphenated_ranges_parse_as_values() {
    cyclebrot()
        .args(&["--real", "-2,-2", "--imag", "0,0", "--step", "1", "--threads", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("points: 1"))
        .stdout(predicate::str::contains("longest cycle: 3"));
}

#[test]
fn refuses_an_inverted_range() {
    cyclebrot()
        .args(&["--real=1,-1", "--imag=0,0", "--step=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("should not be greater than"));
}

#[test]
fn refuses_a_zero_step() {
    cyclebrot()
        .args(&["--real=0,1", "--imag=0,1", "--step=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Step must be a positive number"));
}

#[test]
fn refuses_zero_threads() {
    cyclebrot()
        .args(&["--real=0,1", "--imag=0,1", "--step=1", "--threads=0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count must be between 1 and"));
}

#[test]
fn reports_a_step_lost_to_rounding() {
    cyclebrot()
        .args(&["--real=1e20,2e20", "--imag=0,0", "--step=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Evaluation failure: Step must be a positive, finite number"));
}

#[test]
fn refuses_an_unparseable_range() {
    cyclebrot()
        .args(&["--real=0;1", "--imag=0,0", "--step=1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse range '0;1'"));
}

#[test]
fn refuses_an_unparseable_thread_count() {
    cyclebrot()
        .args(&["--real=0,1", "--imag=0,0", "--step=1", "--threads=many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse thread count"));
}
