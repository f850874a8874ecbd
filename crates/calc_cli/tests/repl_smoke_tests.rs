//! End-to-end REPL checks, driving the binary over stdin.
//!
//! These pin the user-visible contract: mode and unit commands mutate the
//! session defaults, expressions evaluate against them, and errors print
//! without ending the session.

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to run the REPL with the given input
fn run_calc(input: &str) -> assert_cmd::assert::Assert {
    Command::new(cargo::cargo_bin!("calc_cli"))
        .write_stdin(input)
        .assert()
}

// =============================================================================
// Mode routing
// =============================================================================

#[test]
fn test_auto_mode_trig_on_integers_is_floating_point() {
    // Plain integers take the float table in auto mode, artifacts and all
    run_calc("sin(30)\n")
        .success()
        .stdout(predicate::str::contains("0.49999999999999994"));
}

#[test]
fn test_symbolic_mode_prints_exact_values() {
    run_calc("mode symbolic\nsin(30)\n")
        .success()
        .stdout(predicate::str::contains("mode: symbolic"))
        .stdout(predicate::str::contains("1/2"));
}

#[test]
fn test_numeric_symbolic_collapses_exact_results() {
    // Computed exactly (1/2), then collapsed: 0.5, not 0.49999999999999994
    run_calc("mode numeric_symbolic\nsin(30)\n")
        .success()
        .stdout(predicate::str::contains("0.5"))
        .stdout(predicate::str::contains("0.49999").not());
}

#[test]
fn test_invalid_mode_reports_all_choices() {
    run_calc("mode bogus\n")
        .success()
        .stdout(predicate::str::contains("invalid mode 'bogus'"))
        .stdout(predicate::str::contains("math"))
        .stdout(predicate::str::contains("numeric_symbolic"))
        .stdout(predicate::str::contains("numeric_auto"));
}

#[test]
fn test_mode_command_shows_current_mode() {
    run_calc("mode\n")
        .success()
        .stdout(predicate::str::contains("mode: auto"));
}

// =============================================================================
// Angle units
// =============================================================================

#[test]
fn test_degrees_are_the_default_for_inverse_trig() {
    run_calc("arcsin(1)\n")
        .success()
        .stdout(predicate::str::contains("90.0"));
}

#[test]
fn test_radians_command_switches_unit() {
    run_calc("radians\nsin(pi/2)\n")
        .success()
        .stdout(predicate::str::contains("angle unit: radians"))
        .stdout(predicate::str::contains("\n1\n"));
}

// =============================================================================
// Logarithms
// =============================================================================

#[test]
fn test_log_defaults_to_base_ten() {
    run_calc("log(100)\n")
        .success()
        .stdout(predicate::str::contains("2.0"));
}

#[test]
fn test_symbolic_log_with_explicit_base() {
    run_calc("mode symbolic; log(8, 2)\n")
        .success()
        .stdout(predicate::str::contains("\n3\n"));
}

// =============================================================================
// Session behavior
// =============================================================================

#[test]
fn test_semicolons_separate_statements() {
    run_calc("mode numeric_symbolic; sin(30)\n")
        .success()
        .stdout(predicate::str::contains("mode: numeric_symbolic"))
        .stdout(predicate::str::contains("0.5"));
}

#[test]
fn test_errors_do_not_end_the_session() {
    run_calc("foo(1)\nsin(90)\n")
        .success()
        .stdout(predicate::str::contains("unknown function 'foo'"))
        .stdout(predicate::str::contains("1.0"));
}

#[test]
fn test_quit_stops_reading() {
    run_calc("quit\nsin(30)\n")
        .success()
        .stdout(predicate::str::contains("Goodbye!"))
        .stdout(predicate::str::contains("0.49999").not());
}

#[test]
fn test_help_lists_commands() {
    run_calc("help\n")
        .success()
        .stdout(predicate::str::contains("mode <name>"))
        .stdout(predicate::str::contains("radians"))
        .stdout(predicate::str::contains("arcsin"));
}
