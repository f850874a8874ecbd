//! Interactive read-eval-print loop.
//!
//! Holds the session [`Calculator`] and a thin command layer over it:
//! `mode` and the unit commands mutate the process-wide defaults, and any
//! other input evaluates as an expression. Line editing and history come
//! from rustyline; history persists to `~/.calc_history`.

use rustyline::error::ReadlineError;

use crate::eval;
use calc_engine::{AngleUnit, Calculator, Mode, ALL_MODES};

pub struct Repl {
    calc: Calculator,
}

impl Repl {
    pub fn new() -> Self {
        Repl {
            calc: Calculator::new(),
        }
    }

    /// Prompt with indicators for non-default settings, so a session left
    /// in symbolic/radian state is visible at a glance.
    fn build_prompt(&self) -> String {
        let mut indicators: Vec<String> = Vec::new();

        if self.calc.mode() != Mode::Auto {
            indicators.push(format!("[mode:{}]", self.calc.mode()));
        }
        if self.calc.unit() == AngleUnit::Radians {
            indicators.push("[rad]".to_string());
        }

        if indicators.is_empty() {
            "> ".to_string()
        } else {
            format!("{} > ", indicators.join(""))
        }
    }

    pub fn run(&mut self) -> rustyline::Result<()> {
        println!("Mode-switchable calculator");
        println!("Enter an expression (e.g., 'sin(30)'); 'help' lists commands.");

        let config = rustyline::Config::builder().max_history_size(200)?.build();
        let mut rl =
            rustyline::Editor::<(), rustyline::history::DefaultHistory>::with_config(config)?;

        // History file path: ~/.calc_history
        let history_path = dirs::home_dir()
            .map(|p| p.join(".calc_history"))
            .unwrap_or_else(|| std::path::PathBuf::from(".calc_history"));

        // Load history if the file exists (errors are silently ignored)
        let _ = rl.load_history(&history_path);

        loop {
            let prompt = self.build_prompt();
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line)?;

                    if line == "quit" || line == "exit" {
                        println!("Goodbye!");
                        break;
                    }

                    // Semicolons separate multiple statements on one line,
                    // e.g. "mode symbolic; sin(30)"
                    for statement in line.split(';') {
                        let statement = statement.trim();
                        if statement.is_empty() {
                            continue;
                        }
                        self.handle_command(statement);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history on exit (errors are silently ignored)
        let _ = rl.save_history(&history_path);

        Ok(())
    }

    fn handle_command(&mut self, line: &str) {
        match line {
            "help" => {
                print_help();
                return;
            }
            "mode" => {
                println!("mode: {}", self.calc.mode());
                return;
            }
            "degrees" => {
                self.calc.set_unit(AngleUnit::Degrees);
                println!("angle unit: degrees");
                return;
            }
            "radians" => {
                self.calc.set_unit(AngleUnit::Radians);
                println!("angle unit: radians");
                return;
            }
            _ => {}
        }

        if let Some(name) = line.strip_prefix("mode ") {
            match name.trim().parse::<Mode>() {
                Ok(mode) => {
                    self.calc.set_mode(mode);
                    println!("mode: {}", mode);
                }
                Err(err) => println!("Error: {}", err),
            }
            return;
        }

        match eval::eval_line(&self.calc, line) {
            Ok(value) => println!("{}", value),
            Err(err) => println!("Error: {}", err),
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

fn print_help() {
    println!("Commands:");
    println!("  mode                    Show the current mode");
    println!("  mode <name>             Switch mode; one of:");
    for mode in ALL_MODES {
        println!("                            {}", mode.name());
    }
    println!("  degrees                 Trig angles in degrees (default)");
    println!("  radians                 Trig angles in radians");
    println!("  help                    This text");
    println!("  quit, exit              Leave");
    println!();
    println!("Anything else evaluates as an expression:");
    println!("  sin(30)                 Trig: sin, cos, tan, arcsin, arccos, arctan");
    println!("  log(8, 2)               Logs: log (base 10 unless given), ln (base e)");
    println!("  2^10 + 2pi              Arithmetic, sqrt, constants pi and e, free symbols");
}
