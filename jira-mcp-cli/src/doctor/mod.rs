//! Doctor module for jira-mcp diagnostics
//!
//! Checks the installation, the `JIRA_*` environment and whether the
//! configured Jira site accepts the credentials.
//!
//! # Usage
//!
//! ```no_run
//! use jira_mcp_cli::doctor::Doctor;
//!
//! # async fn run() {
//! let mut doctor = Doctor::new();
//! let exit_code = doctor.run_diagnostics().await;
//! # }
//! ```
//!
//! The doctor returns exit codes:
//! - 0: All checks passed
//! - 1: Some warnings detected
//! - 2: Errors detected

use colored::*;

pub use types::*;

pub mod checks;
pub mod types;

/// Accumulates diagnostic results and prints a grouped summary
pub struct Doctor {
    checks: Vec<Check>,
}

impl Doctor {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Run all diagnostic checks, print the report and return the exit code
    pub async fn run_diagnostics(&mut self) -> i32 {
        let use_color = crate::cli::Cli::should_use_color();

        if use_color {
            println!("{}", "jira-mcp doctor".bold().blue());
            println!("{}", "Running diagnostics...".dimmed());
        } else {
            println!("jira-mcp doctor");
            println!("Running diagnostics...");
        }
        println!();

        self.collect_checks().await;
        self.print_results(use_color);
        self.get_exit_code()
    }

    async fn collect_checks(&mut self) {
        checks::check_in_path(&mut self.checks);
        checks::check_log_directory(&mut self.checks);

        checks::check_environment(&mut self.checks, |key| std::env::var(key).ok());
        let config = checks::check_configuration(&mut self.checks);

        checks::check_connectivity(&mut self.checks, config.as_ref()).await;
    }

    /// The checks collected so far
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    fn print_results(&self, use_color: bool) {
        for category in CheckCategory::ALL {
            let in_category: Vec<&Check> = self
                .checks
                .iter()
                .filter(|c| c.category == category)
                .collect();
            print_check_category(&in_category, category.heading(), use_color);
        }

        self.print_summary(use_color);
    }

    fn print_summary(&self, use_color: bool) {
        let counts = CheckCounts::tally(&self.checks);
        let paint = |n: usize, color: Color| {
            if use_color {
                n.to_string().color(color).to_string()
            } else {
                n.to_string()
            }
        };

        if use_color {
            println!("{}", "Summary:".bold().green());
        } else {
            println!("Summary:");
        }

        let passed = paint(counts.ok_count, Color::Green);
        let warnings = paint(counts.warning_count, Color::Yellow);
        match (counts.error_count, counts.warning_count) {
            (0, 0) => println!("  All checks passed!"),
            (0, _) => println!("  {passed} passed, {warnings} warnings"),
            (errors, _) => println!(
                "  {passed} passed, {warnings} warnings, {} errors",
                paint(errors, Color::Red)
            ),
        }
    }

    /// Exit code for the worst status seen
    pub fn get_exit_code(&self) -> i32 {
        self.checks
            .iter()
            .map(|c| c.status.exit_code())
            .max()
            .unwrap_or(ExitCode::Success)
            .into()
    }
}

impl Default for Doctor {
    fn default() -> Self {
        Self::new()
    }
}

fn print_check_category(checks: &[&Check], category_name: &str, use_color: bool) {
    if checks.is_empty() {
        return;
    }

    if use_color {
        println!("{}", category_name.bold().yellow());
    } else {
        println!("{category_name}");
    }
    for check in checks {
        print_check(check, use_color);
    }
    println!();
}

fn print_check(check: &Check, use_color: bool) {
    let (symbol, color_fn): (&str, fn(&str) -> ColoredString) = match check.status {
        CheckStatus::Ok => ("✓", |s: &str| s.green()),
        CheckStatus::Warning => ("⚠", |s: &str| s.yellow()),
        CheckStatus::Error => ("✗", |s: &str| s.red()),
    };

    if use_color {
        println!(
            "  {} {} - {}",
            color_fn(symbol),
            check.name.bold(),
            check.message
        );
    } else {
        println!("  {symbol} {check}");
    }

    if let Some(fix) = &check.fix {
        if use_color {
            println!("    {} {}", "→".dimmed(), fix.dimmed());
        } else {
            println!("    → {fix}");
        }
    }
}
