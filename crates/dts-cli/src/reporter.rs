//! Human-facing build output (§10.2 "Reporting").

use colored::Colorize;
use dts_orchestrator::{BuildError, BuildReport};

pub fn report_success(report: &BuildReport) {
    if report.incremental_no_op {
        println!("{}", "nothing to do, declarations are up to date".dimmed());
        return;
    }
    if report.cancelled {
        println!("{}", "build cancelled".yellow());
        return;
    }

    for file in &report.written_files {
        println!("{} {} {}", "wrote".green(), file.relative_path, format!("({} bytes)", file.size_bytes).dimmed());
    }
    for warning in &report.transpile_warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }
}

pub fn report_error(error: &BuildError) {
    eprintln!("{} {}", "error:".red().bold(), error);
}

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod tests;
