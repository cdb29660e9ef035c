use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::scan::{ScanLogic, ScanOutcome};
use crate::db::Repository;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success};
use crate::utils::colors::colorize_kind;
use chrono::Local;
use std::io::{self, BufRead};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Scan { code } = cmd {
        let mut repo = Repository::from_config(cfg)?;

        match code {
            Some(code) => {
                let outcome = ScanLogic::scan(&mut repo, code.trim(), Local::now())?;
                print_outcome(&outcome, cfg);
            }
            None => scan_stream(&mut repo, cfg)?,
        }
    }

    Ok(())
}

/// Continuous mode: one decoded code per line until EOF.
///
/// Unknown codes are reported and the loop keeps going.
fn scan_stream(repo: &mut Repository, cfg: &Config) -> AppResult<()> {
    info("Waiting for scans (one member ID per line, Ctrl-D to stop)…");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let code = line.trim();
        if code.is_empty() {
            continue;
        }

        match ScanLogic::scan(repo, code, Local::now()) {
            Ok(outcome) => print_outcome(&outcome, cfg),
            Err(e @ AppError::MemberNotFound(_)) => error(e),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn print_outcome(outcome: &ScanOutcome, cfg: &Config) {
    success(format!("Welcome, {}!", outcome.member.name));
    println!(
        "   {} {} at {}",
        colorize_kind(outcome.event.kind),
        outcome.member.id,
        outcome.event.time_str(&cfg.time_format)
    );
}
