use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::stats::HistoryStats;
use crate::db::Repository;
use crate::errors::AppResult;
use crate::utils::colors::{BOLD, CYAN, GREEN, RED, RESET, color_kind_cell};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { filter } = cmd {
        let filter = filter.to_filter()?;
        let repo = Repository::from_config(cfg)?;

        let all = repo.attendance()?;
        let events = filter.apply(&all);
        let stats = HistoryStats::from_events(&events);

        println!("{BOLD}📚 Attendance history{RESET}\n");
        println!("  Records        : {}", events.len());
        println!("  {GREEN}Check-ins{RESET}      : {}", stats.check_ins);
        println!("  {RED}Check-outs{RESET}     : {}", stats.check_outs);
        println!("  {CYAN}Unique members{RESET} : {}\n", stats.unique_members);

        if events.is_empty() {
            if filter.is_empty() {
                println!("No attendance recorded yet.");
            } else {
                println!("No records match the selected filters.");
            }
            return Ok(());
        }

        let mut table = Table::new(["Date", "Time", "Member", "ID", "Type"]);
        // newest first
        for ev in events.iter().rev() {
            table.add_row(vec![
                ev.date_str(&cfg.date_format),
                ev.time_str(&cfg.time_format),
                ev.member_name.clone(),
                ev.member_id.clone(),
                ev.kind.to_string(),
            ]);
        }

        for line in table.render().lines() {
            println!("{}", color_kind_cell(line));
        }

        if !filter.is_empty() {
            println!("\n{} of {} records shown.", events.len(), all.len());
        }
    }

    Ok(())
}
