use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::today::TodayLogic;
use crate::db::Repository;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::colors::{BOLD, CYAN, GREEN, RED, RESET, color_kind_cell};
use crate::utils::date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Today { date: day } = cmd {
        let day = match day {
            Some(d) => date::parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => date::today(),
        };

        let repo = Repository::from_config(cfg)?;
        let overview = TodayLogic::overview(&repo, day, cfg.recent_limit)?;

        println!(
            "{BOLD}📅 {}{RESET}\n",
            overview.day.format(&cfg.date_format)
        );
        println!("  {GREEN}Check-ins{RESET}      : {}", overview.stats.check_ins);
        println!("  {RED}Check-outs{RESET}     : {}", overview.stats.check_outs);
        println!("  {CYAN}Currently in{RESET}   : {}\n", overview.stats.currently_in);

        if overview.recent.is_empty() {
            println!("No activity recorded.");
            return Ok(());
        }

        header("Recent activity");
        let mut table = Table::new(["Time", "Member", "ID", "Type"]);
        for ev in &overview.recent {
            table.add_row(vec![
                ev.time_str(&cfg.time_format),
                ev.member_name.clone(),
                ev.member_id.clone(),
                ev.kind.to_string(),
            ]);
        }

        // color only the type column, after widths have been computed
        for line in table.render().lines() {
            println!("{}", color_kind_cell(line));
        }
    }

    Ok(())
}
