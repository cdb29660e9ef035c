use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::members::MemberLogic;
use crate::core::stats::RosterStats;
use crate::db::Repository;
use crate::errors::AppResult;
use crate::models::Membership;
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm;
use crate::utils::colors::{BOLD, RESET, color_for_membership, colorize_membership};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Members {
        search,
        show,
        delete,
        yes,
    } = cmd
    {
        let mut repo = Repository::from_config(cfg)?;

        if let Some(id) = delete {
            return delete_member(&mut repo, id, *yes);
        }

        if let Some(id) = show {
            return show_member(&repo, id, cfg);
        }

        let all = repo.members()?;
        print_roster_stats(&RosterStats::from_members(&all));

        let found = MemberLogic::search(&all, search.as_deref());
        if found.is_empty() {
            println!("No members found.");
            return Ok(());
        }

        let mut table = Table::new(["ID", "Name", "Email", "Membership", "Registered"]);
        for m in &found {
            table.add_row(vec![
                m.id.clone(),
                m.name.clone(),
                m.email.clone(),
                m.membership_type.to_string(),
                m.registration_date_local()
                    .format(&cfg.date_format)
                    .to_string(),
            ]);
        }
        println!("{}", table.render());
        println!("\n{} of {} members shown.", found.len(), all.len());
    }

    Ok(())
}

fn print_roster_stats(stats: &RosterStats) {
    println!("{BOLD}👥 Members: {}{RESET}", stats.total);
    let parts: Vec<String> = Membership::ALL
        .iter()
        .map(|m| {
            format!(
                "{}{}{}: {}",
                color_for_membership(*m),
                m.label(),
                RESET,
                stats.count(*m)
            )
        })
        .collect();
    println!("   {}\n", parts.join("  "));
}

fn show_member(repo: &Repository, id: &str, cfg: &Config) -> AppResult<()> {
    let (member, summary) = MemberLogic::details(repo, id)?;

    println!("{BOLD}{}{RESET}", member.name);
    println!("  ID          : {}", member.id);
    println!("  Email       : {}", member.email);
    println!("  Membership  : {}", colorize_membership(member.membership_type));
    println!(
        "  Registered  : {}",
        member.registration_date_local().format(&cfg.date_format)
    );
    println!("  Check-ins   : {}", summary.check_ins);
    println!("  Check-outs  : {}", summary.check_outs);

    let last = match summary.last_visit {
        Some(ts) => ts
            .with_timezone(&chrono::Local)
            .format(&format!("{} {}", cfg.date_format, cfg.time_format))
            .to_string(),
        None => "Never".to_string(),
    };
    println!("  Last visit  : {}", last);

    Ok(())
}

fn delete_member(repo: &mut Repository, id: &str, yes: bool) -> AppResult<()> {
    // fail early on unknown ids, before asking anything
    let (member, _) = MemberLogic::details(repo, id)?;

    if !yes
        && !confirm(&format!(
            "Delete member '{}' ({})? Attendance records are kept.",
            member.name, member.id
        ))
    {
        info("Operation cancelled.");
        return Ok(());
    }

    let removed = MemberLogic::delete(repo, id)?;
    success(format!("Member deleted: {} ({})", removed.name, removed.id));
    Ok(())
}
