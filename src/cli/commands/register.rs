use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::register::{RegisterLogic, Registration};
use crate::db::Repository;
use crate::errors::AppResult;
use crate::ui::messages::{muted, success};
use crate::utils::colors::{BOLD, RESET, colorize_membership};
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        name,
        email,
        membership,
    } = cmd
    {
        let form = Registration::new(
            name.as_deref().unwrap_or_default(),
            email.as_deref().unwrap_or_default(),
            membership.as_deref().unwrap_or_default(),
        );

        let mut repo = Repository::from_config(cfg)?;
        let member = RegisterLogic::register(&mut repo, &form, &cfg.member_id_prefix, Utc::now())?;

        success(format!("Member registered: {}", member.name));
        println!("  ID         : {BOLD}{}{RESET}", member.id);
        println!("  Email      : {}", member.email);
        println!("  Membership : {}", colorize_membership(member.membership_type));
        println!(
            "  Registered : {}",
            member
                .registration_date_local()
                .format(&format!("{} {}", cfg.date_format, cfg.time_format))
        );
        muted("The member ID is the card code to scan.");
    }

    Ok(())
}
