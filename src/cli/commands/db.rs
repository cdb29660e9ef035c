use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Repository;
use crate::db::blobs::delete_blob;
use crate::db::migrate::run_pending_migrations;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::ui::prompt::confirm;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use tracing::warn;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
        reset,
        yes,
    } = cmd
    {
        // opening the repository already runs pending schema steps
        let repo = Repository::from_config(cfg)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(repo.conn())?;
            if applied.is_empty() {
                println!("{}✔ Schema is up to date.{}\n", GREEN, RESET);
            } else {
                for v in applied {
                    println!("  applied {}", v);
                }
                println!("{}✔ Migration completed.{}\n", GREEN, RESET);
            }
        }

        //
        // 2) INFO
        //
        if *show_info {
            stats::print_db_info(&repo, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = repo
                .conn()
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            stats::print_collection_check(&repo)?;
            println!();
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            repo.conn().execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        //
        // 5) RESET ONE COLLECTION
        //
        if let Some(key) = reset {
            if !*yes
                && !confirm(&format!(
                    "Delete stored collection '{}'? This action is irreversible.",
                    key
                ))
            {
                info("Operation cancelled.");
                return Ok(());
            }

            if delete_blob(repo.conn(), key)? {
                if let Err(e) = repo.log("reset", key, "Stored collection deleted") {
                    warn!(error = %e, "failed to write internal log");
                }
                println!("{}✔ Collection '{}' deleted.{}", GREEN, key, RESET);
            } else {
                println!("{}• No collection stored under '{}'.{}", YELLOW, key, RESET);
            }
        }
    }

    Ok(())
}
