use crate::cli::parser::Cli;
use crate::config::{Config, CorruptPolicy};
use crate::db::Repository;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database
///  - the storage schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing libattend…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", db_str);

    let repo = Repository::open(&db_str, CorruptPolicy::default())?;

    if let Err(e) = repo.log(
        "init",
        "Database initialized",
        &format!("Database initialized at {}", db_str),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success(format!("Database initialized at {}", db_str));
    Ok(())
}
