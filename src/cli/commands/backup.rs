use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::Repository;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let repo = Repository::from_config(cfg)?;
        BackupLogic::backup(&repo, file, *compress, *force)?;
    }

    Ok(())
}
