use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::Repository;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        filter,
        force,
    } = cmd
    {
        let filter = filter.to_filter()?;
        let repo = Repository::from_config(cfg)?;

        ExportLogic::export(&repo, cfg, *format, file.as_deref(), &filter, *force)?;
    }

    Ok(())
}
