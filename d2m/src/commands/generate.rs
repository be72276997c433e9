use std::path::PathBuf;

use clap::Args;
use db2model_ir::{Dialect, Language};
use db2model_manifest::ConfigFile;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to db2model.toml (defaults to ./db2model.toml)
    #[arg(short, long, default_value = "db2model.toml")]
    pub config: PathBuf,

    /// Output directory (overrides [output].path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only generate this database (repeatable)
    #[arg(long)]
    pub database: Vec<String>,

    /// Keep schema and database directories that end up without models
    #[arg(long)]
    pub no_prune: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Source dialect (overrides db2model.toml setting)
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// Target language (overrides db2model.toml setting)
    #[arg(short, long)]
    pub language: Option<Language>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = ConfigFile::open(&self.config).unwrap_or_exit();

        let options = GenerateOptions {
            output: self.output.clone(),
            databases: self.database.clone(),
            no_prune: self.no_prune,
            dry_run: self.dry_run,
            dialect: self.dialect,
            language: self.language,
        };

        let report = ops::generate(&config, &options)?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
