use crate::{
    cli::Args,
    error::Result,
    pipeline::{BuildLayout, BuildOptions, BuildPipeline, BuildReport},
};
use std::path::PathBuf;

/// Main CLI runner that turns arguments into a build
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the build and logs a summary
    pub fn run(self) -> Result<BuildReport> {
        let data_dir = self.args.data_dir.clone().unwrap_or_else(default_data_dir);
        let pipeline = BuildPipeline::new(BuildLayout::new(data_dir), self.build_options());

        let report = pipeline.run()?;
        log::info!(
            "Substituted {} placeholder(s) in {} of {} matched file(s), {} backup(s) written.",
            report.placeholders_applied,
            report.files_changed,
            report.files_matched,
            report.backups.len()
        );
        println!("Build completed successfully in {}.", pipeline.layout().build_root.display());
        Ok(report)
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            backup: !self.args.no_backup,
            recursive: !self.args.flat,
            write_mode: self.args.write_mode,
        }
    }
}

/// Directory containing the running executable, or the current directory.
pub fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<BuildReport> {
    Runner::new(args).run()
}
