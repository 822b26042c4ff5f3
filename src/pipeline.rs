//! End-to-end build: self-resolve settings, back up, reset, match, substitute.

use crate::archive::{backup_name, compress_folder};
use crate::constants::{layout, RESOLVED_SETTINGS_FILENAME, SETTINGS_FILENAME};
use crate::error::Result;
use crate::filter::collect_matching_files;
use crate::ioutils::{
    copy_dir_all, create_dir_all, delete_dir_all, extract_resource, read_file,
};
use crate::placeholder::{
    scan, BodySink, FileSink, MemorySink, SettingsResolver, SubstitutionEngine, WriteMode,
};
use crate::settings::SettingsDocument;
use std::path::{Path, PathBuf};

/// On-disk locations used by a build, all derived from one data directory.
#[derive(Debug, Clone)]
pub struct BuildLayout {
    pub data_dir: PathBuf,
    pub source_root: PathBuf,
    pub build_root: PathBuf,
    pub backup_root: PathBuf,
    pub settings_file: PathBuf,
    pub resolved_settings_file: PathBuf,
}

impl BuildLayout {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            source_root: data_dir.join(layout::DEFAULT_DIR),
            build_root: data_dir.join(layout::BUILT_DIR),
            backup_root: data_dir.join(layout::BACKUP_DIR),
            settings_file: data_dir.join(SETTINGS_FILENAME),
            resolved_settings_file: data_dir.join(RESOLVED_SETTINGS_FILENAME),
            data_dir,
        }
    }

    /// Directories that must exist before a build starts.
    fn required_dirs(&self) -> [PathBuf; 4] {
        [
            self.source_root.join(layout::FILES_DIR),
            self.source_root.join(layout::SERVERS_DIR),
            self.build_root.join(layout::FILES_DIR),
            self.build_root.join(layout::SERVERS_DIR),
        ]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub backup: bool,
    pub recursive: bool,
    pub write_mode: WriteMode,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { backup: true, recursive: true, write_mode: WriteMode::default() }
    }
}

/// What a finished build did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub files_matched: usize,
    pub files_changed: usize,
    pub placeholders_applied: usize,
    pub backups: Vec<PathBuf>,
}

/// Resolves the settings body against itself, persisting the result to `sink`.
///
/// The raw body is parsed once to serve as the lookup source, its placeholders
/// are substituted exactly once, and the substituted text is returned. There is
/// no second pass: placeholders introduced by substituted values stay literal.
pub fn bootstrap_settings(
    raw: &str,
    engine: &SubstitutionEngine,
    sink: &mut dyn BodySink,
) -> Result<String> {
    let raw_settings = SettingsDocument::parse(raw)?;
    let resolver = SettingsResolver::new(&raw_settings);
    let placeholders = scan(raw);
    log::debug!("Settings reference {} placeholder(s) of their own", placeholders.len());
    engine.apply(raw, &placeholders, &resolver, sink)
}

/// Parses a settings body after resolving it against itself, in memory.
pub fn resolve_settings(raw: &str) -> Result<SettingsDocument> {
    let resolved =
        bootstrap_settings(raw, &SubstitutionEngine::default(), &mut MemorySink::default())?;
    SettingsDocument::parse(&resolved)
}

/// Runs a build over a [`BuildLayout`].
pub struct BuildPipeline {
    layout: BuildLayout,
    options: BuildOptions,
    engine: SubstitutionEngine,
}

impl BuildPipeline {
    pub fn new(layout: BuildLayout, options: BuildOptions) -> Self {
        let engine = SubstitutionEngine::new(options.write_mode);
        Self { layout, options, engine }
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Executes every build step in order. Any failure aborts the build.
    pub fn run(&self) -> Result<BuildReport> {
        log::info!("Starting build in {}", self.layout.data_dir.display());
        let mut report = BuildReport::default();

        self.prepare()?;
        let settings = self.load_settings()?;

        if self.options.backup {
            report.backups = self.backup()?;
        }

        self.reset()?;

        let files = collect_matching_files(
            &self.layout.build_root,
            self.options.recursive,
            settings.suffixes(),
        )?;
        report.files_matched = files.len();

        let resolver = SettingsResolver::new(&settings);
        for file in &files {
            let applied = self.engine.apply_to_file(file, &resolver)?;
            if applied > 0 {
                report.files_changed += 1;
                report.placeholders_applied += applied;
            }
        }

        log::info!("Build finished.");
        Ok(report)
    }

    /// Creates the directory skeleton and extracts the default settings.
    fn prepare(&self) -> Result<()> {
        for dir in self.layout.required_dirs() {
            create_dir_all(dir)?;
        }
        extract_resource(SETTINGS_FILENAME, &self.layout.data_dir)
    }

    /// Self-resolves the settings file into its working copy and parses that copy.
    fn load_settings(&self) -> Result<SettingsDocument> {
        let raw = read_file(&self.layout.settings_file)?;

        let mut sink = FileSink::new(&self.layout.resolved_settings_file);
        sink.persist(&raw)?;
        bootstrap_settings(&raw, &self.engine, &mut sink)?;

        let settings = SettingsDocument::parse(&read_file(&self.layout.resolved_settings_file)?)?;
        for path in settings.secret_paths() {
            log::debug!("Placeholder [{path}] generates a new secret on every use");
        }
        Ok(settings)
    }

    /// Archives the source and build-output trees before the build output is reset.
    fn backup(&self) -> Result<Vec<PathBuf>> {
        let name = backup_name(&chrono::Local::now());
        let mut written = Vec::new();

        for (root, dir) in [
            (&self.layout.source_root, layout::DEFAULT_DIR),
            (&self.layout.build_root, layout::BUILT_DIR),
        ] {
            let target = self.layout.backup_root.join(dir).join(&name);
            compress_folder(root, &target)?;
            written.push(target);
        }
        Ok(written)
    }

    /// Replaces the build output with a fresh copy of the source tree.
    fn reset(&self) -> Result<()> {
        delete_dir_all(&self.layout.build_root)?;
        copy_dir_all(&self.layout.source_root, &self.layout.build_root)?;
        log::info!(
            "Copied {} to {}",
            self.layout.source_root.display(),
            self.layout.build_root.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::ValueResolver;
    use serde_json::json;

    #[test]
    fn layout_derives_from_data_dir() {
        let layout = BuildLayout::new("/srv/pack");
        assert_eq!(layout.source_root, PathBuf::from("/srv/pack/default"));
        assert_eq!(layout.build_root, PathBuf::from("/srv/pack/built"));
        assert_eq!(layout.backup_root, PathBuf::from("/srv/pack/backup"));
        assert_eq!(layout.settings_file, PathBuf::from("/srv/pack/build.setting.json"));
    }

    #[test]
    fn settings_resolve_their_own_placeholders() {
        let raw = r#"{
            "placeholder": {
                "data": {
                    "network": { "name": "Net", "slots": 50 },
                    "proxy": {
                        "motd": "Welcome to $(mcp.network.name)",
                        "slots": "$(mcp.network.slots)(number)"
                    }
                },
                "suffixes": []
            }
        }"#;
        let settings = resolve_settings(raw).unwrap();
        assert_eq!(
            settings.get_by_path("placeholder.data.proxy.motd").unwrap(),
            &json!("Welcome to Net")
        );
        assert_eq!(settings.get_by_path("placeholder.data.proxy.slots").unwrap(), &json!(50));
    }

    #[test]
    fn bootstrap_keeps_number_spelling_through_reparse() {
        let raw = r#"{
            "placeholder": {
                "data": {
                    "base": { "ratio": 1.50, "big": 1e3 },
                    "copy": {
                        "ratio": "$(mcp.base.ratio)(number)",
                        "big": "$(mcp.base.big)(number)"
                    }
                }
            }
        }"#;
        let settings = resolve_settings(raw).unwrap();
        let resolver = SettingsResolver::new(&settings);
        assert_eq!(resolver.resolve("copy.ratio").unwrap(), "1.50");
        assert_eq!(resolver.resolve("copy.big").unwrap(), "1e3");
    }

    #[test]
    fn bootstrap_pins_a_referenced_secret() {
        let raw = r#"{
            "placeholder": {
                "data": {
                    "velocity": { "secret": "$(velocity.secret)" },
                    "proxy": { "secret": "$(mcp.velocity.secret)" }
                }
            }
        }"#;
        let settings = resolve_settings(raw).unwrap();
        let resolver = SettingsResolver::new(&settings);
        let first = resolver.resolve("proxy.secret").unwrap();
        let second = resolver.resolve("proxy.secret").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 16);
        assert_ne!(first, "$(velocity.secret)");
    }

    #[test]
    fn bootstrap_fails_on_missing_self_reference() {
        let raw = r#"{"placeholder": {"data": {"a": "$(mcp.nope)"}}}"#;
        assert!(matches!(
            resolve_settings(raw),
            Err(crate::error::Error::PathNotFound { .. })
        ));
    }
}
