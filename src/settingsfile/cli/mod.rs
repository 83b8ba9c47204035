//! Command handlers for the `settingsfile` binary.
//!
//! Every handler drives a [`FileSettings`] through the public
//! [`SettingsFile`] trait only, so the binary exercises exactly what library
//! callers get.

mod print;

use settingsfile::config::StoreConfig;
use settingsfile::error::{ConfigError, SettingsError};
use settingsfile::model::{LineRead, ResultCode};
use settingsfile::store::{FileSettings, SettingsFile};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use print::print_error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No config directory available; pass --config-dir")]
    NoConfigDir,
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Settings(e) => match ResultCode::from(e) {
                ResultCode::InvalidState => 2,
                ResultCode::IoError => 3,
                ResultCode::Success | ResultCode::EndOfFile => 1,
            },
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub struct AppContext {
    pub config: StoreConfig,
    pub config_dir: Option<PathBuf>,
}

impl AppContext {
    pub fn new(config_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.or_else(StoreConfig::default_dir);
        let config = match &config_dir {
            Some(dir) => StoreConfig::load(dir)?,
            None => StoreConfig::default(),
        };
        Ok(Self { config, config_dir })
    }

    fn store(&self, file: &Path) -> FileSettings {
        FileSettings::from_config(file, &self.config)
    }
}

fn input_bytes(text: Option<String>) -> Result<Vec<u8>> {
    match text {
        Some(t) => Ok(t.into_bytes()),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Close a write session and push any deferred commit out before the
/// process exits. A commit that still fails is reported, not swallowed.
fn finish_write(store: &mut FileSettings) -> Result<()> {
    store.close()?;
    store.force_close();
    if store.has_pending_writes() {
        let err = io::Error::other("settings could not be committed");
        return Err(SettingsError::Io(err).into());
    }
    Ok(())
}

fn read_all(store: &mut FileSettings) -> Result<Vec<u8>> {
    store.open_for_read()?;
    let mut contents = Vec::new();
    while let Some(byte) = store.read()? {
        contents.push(byte);
    }
    store.close()?;
    Ok(contents)
}

pub fn handle_cat(ctx: &AppContext, file: &Path) -> Result<()> {
    let mut store = ctx.store(file);
    let contents = read_all(&mut store)?;
    print::print_raw(&contents)?;
    Ok(())
}

pub fn handle_lines(ctx: &AppContext, file: &Path) -> Result<()> {
    let mut store = ctx.store(file);
    store.open_for_read()?;

    let mut line = Vec::new();
    let mut number = 0;
    loop {
        let outcome = store.read_line(&mut line)?;
        if outcome == LineRead::EndOfFile && line.is_empty() {
            break;
        }
        number += 1;
        print::print_line(number, &line)?;
        if outcome == LineRead::EndOfFile {
            break;
        }
    }
    store.close()?;

    if number == 0 {
        print::print_info("(empty)");
    }
    Ok(())
}

pub fn handle_write(ctx: &AppContext, file: &Path, text: Option<String>) -> Result<()> {
    let data = input_bytes(text)?;
    let mut store = ctx.store(file);

    store.open_for_write()?;
    store.write(&data)?;
    finish_write(&mut store)?;

    print::print_success(&format!(
        "Wrote {} bytes to {}",
        data.len(),
        file.display()
    ));
    Ok(())
}

pub fn handle_append(ctx: &AppContext, file: &Path, text: Option<String>) -> Result<()> {
    let data = input_bytes(text)?;
    let mut store = ctx.store(file);
    let existing = read_all(&mut store)?;

    store.open_for_write()?;
    store.write(&existing)?;
    store.write(&data)?;
    finish_write(&mut store)?;

    print::print_success(&format!(
        "Appended {} bytes to {}",
        data.len(),
        file.display()
    ));
    Ok(())
}

pub fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in StoreConfig::KEYS {
                println!("{} = {}", key, ctx.config.get(key)?);
            }
        }
        (Some(key), None) => {
            println!("{}", ctx.config.get(&key)?);
        }
        (Some(key), Some(value)) => {
            let dir = ctx.config_dir.clone().ok_or(CliError::NoConfigDir)?;
            ctx.config.set(&key, &value)?;
            ctx.config.save(&dir)?;
            print::print_success(&format!("{} set to {}", key, value));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use settingsfile::config::FlushPolicy;
    use settingsfile::model::OpenState;

    fn ctx_in(dir: &Path) -> AppContext {
        AppContext::new(Some(dir.to_path_buf())).unwrap()
    }

    #[test]
    fn test_exit_codes() {
        let invalid: CliError = SettingsError::InvalidState {
            op: "read",
            state: OpenState::Closed,
        }
        .into();
        assert_eq!(invalid.exit_code(), 2);

        let io: CliError = SettingsError::Io(io::Error::other("x")).into();
        assert_eq!(io.exit_code(), 3);

        assert_eq!(CliError::NoConfigDir.exit_code(), 1);
    }

    #[test]
    fn test_context_loads_config() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = StoreConfig::default();
        config.flush = FlushPolicy::Deferred;
        config.save(temp.path()).unwrap();

        let ctx = ctx_in(temp.path());
        assert_eq!(ctx.config.flush, FlushPolicy::Deferred);
    }

    #[test]
    fn test_write_then_append() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = ctx_in(temp.path());
        let file = temp.path().join("app.conf");

        handle_write(&ctx, &file, Some("a=1\n".into())).unwrap();
        handle_append(&ctx, &file, Some("b=2\n".into())).unwrap();

        assert_eq!(std::fs::read(&file).unwrap(), b"a=1\nb=2\n");
    }

    #[test]
    fn test_append_to_missing_file_creates_it() {
        let temp = tempfile::tempdir().unwrap();
        let ctx = ctx_in(temp.path());
        let file = temp.path().join("sub").join("new.conf");

        handle_append(&ctx, &file, Some("x".into())).unwrap();
        assert_eq!(std::fs::read(&file).unwrap(), b"x");
    }

    #[test]
    fn test_config_set_persists() {
        let temp = tempfile::tempdir().unwrap();
        let mut ctx = ctx_in(temp.path());

        handle_config(&mut ctx, Some("flush".into()), Some("deferred".into())).unwrap();
        assert_eq!(StoreConfig::load(temp.path()).unwrap().flush, FlushPolicy::Deferred);
    }
}
