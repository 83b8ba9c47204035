use crate::config::StoreConfig;
use crate::store::FileSettings;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub path: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let path = root.join("settings.conf");
        Self {
            _temp_dir: temp_dir,
            root,
            path,
        }
    }

    /// A fresh store on this env's settings file.
    pub fn store(&self) -> FileSettings {
        FileSettings::open_path(&self.path)
    }

    pub fn store_with(&self, config: &StoreConfig) -> FileSettings {
        FileSettings::from_config(&self.path, config)
    }

    /// Raw file content, bypassing the store. Empty if missing.
    pub fn on_disk(&self) -> Vec<u8> {
        std::fs::read(&self.path).unwrap_or_default()
    }
}
