use super::medium::BackingMedium;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One settings file on disk.
///
/// Commits write a uniquely named sibling temp file and rename it over the
/// target, so readers and crashes only ever see a whole old or a whole new
/// file.
pub struct FsMedium {
    path: PathBuf,
    fsync: bool,
}

impl FsMedium {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            fsync: true,
        }
    }

    /// Skip `fsync` on commit. The rename stays atomic but a power loss may
    /// roll back to the previous content.
    pub fn with_fsync(mut self, fsync: bool) -> Self {
        self.fsync = fsync;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    fn tmp_path(&self, dir: &Path) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("settings");
        dir.join(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }

    fn write_tmp(&self, tmp_path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = File::create(tmp_path)?;
        file.write_all(contents)?;
        if self.fsync {
            file.sync_all()?;
        }
        Ok(())
    }

    #[cfg(unix)]
    fn sync_dir(&self, dir: &Path) {
        // Persists the rename itself. Not every filesystem allows this.
        if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
            tracing::debug!(dir = %dir.display(), error = %e, "directory sync skipped");
        }
    }

    #[cfg(not(unix))]
    fn sync_dir(&self, _dir: &Path) {}
}

/// Reader over the file content; a missing file reads as empty.
pub enum FsReader {
    Missing,
    File(File),
}

impl Read for FsReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            FsReader::Missing => Ok(0),
            FsReader::File(file) => file.read(buf),
        }
    }
}

impl BackingMedium for FsMedium {
    type Reader = FsReader;

    fn open_reader(&mut self) -> io::Result<FsReader> {
        match File::open(&self.path) {
            Ok(file) => Ok(FsReader::File(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FsReader::Missing),
            Err(e) => Err(e),
        }
    }

    fn commit(&mut self, contents: &[u8]) -> io::Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let tmp_path = self.tmp_path(&dir);
        let result = self
            .write_tmp(&tmp_path, contents)
            .and_then(|_| fs::rename(&tmp_path, &self.path));

        if let Err(e) = result {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if self.fsync {
            self.sync_dir(&dir);
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(medium: &mut FsMedium) -> Vec<u8> {
        let mut out = Vec::new();
        medium.open_reader().unwrap().read_to_end(&mut out).unwrap();
        out
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let temp = tempfile::tempdir().unwrap();
        let mut medium = FsMedium::new(temp.path().join("absent.conf"));
        assert!(read_all(&mut medium).is_empty());
        assert!(!medium.path().exists());
    }

    #[test]
    fn test_commit_replaces_whole_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("app.conf");
        fs::write(&path, "a long previous content\n").unwrap();

        let mut medium = FsMedium::new(&path);
        medium.commit(b"short\n").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"short\n");
        assert_eq!(dir_entries(temp.path()), vec!["app.conf".to_string()]);
    }

    #[test]
    fn test_commit_creates_parent_dirs() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("a").join("b").join("app.conf");

        let mut medium = FsMedium::new(&path).with_fsync(false);
        medium.commit(b"x=1\n").unwrap();

        assert_eq!(read_all(&mut medium), b"x=1\n");
    }

    #[test]
    fn test_failed_commit_leaves_no_tmp_file() {
        let temp = tempfile::tempdir().unwrap();
        // The target is a directory: rename over it fails.
        let path = temp.path().join("taken");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inner"), "x").unwrap();

        let mut medium = FsMedium::new(&path);
        assert!(medium.commit(b"data").is_err());
        assert_eq!(dir_entries(temp.path()), vec!["taken".to_string()]);
    }

    #[test]
    fn test_location_is_path() {
        let medium = FsMedium::new("/etc/app/settings.conf");
        assert_eq!(medium.location(), "/etc/app/settings.conf");
    }
}
