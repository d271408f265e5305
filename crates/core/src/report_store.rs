use std::fs;
use std::io;
use std::path::PathBuf;

/// A place where downloaded reports are materialized.
///
/// `save` may block, callers are expected to run it off the event loop.
pub trait ReportStore: Send + Sync {
    /// Saves `content` under `file_name`, replacing any previous file with
    /// the same name, and returns where it ended up.
    fn save(&self, file_name: &str, content: &[u8]) -> io::Result<PathBuf>;
}

/// A [`ReportStore`] writing into a local directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectoryReportStore {
    dir: PathBuf,
}

impl DirectoryReportStore {
    /// Creates a store writing into `dir`. The directory is created on the
    /// first save if missing.
    #[inline]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the directory reports are written into.
    #[inline]
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Default for DirectoryReportStore {
    #[inline]
    fn default() -> Self {
        Self::new(".")
    }
}

impl ReportStore for DirectoryReportStore {
    fn save(&self, file_name: &str, content: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::process;

    use super::*;

    #[test]
    fn test_save_creates_dir_and_overwrites() {
        let dir = env::temp_dir()
            .join(format!("prayaas-report-store-{}", process::id()))
            .join("nested");
        let store = DirectoryReportStore::new(&dir);

        let path = store.save("final_diagnosis.docx", b"first").unwrap();
        assert_eq!(path, dir.join("final_diagnosis.docx"));

        let path = store.save("final_diagnosis.docx", b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        fs::remove_dir_all(dir.parent().unwrap()).ok();
    }
}
