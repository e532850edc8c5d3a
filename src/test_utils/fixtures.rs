use std::path::PathBuf;

use tempfile::TempDir;

/// Scratch directory holding a filter list and the files tools will touch.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a file with content, making parent directories as needed.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `filters.txt` with one entry per line.
    #[must_use]
    pub fn create_filter_file(&self, entries: &[&str]) -> PathBuf {
        let mut body = entries.join("\n");
        body.push('\n');
        self.create_file("filters.txt", &body)
    }

    /// Write an executable shell script, used to stand in for external tools.
    #[cfg(unix)]
    #[must_use]
    pub fn create_script(&self, relative_path: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.create_file(relative_path, &format!("#!/bin/sh\n{body}\n"));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to mark script executable");
        path
    }
}
