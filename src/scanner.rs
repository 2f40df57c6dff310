//! Discovery of controller source files.

use anyhow::Result;
use log::warn;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Recursively collects the `.rs` files of a project directory.
///
/// Build output (`target/`) and hidden directories are skipped. Inaccessible
/// entries are recorded as warnings and do not stop the walk.
pub struct SourceScanner {
    root_path: PathBuf,
}

/// Outcome of a directory scan.
pub struct ScanResult {
    /// All discovered `.rs` files
    pub source_files: Vec<PathBuf>,
    /// Messages for entries that could not be accessed
    pub warnings: Vec<String>,
}

impl SourceScanner {
    pub fn new(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    /// Walks the directory tree and collects source files.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root directory itself cannot be walked;
    /// per-entry failures become warnings.
    pub fn scan(&self) -> Result<ScanResult> {
        let mut source_files = Vec::new();
        let mut warnings = Vec::new();

        let walk = WalkDir::new(&self.root_path).into_iter().filter_entry(|entry| {
            if entry.path() == self.root_path {
                return true;
            }
            let file_name = entry.file_name().to_string_lossy();
            !file_name.starts_with('.') && file_name != "target"
        });

        for entry in walk {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("rs") {
                        source_files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    let warning = format!("Failed to access path: {}", e);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
            }
        }

        Ok(ScanResult {
            source_files,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_collects_only_rust_sources() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("src/pet_controller.rs"), "pub struct PetController;").unwrap();
        fs::write(root.join("src/store_controller.rs"), "pub struct StoreController;").unwrap();
        fs::write(root.join("README.md"), "# readme").unwrap();

        let scanner = SourceScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(result.source_files.len(), 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let scanner = SourceScanner::new(temp_dir.path().to_path_buf());
        let result = scanner.scan().unwrap();

        assert!(result.source_files.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_skips_target_and_hidden_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir(root.join("target")).unwrap();
        fs::write(root.join("target/build.rs"), "fn main() {}").unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".git/hook.rs"), "// hook").unwrap();
        fs::write(root.join("controller.rs"), "pub struct C;").unwrap();

        let scanner = SourceScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(result.source_files.len(), 1);
        assert_eq!(
            result.source_files[0].file_name().unwrap().to_string_lossy(),
            "controller.rs"
        );
    }

    #[test]
    fn test_scan_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        fs::create_dir_all(root.join("src/controllers")).unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("src/controllers/pets.rs"), "pub struct PetController;").unwrap();

        let scanner = SourceScanner::new(root.to_path_buf());
        let result = scanner.scan().unwrap();

        assert_eq!(result.source_files.len(), 2);
    }
}
