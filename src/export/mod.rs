use crate::error::Result;
use std::path::{Path, PathBuf};

/// Resolve the export target: a directory (or extension-less path) gets the
/// default file name appended.
pub fn output_path(output: &Path, default_file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_file_name)
    } else {
        output.to_path_buf()
    }
}

/// Write an export buffer, creating parent directories as needed
pub fn write_export(buffer: &[u8], output: &Path, default_file_name: &str) -> Result<PathBuf> {
    let path = output_path(output, default_file_name);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, buffer)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_for_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        assert_eq!(
            output_path(dir.path(), "wyniki_zwolnienia.xlsx"),
            dir.path().join("wyniki_zwolnienia.xlsx")
        );
    }

    #[test]
    fn test_output_path_for_file() {
        let path = Path::new("out/raport.xlsx");
        assert_eq!(output_path(path, "wyniki_zwolnienia.xlsx"), path);
    }

    #[test]
    fn test_write_export_creates_parents() {
        let dir = tempdir().expect("Failed to create temp dir");
        let target = dir.path().join("a").join("b").join("x.xlsx");
        let written = write_export(b"PK", &target, "unused.xlsx").unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read(&target).unwrap(), b"PK");
    }
}
