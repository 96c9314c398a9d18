use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::error::{Error, Result};
use crate::models::FontSample;
use super::subsets::detect_subsets;

/// Check if a path has a font file extension
pub fn is_font_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            let ext = ext.to_lowercase();
            ext == "ttf" || ext == "otf"
        }
        None => false,
    }
}

/// Recursively collect font files under `dir`, sorted by path
pub fn find_font_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidPath(dir.to_path_buf()));
    }

    let mut font_files = Vec::new();
    collect_font_files(dir, &mut font_files)?;
    font_files.sort();
    Ok(font_files)
}

fn collect_font_files(dir: &Path, font_files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            collect_font_files(&path, font_files)?;
        } else if path.is_file() && is_font_file(&path) {
            font_files.push(path);
        }
    }
    Ok(())
}

/// Read the directories listed in a batch file, one per line.
/// Blank lines and `#` comments are ignored; entries that are not
/// directories are skipped with a warning.
pub fn read_batch_file(batch_file: &Path) -> Result<Vec<PathBuf>> {
    let content = fs::read_to_string(batch_file)?;
    let mut dirs = Vec::new();

    for line in content.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let dir = PathBuf::from(line);
        if dir.is_dir() {
            dirs.push(dir);
        } else {
            warn!("'{}' is not a valid directory, skipping", line);
        }
    }

    info!("Found {} directories in {}", dirs.len(), batch_file.display());
    Ok(dirs)
}

/// Build a sample for every font under `dirs`, keyed by file name.
/// A file name seen twice keeps its first occurrence.
pub fn discover_fonts(dirs: &[PathBuf]) -> Result<Vec<FontSample>> {
    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    let mut samples = Vec::new();

    for dir in dirs {
        for path in find_font_files(dir)? {
            let id = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => {
                    warn!("Skipping font with a non UTF-8 name: {}", path.display());
                    continue;
                }
            };

            if let Some(first) = seen.get(&id) {
                warn!(
                    "Duplicate font name {}: keeping {}, skipping {}",
                    id,
                    first.display(),
                    path.display()
                );
                continue;
            }

            let subsets = detect_subsets(&path);
            debug!(font = %id, ?subsets, "discovered");
            seen.insert(id.clone(), path.clone());
            samples.push(FontSample::new(id, path, subsets));
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn font_extensions_are_case_insensitive() {
        assert!(is_font_file(Path::new("a/Roboto-Regular.ttf")));
        assert!(is_font_file(Path::new("a/Roboto-Regular.OTF")));
        assert!(!is_font_file(Path::new("a/METADATA.pb")));
        assert!(!is_font_file(Path::new("a/ttf")));
    }

    #[test]
    fn finds_fonts_recursively() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("ofl").join("angkor");
        fs::create_dir_all(&nested).expect("mkdir");
        fs::write(nested.join("Angkor-Regular.ttf"), b"x").expect("write");
        fs::write(dir.path().join("Lato-Bold.otf"), b"x").expect("write");
        fs::write(dir.path().join("README.md"), b"x").expect("write");

        let found = find_font_files(dir.path()).expect("find");
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"Angkor-Regular.ttf".to_string()));
        assert!(names.contains(&"Lato-Bold.otf".to_string()));
    }

    #[test]
    fn missing_directory_is_invalid_path() {
        let err = find_font_files(Path::new("/nonexistent/fonts")).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
    }

    #[test]
    fn duplicate_file_names_keep_first() {
        let first = tempdir().expect("tempdir");
        let second = tempdir().expect("tempdir");
        fs::write(first.path().join("Same.ttf"), b"x").expect("write");
        fs::write(second.path().join("Same.ttf"), b"x").expect("write");

        let samples =
            discover_fonts(&[first.path().to_path_buf(), second.path().to_path_buf()])
                .expect("discover");
        assert_eq!(samples.len(), 1);
        assert!(samples[0].path.starts_with(first.path()));
    }

    #[test]
    fn batch_file_skips_comments_and_missing_dirs() {
        let dir = tempdir().expect("tempdir");
        let batch = dir.path().join("dirs.txt");
        fs::write(
            &batch,
            format!("# fonts\n\n{}\n/nonexistent/fonts\n", dir.path().display()),
        )
        .expect("write");

        let dirs = read_batch_file(&batch).expect("read");
        assert_eq!(dirs, vec![dir.path().to_path_buf()]);
    }
}
