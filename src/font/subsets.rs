use std::fs;
use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use ttf_parser::Face;
use tracing::debug;
use super::sample::known_samples;

/// Family metadata file that lists the subsets of every font beside it
pub const METADATA_FILE: &str = "METADATA.pb";

lazy_static! {
    static ref SUBSET_PATTERN: Regex = Regex::new(r#"(?m)^\s*subsets\s*:\s*"([^"]+)""#).unwrap();
}

/// Extract the `subsets: "..."` entries of a METADATA.pb text, in file order
pub fn parse_metadata_subsets(content: &str) -> Vec<String> {
    let mut subsets: Vec<String> = Vec::new();
    for caps in SUBSET_PATTERN.captures_iter(content) {
        let subset = caps[1].trim().to_string();
        if !subset.is_empty() && !subsets.contains(&subset) {
            subsets.push(subset);
        }
    }
    subsets
}

/// Infer subsets from the cmap: a subset counts when every character of its
/// sample text maps to a glyph.
pub fn subsets_from_cmap(font_data: &[u8]) -> Vec<String> {
    let face = match Face::parse(font_data, 0) {
        Ok(face) => face,
        Err(_) => return Vec::new(),
    };

    known_samples()
        .iter()
        .filter(|sample| sample.text.chars().all(|c| face.glyph_index(c).is_some()))
        .map(|sample| sample.subset.to_string())
        .collect()
}

/// Determine the subsets of the font at `path`. The family's METADATA.pb wins;
/// without one the font's own cmap is consulted.
pub fn detect_subsets(path: &Path) -> Vec<String> {
    if let Some(dir) = path.parent() {
        let metadata_path = dir.join(METADATA_FILE);
        if let Ok(content) = fs::read_to_string(&metadata_path) {
            let subsets = parse_metadata_subsets(&content);
            if !subsets.is_empty() {
                debug!(font = %path.display(), ?subsets, "subsets from {}", METADATA_FILE);
                return subsets;
            }
        }
    }

    match fs::read(path) {
        Ok(data) => {
            let subsets = subsets_from_cmap(&data);
            debug!(font = %path.display(), ?subsets, "subsets from cmap");
            subsets
        }
        // The rasterizer reports the unreadable file when it gets there
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const METADATA: &str = r#"name: "Angkor"
designer: "Danh Hong"
license: "OFL"
fonts {
  name: "Angkor"
  style: "normal"
  weight: 400
  filename: "Angkor-Regular.ttf"
}
subsets: "khmer"
subsets: "latin"
subsets: "menu"
"#;

    #[test]
    fn parses_subsets_in_order() {
        assert_eq!(parse_metadata_subsets(METADATA), vec!["khmer", "latin", "menu"]);
    }

    #[test]
    fn ignores_duplicates_and_other_fields() {
        let content = "subsets: \"latin\"\nsubsets: \"latin\"\ncategory: \"SERIF\"\n";
        assert_eq!(parse_metadata_subsets(content), vec!["latin"]);
    }

    #[test]
    fn garbage_font_has_no_cmap_subsets() {
        assert!(subsets_from_cmap(b"not a font").is_empty());
    }

    #[test]
    fn metadata_file_next_to_font_is_used() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(METADATA_FILE), METADATA).expect("write metadata");
        let font = dir.path().join("Angkor-Regular.ttf");
        fs::write(&font, b"placeholder").expect("write font");

        assert_eq!(detect_subsets(&font), vec!["khmer", "latin", "menu"]);
    }

    #[test]
    fn unparseable_font_without_metadata_has_no_subsets() {
        let dir = tempdir().expect("tempdir");
        let font = dir.path().join("Broken.ttf");
        fs::write(&font, b"placeholder").expect("write font");

        assert!(detect_subsets(&font).is_empty());
    }
}
