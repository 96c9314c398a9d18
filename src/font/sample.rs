use crate::models::FontSample;

/// Text rendered to measure a font, with the glyph whose height stands in for
/// the x-height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleText {
    /// Subset that selects this sample
    pub subset: &'static str,
    /// String painted onto the measurement surface
    pub text: &'static str,
    /// Reference glyph for the x-height
    pub x_height_glyph: char,
}

// No "Ww" on purpose: changing the string would shift every stored band.
pub const LATIN_SAMPLE: SampleText = SampleText {
    subset: "latin",
    text: "AaBbCcDdEeFfGgHhIiJjKkLlMmNnOoPpQqRrSsTtUuVvXxYyZz",
    x_height_glyph: 'x',
};

pub const KHMER_SAMPLE: SampleText = SampleText {
    subset: "khmer",
    text: "\u{179a}\u{179b}\u{1780}\u{1794}\u{1780}\u{17cb}\u{1794}\u{17c4}\u{1780}\u{1793}\
           \u{17b6}\u{179b}\u{17d2}\u{1784}\u{17b6}\u{1785}\u{178a}\u{17cf}\u{1780}\u{178e}\
           \u{17d2}\u{178f}\u{17c4}\u{1785}\u{1780}\u{178e}\u{17d2}\u{178f}\u{17c2}\u{1784}",
    x_height_glyph: '\u{1785}',
};

/// Samples tried before falling back to Latin, in priority order
static SCRIPT_SAMPLES: [SampleText; 1] = [KHMER_SAMPLE];

/// Pick the sample text for a font from its declared subsets
pub fn sample_for(font: &FontSample) -> &'static SampleText {
    SCRIPT_SAMPLES
        .iter()
        .find(|sample| font.has_subset(sample.subset))
        .unwrap_or(&LATIN_SAMPLE)
}

/// Every sample the pipeline knows about
pub fn known_samples() -> [&'static SampleText; 2] {
    [&LATIN_SAMPLE, &KHMER_SAMPLE]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_with(subsets: &[&str]) -> FontSample {
        FontSample::new(
            "Test-Regular.ttf",
            "/fonts/Test-Regular.ttf",
            subsets.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn latin_is_the_default() {
        assert_eq!(sample_for(&font_with(&[])), &LATIN_SAMPLE);
        assert_eq!(sample_for(&font_with(&["latin", "cyrillic"])), &LATIN_SAMPLE);
    }

    #[test]
    fn khmer_subset_selects_khmer_sample() {
        let sample = sample_for(&font_with(&["latin", "khmer"]));
        assert_eq!(sample.subset, "khmer");
        assert_eq!(sample.x_height_glyph, 'ច');
        assert!(sample.text.starts_with("រលក"));
        assert_eq!(sample.text.chars().count(), 30);
    }

    #[test]
    fn latin_sample_skips_w() {
        assert_eq!(LATIN_SAMPLE.text.len(), 50);
        assert!(!LATIN_SAMPLE.text.contains('W'));
    }
}
