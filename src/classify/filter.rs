use tracing::info;
use crate::models::FontSample;

/// Substring blocklist for fonts that must not reach the rasterizer
#[derive(Debug, Clone, Default)]
pub struct Blocklist {
    patterns: Vec<String>,
}

impl Blocklist {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.is_empty())
                .collect(),
        }
    }

    /// The first pattern contained in `font_id`, if any
    pub fn matching(&self, font_id: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| font_id.contains(pattern))
    }

    pub fn is_blocked(&self, font_id: &str) -> bool {
        self.matching(font_id).is_some()
    }

    /// Split `fonts` into those to measure and those left out
    pub fn partition(&self, fonts: &[FontSample]) -> (Vec<FontSample>, Vec<FontSample>) {
        let (blocked, kept): (Vec<FontSample>, Vec<FontSample>) = fonts
            .iter()
            .cloned()
            .partition(|font| self.is_blocked(&font.id));

        for font in &blocked {
            info!(
                font = %font.id,
                pattern = self.matching(&font.id).unwrap_or_default(),
                "blocklisted, not measured"
            );
        }
        (kept, blocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(id: &str) -> FontSample {
        FontSample::new(id, format!("/fonts/{}", id), vec!["latin".to_string()])
    }

    #[test]
    fn substring_match_blocks_font() {
        let blocklist = Blocklist::new(["KumarOne", "Rubik-Bold"]);
        assert!(blocklist.is_blocked("KumarOne-Regular.ttf"));
        assert!(blocklist.is_blocked("Rubik-BoldItalic.ttf"));
        assert!(!blocklist.is_blocked("Rubik[wght].ttf"));
        assert_eq!(blocklist.matching("KumarOneOutline-Regular.ttf"), Some("KumarOne"));
    }

    #[test]
    fn empty_patterns_match_nothing() {
        let blocklist = Blocklist::new([""]);
        assert!(!blocklist.is_blocked("Anything.ttf"));
    }

    #[test]
    fn partition_keeps_order() {
        let blocklist = Blocklist::new(["Bad"]);
        let fonts = vec![font("A.ttf"), font("Bad-Regular.ttf"), font("C.ttf")];
        let (kept, blocked) = blocklist.partition(&fonts);

        let kept_ids: Vec<_> = kept.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(kept_ids, vec!["A.ttf", "C.ttf"]);
        assert_eq!(blocked.len(), 1);
        assert_eq!(blocked[0].id, "Bad-Regular.ttf");
    }
}
