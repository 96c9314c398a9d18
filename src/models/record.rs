use std::collections::BTreeMap;

/// Usage tags that survive a publish cleanup
pub const PUBLISHED_USAGES: [&str; 2] = ["body", "header"];

/// Persisted classification of one font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationRecord {
    /// Weight band (`FWE`)
    pub weight: Option<i64>,
    /// Angle band (`FIA`), assigned outside this tool
    pub angle: Option<i64>,
    /// Width band (`FWI`)
    pub width: Option<i64>,
    /// Free-form usage tag (`USAGE`)
    pub usage: String,
    /// Comma-separated subsets (`SUBSETS`); `None` when the column was absent
    pub subsets: Option<String>,
}

impl ClassificationRecord {
    /// Copy of this record with the values that may not be published blanked out
    pub fn redacted(&self) -> Self {
        Self {
            weight: self.weight.filter(|v| is_valid_band(*v)),
            angle: self.angle.filter(|v| is_valid_band(*v)),
            width: self.width.filter(|v| is_valid_band(*v)),
            usage: if PUBLISHED_USAGES.contains(&self.usage.as_str()) {
                self.usage.clone()
            } else {
                String::new()
            },
            subsets: None,
        }
    }
}

/// Check if a stored band value lies in the published 1-10 range
pub fn is_valid_band(value: i64) -> bool {
    (1..=10).contains(&value)
}

/// All records of a store, ordered by font id
pub type RecordSet = BTreeMap<String, ClassificationRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_blanks_out_of_range_bands_and_unknown_usage() {
        let record = ClassificationRecord {
            weight: Some(0),
            angle: Some(11),
            width: Some(10),
            usage: "decorative".to_string(),
            subsets: Some("latin".to_string()),
        };

        let redacted = record.redacted();
        assert_eq!(redacted.weight, None);
        assert_eq!(redacted.angle, None);
        assert_eq!(redacted.width, Some(10));
        assert_eq!(redacted.usage, "");
        assert_eq!(redacted.subsets, None);
    }

    #[test]
    fn redaction_keeps_publishable_usage() {
        let record = ClassificationRecord {
            weight: Some(1),
            usage: "body".to_string(),
            ..Default::default()
        };
        let redacted = record.redacted();
        assert_eq!(redacted.weight, Some(1));
        assert_eq!(redacted.usage, "body");
    }
}
