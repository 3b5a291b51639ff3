//! Keyword tagging over the fixed financial vocabulary.

/// Tags `text` with every vocabulary keyword it contains.
///
/// Matching is a case-insensitive substring test. The result preserves
/// vocabulary order and contains no duplicates; empty input produces an
/// empty tag set.
pub fn tag_text(text: &str, keywords: &[&str]) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_lowercase();
    let mut tags: Vec<String> = Vec::new();

    for keyword in keywords {
        if haystack.contains(&keyword.to_lowercase()) && !tags.iter().any(|t| t == keyword) {
            tags.push((*keyword).to_string());
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::financial_keywords;

    #[test]
    fn case_insensitive_match() {
        let tags = tag_text("REVENUE guidance was raised this QUARTER.", &financial_keywords());
        assert!(tags.contains(&"revenue".to_string()));
        assert!(tags.contains(&"guidance".to_string()));
    }

    #[test]
    fn preserves_vocabulary_order() {
        let vocab = ["guidance", "revenue"];
        let tags = tag_text("revenue guidance", &vocab);
        assert_eq!(tags, vec!["guidance".to_string(), "revenue".to_string()]);
    }

    #[test]
    fn no_duplicates() {
        let vocab = ["revenue", "revenue"];
        let tags = tag_text("revenue revenue revenue", &vocab);
        assert_eq!(tags, vec!["revenue".to_string()]);
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(tag_text("", &financial_keywords()).is_empty());
        assert!(tag_text("nothing relevant here", &[]).is_empty());
    }
}
