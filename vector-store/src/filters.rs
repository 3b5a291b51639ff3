//! Tag filter conversion to Qdrant `Filter`.
//!
//! A [`TagFilter`] is an OR-over-tag-set predicate: a point matches when its
//! `tags` payload shares at least one tag with the filter.

use qdrant_client::qdrant::{
    Condition, FieldCondition, Filter, Match, RepeatedStrings, condition::ConditionOneOf,
    r#match::MatchValue,
};
use tracing::debug;

/// OR-over-tag-set predicate restricting vector search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagFilter {
    /// Candidate tags; a point matches when any of them is present.
    pub tags: Vec<String>,
}

impl TagFilter {
    /// Builds a filter from candidate tags; an empty set means no filter.
    pub fn from_tags(tags: Vec<String>) -> Option<Self> {
        if tags.is_empty() {
            None
        } else {
            Some(Self { tags })
        }
    }
}

/// Converts a [`TagFilter`] into a Qdrant [`Filter`]:
/// `must: [{ key: "tags", match: { any: [...] } }]`.
pub fn to_qdrant_filter(f: &TagFilter) -> Filter {
    debug!("filters::to_qdrant_filter tags={}", f.tags.len());

    let condition = Condition {
        condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
            key: "tags".to_string(),
            r#match: Some(Match {
                match_value: Some(MatchValue::Keywords(RepeatedStrings {
                    strings: f.tags.clone(),
                })),
            }),
            ..Default::default()
        })),
    };

    Filter {
        must: vec![condition],
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tag_set_means_no_filter() {
        assert!(TagFilter::from_tags(Vec::new()).is_none());
    }

    #[test]
    fn renders_must_match_any() {
        let f = TagFilter::from_tags(vec!["revenue".into(), "guidance".into()]).unwrap();
        let q = to_qdrant_filter(&f);
        assert_eq!(q.must.len(), 1);

        let cond = &q.must[0];
        let Some(ConditionOneOf::Field(field)) = &cond.condition_one_of else {
            panic!("expected field condition");
        };
        assert_eq!(field.key, "tags");
        let Some(MatchValue::Keywords(keywords)) =
            &field.r#match.as_ref().unwrap().match_value
        else {
            panic!("expected keywords match");
        };
        assert_eq!(keywords.strings, vec!["revenue", "guidance"]);
    }
}
