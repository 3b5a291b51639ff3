use uuid::Uuid;

/// Deterministic UUIDv5 from an arbitrary string id.
///
/// Identical input always yields the identical UUID, so chunk identities
/// derived from content never collide with re-ingested copies of the
/// same text.
pub fn stable_uuid(id: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, id.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_input() {
        assert_eq!(stable_uuid("Revenue was $50M."), stable_uuid("Revenue was $50M."));
    }

    #[test]
    fn differs_for_different_input() {
        assert_ne!(stable_uuid("Revenue was $50M."), stable_uuid("Revenue was $51M."));
    }
}
