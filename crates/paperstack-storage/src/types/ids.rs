//! Strongly-typed identifiers (avoid mixing strings/UUIDs arbitrarily).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Principal (portal account) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(pub Uuid);

/// Document identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub Uuid);

/// Report identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

/// Subject identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub Uuid);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_ids_equality() {
        let uuid = Uuid::new_v4();
        let id1 = PrincipalId(uuid);
        let id2 = PrincipalId(uuid);
        assert_eq!(id1, id2);

        let id3 = PrincipalId(Uuid::new_v4());
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_typed_ids_debug() {
        let uuid = Uuid::new_v4();
        let id = DocumentId(uuid);
        assert!(format!("{:?}", id).contains(&uuid.to_string()));
    }

    #[test]
    fn test_typed_ids_hash() {
        use std::collections::HashSet;

        let uuid = Uuid::new_v4();
        let mut set = HashSet::new();
        set.insert(ReportId(uuid));
        assert!(set.contains(&ReportId(uuid)));
    }

    #[test]
    fn test_typed_ids_inner_access() {
        let uuid = Uuid::new_v4();
        assert_eq!(SubjectId(uuid).0, uuid);
        assert_eq!(PrincipalId(uuid).0, uuid);
    }
}
