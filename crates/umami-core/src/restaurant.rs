//! Restaurant lookup trait definition.

use umami_types::error::RestaurantError;
use umami_types::restaurant::Restaurant;

/// Read-only access to restaurant records.
///
/// Implementations live in umami-infra (e.g., `JsonRestaurantStore`).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait RestaurantRepository: Send + Sync {
    /// Find a restaurant by exact id. Unknown ids yield `Ok(None)`; only
    /// unreadable or malformed backing data is an error.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Restaurant>, RestaurantError>> + Send;

    /// All records, in stored order.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Restaurant>, RestaurantError>> + Send;
}

/// Linear scan for the first record whose id equals `id`.
pub fn find_by_id(records: &[Restaurant], id: &str) -> Option<Restaurant> {
    records.iter().find(|r| r.id == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: format!("Restaurant {id}"),
            filename: format!("{id}.md"),
        }
    }

    #[test]
    fn test_find_by_id_hit_and_miss() {
        let records = vec![record("A"), record("B")];
        assert_eq!(find_by_id(&records, "B"), Some(record("B")));
        assert_eq!(find_by_id(&records, "C"), None);
    }

    #[test]
    fn test_find_by_id_is_exact() {
        let records = vec![record("a1")];
        assert_eq!(find_by_id(&records, "A1"), None);
        assert_eq!(find_by_id(&records, "a"), None);
    }

    #[test]
    fn test_find_by_id_first_match_wins() {
        let mut duplicate = record("A");
        duplicate.name = "Second".to_string();
        let records = vec![record("A"), duplicate];
        assert_eq!(find_by_id(&records, "A").unwrap().name, "Restaurant A");
    }
}
