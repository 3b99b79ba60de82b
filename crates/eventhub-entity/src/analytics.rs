//! Read-only report rows produced by the analytics queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One bar of a distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CountBucket {
    /// Group key (department or access tag).
    pub name: String,
    /// Number of rows in the group.
    pub value: i64,
}

/// Per-event engagement counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventEngagement {
    /// Event title.
    pub name: String,
    /// Access scope.
    pub event_access: String,
    /// Start date.
    pub date: NaiveDate,
    /// `|responseBy|`.
    pub registered: i64,
    /// `|attendance|`.
    pub attended: i64,
    /// `|likedBy|`.
    pub likes: i64,
    /// `|comments|`.
    pub comments: i64,
}

/// Group keys into counted buckets, largest first; ties keep name order.
pub fn count_by<I, S>(keys: I) -> Vec<CountBucket>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut counts = std::collections::BTreeMap::<String, i64>::new();
    for key in keys {
        *counts.entry(key.into()).or_default() += 1;
    }
    let mut buckets: Vec<CountBucket> = counts
        .into_iter()
        .map(|(name, value)| CountBucket { name, value })
        .collect();
    buckets.sort_by(|a, b| b.value.cmp(&a.value));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_by_sorts_descending() {
        let buckets = count_by(["Sales", "HR", "Sales", "Engineering", "Sales", "HR"]);
        assert_eq!(
            buckets,
            vec![
                CountBucket { name: "Sales".into(), value: 3 },
                CountBucket { name: "HR".into(), value: 2 },
                CountBucket { name: "Engineering".into(), value: 1 },
            ]
        );
    }
}
