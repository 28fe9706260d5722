use std::cmp::Ordering;

use profilegen_source::RepositoryRecord;

use crate::names::PriorityOrder;

/// Compares two records for display.
///
/// Prioritized records come first, in priority order. The rest follow, most
/// recently pushed first; a record that was never pushed sorts last.
pub fn compare_records(
    a: &RepositoryRecord,
    b: &RepositoryRecord,
    priority: &PriorityOrder,
) -> Ordering {
    match (priority.position(&a.name), priority.position(&b.name)) {
        (Some(pa), Some(pb)) => pa.cmp(&pb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.pushed_at.cmp(&a.pushed_at),
    }
}

/// Sorts records into display order. The sort is stable, so records that
/// compare equal keep their incoming order.
pub fn order_repositories(
    mut records: Vec<RepositoryRecord>,
    priority: &PriorityOrder,
) -> Vec<RepositoryRecord> {
    records.sort_by(|a, b| compare_records(a, b, priority));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{names, record};

    #[test]
    fn test_priority_before_recency() {
        let ordered = order_repositories(
            vec![record("b", 2), record("a", 1)],
            &PriorityOrder::new(["a"]),
        );
        assert_eq!(names(&ordered), vec!["a", "b"]);
    }

    #[test]
    fn test_priority_relative_order() {
        let ordered = order_repositories(
            vec![
                record("one", 5),
                record("two", 9),
                record("three", 1),
                record("four", 7),
            ],
            &PriorityOrder::new(["THREE", "missing", "one"]),
        );
        assert_eq!(names(&ordered), vec!["three", "one", "two", "four"]);
    }

    #[test]
    fn test_recency_descending() {
        let ordered = order_repositories(
            vec![record("old", 1), record("new", 30), record("mid", 10)],
            &PriorityOrder::default(),
        );
        assert_eq!(names(&ordered), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_ties_keep_incoming_order() {
        let ordered = order_repositories(
            vec![
                record("x", 3),
                record("y", 5),
                record("z", 3),
                record("w", 3),
            ],
            &PriorityOrder::default(),
        );
        assert_eq!(names(&ordered), vec!["y", "x", "z", "w"]);
    }

    #[test]
    fn test_never_pushed_sorts_last() {
        let ordered = order_repositories(
            vec![
                RepositoryRecord::new("empty", None),
                record("pushed", 1),
            ],
            &PriorityOrder::default(),
        );
        assert_eq!(names(&ordered), vec!["pushed", "empty"]);
    }

    #[test]
    fn test_ordering_is_idempotent() {
        let priority = PriorityOrder::new(["c", "a"]);
        let once = order_repositories(
            vec![
                record("a", 1),
                record("b", 4),
                record("c", 2),
                record("d", 4),
                record("e", 9),
            ],
            &priority,
        );
        let twice = order_repositories(once.clone(), &priority);

        assert_eq!(names(&once), vec!["c", "a", "e", "b", "d"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_compare_records() {
        let priority = PriorityOrder::new(["p"]);
        let p = record("P", 1);
        let q = record("q", 10);

        assert_eq!(compare_records(&p, &q, &priority), Ordering::Less);
        assert_eq!(compare_records(&q, &p, &priority), Ordering::Greater);
        assert_eq!(compare_records(&q, &q, &priority), Ordering::Equal);
    }
}
