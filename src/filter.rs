use crate::period::PeriodBounds;
use chrono::NaiveDate;

/// Inclusive date-window filter.
///
/// A record is kept when its designated date is present and
/// `start <= date <= end`. Records with a missing date are excluded, never
/// an error; the engine's "invalid data matches nothing" rule lives here.
pub fn filter_by_date<'a, T, F>(
    records: &'a [T],
    date_fn: F,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<NaiveDate>,
{
    records
        .iter()
        .filter(|r| match date_fn(r) {
            Some(d) => start <= d && d <= end,
            None => false,
        })
        .collect()
}

/// Split a collection into (current, previous) subsets for one resolved
/// comparison window. Called once per record type per view.
pub fn partition_periods<'a, T, F>(
    records: &'a [T],
    date_fn: F,
    bounds: &PeriodBounds,
) -> (Vec<&'a T>, Vec<&'a T>)
where
    F: Fn(&T) -> Option<NaiveDate> + Copy,
{
    let current = filter_by_date(records, date_fn, bounds.current_start, bounds.current_end);
    let previous = filter_by_date(records, date_fn, bounds.previous_start, bounds.previous_end);
    (current, previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::resolve_periods;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[derive(Debug, PartialEq)]
    struct Row {
        date: Option<NaiveDate>,
        label: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                date: Some(ymd(2024, 6, 25)),
                label: "previous",
            },
            Row {
                date: Some(ymd(2024, 7, 1)),
                label: "current-start",
            },
            Row {
                date: Some(ymd(2024, 7, 10)),
                label: "current-end",
            },
            Row {
                date: Some(ymd(2024, 7, 11)),
                label: "after",
            },
            Row {
                date: None,
                label: "undated",
            },
        ]
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let rows = rows();
        let kept = filter_by_date(&rows, |r| r.date, ymd(2024, 7, 1), ymd(2024, 7, 10));
        let labels: Vec<_> = kept.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["current-start", "current-end"]);
    }

    #[test]
    fn test_undated_records_are_excluded() {
        let rows = rows();
        let kept = filter_by_date(&rows, |r| r.date, ymd(2024, 1, 1), ymd(2024, 12, 31));
        assert!(kept.iter().all(|r| r.date.is_some()));
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = rows();
        let first = filter_by_date(&rows, |r| r.date, ymd(2024, 7, 1), ymd(2024, 7, 10));
        let second = filter_by_date(&rows, |r| r.date, ymd(2024, 7, 1), ymd(2024, 7, 10));
        assert_eq!(first, second);
    }

    #[test]
    fn test_partition_assigns_each_row_to_one_period() {
        let rows = rows();
        let bounds = resolve_periods(ymd(2024, 7, 1), ymd(2024, 7, 10));
        let (current, previous) = partition_periods(&rows, |r| r.date, &bounds);

        let current_labels: Vec<_> = current.iter().map(|r| r.label).collect();
        let previous_labels: Vec<_> = previous.iter().map(|r| r.label).collect();
        assert_eq!(current_labels, vec!["current-start", "current-end"]);
        assert_eq!(previous_labels, vec!["previous"]);

        // A record excluded from the current window never appears in it
        assert!(!current_labels.contains(&"previous"));
        assert!(!current_labels.contains(&"after"));
    }
}
