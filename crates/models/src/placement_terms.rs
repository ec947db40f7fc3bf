use crate::placement_status::PlacementStatus;
use chrono::{Datelike, Months, NaiveDate};

/// A placement is active while it is PLACED and its end date, if any, has
/// not passed
pub fn is_active(status: PlacementStatus, end_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    status == PlacementStatus::Placed && end_date.is_none_or(|date| date > today)
}

/// Whether today falls inside the probation window
/// [joining_date, joining_date + probation months)
pub fn is_in_probation(
    joining_date: Option<NaiveDate>,
    probation_months: Option<i32>,
    today: NaiveDate,
) -> bool {
    let (Some(joined), Some(months)) = (joining_date, probation_months) else {
        return false;
    };
    let Ok(months) = u32::try_from(months) else {
        return false;
    };

    match joined.checked_add_months(Months::new(months)) {
        Some(end) => joined <= today && today < end,
        None => false,
    }
}

/// Whole months between joining and the placement end (or today while the
/// placement is still open)
pub fn tenure_in_months(
    joining_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> u32 {
    let Some(joined) = joining_date else {
        return 0;
    };
    let until = end_date.unwrap_or(today);
    if until <= joined {
        return 0;
    }

    let mut months =
        (until.year() - joined.year()) * 12 + (until.month() as i32 - joined.month() as i32);
    if until.day() < joined.day() {
        months -= 1;
    }

    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::{is_active, is_in_probation, tenure_in_months};
    use crate::placement_status::PlacementStatus;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_open_placed_placement_is_active() {
        assert!(is_active(PlacementStatus::Placed, None, date(2026, 8, 7)));
    }

    #[test]
    fn test_future_end_date_keeps_placement_active() {
        let end = Some(date(2026, 12, 31));
        assert!(is_active(PlacementStatus::Placed, end, date(2026, 8, 7)));
    }

    #[test]
    fn test_past_end_date_deactivates() {
        let end = Some(date(2026, 1, 31));
        assert!(!is_active(PlacementStatus::Placed, end, date(2026, 8, 7)));
    }

    #[test]
    fn test_closed_statuses_are_never_active() {
        for status in [
            PlacementStatus::Resigned,
            PlacementStatus::Terminated,
            PlacementStatus::Completed,
        ] {
            assert!(!is_active(status, None, date(2026, 8, 7)));
        }
    }

    #[test]
    fn test_probation_window() {
        let joined = Some(date(2026, 6, 1));
        assert!(is_in_probation(joined, Some(3), date(2026, 8, 7)));
        assert!(!is_in_probation(joined, Some(3), date(2026, 9, 1)));
        // Before joining there is no probation yet
        assert!(!is_in_probation(joined, Some(3), date(2026, 5, 20)));
    }

    #[test]
    fn test_probation_requires_both_fields() {
        assert!(!is_in_probation(None, Some(3), date(2026, 8, 7)));
        assert!(!is_in_probation(Some(date(2026, 6, 1)), None, date(2026, 8, 7)));
    }

    #[test]
    fn test_tenure_counts_whole_months() {
        let joined = Some(date(2025, 3, 15));
        assert_eq!(tenure_in_months(joined, Some(date(2026, 3, 15)), date(2026, 8, 7)), 12);
        // Partial final month is not counted
        assert_eq!(tenure_in_months(joined, Some(date(2026, 3, 14)), date(2026, 8, 7)), 11);
        assert_eq!(tenure_in_months(None, None, date(2026, 8, 7)), 0);
    }

    #[test]
    fn test_open_tenure_runs_to_today() {
        let joined = Some(date(2026, 2, 1));
        assert_eq!(tenure_in_months(joined, None, date(2026, 8, 7)), 6);
    }
}
