use chrono::NaiveDateTime;

/// Derives the next-action text recorded with a follow-up entry
pub fn next_action(next_follow_up: Option<NaiveDateTime>) -> String {
    match next_follow_up {
        Some(date) => format!("Follow up on {}", date.format("%Y-%m-%d %H:%M")),
        None => "No further action".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::next_action;
    use chrono::NaiveDate;

    #[test]
    fn test_next_action_with_date() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(next_action(Some(date)), "Follow up on 2026-09-15 10:30");
    }

    #[test]
    fn test_next_action_without_date() {
        assert_eq!(next_action(None), "No further action");
    }
}
