/// Builds the enrollment-number prefix for a calendar year, e.g. "ENR2026"
pub fn prefix_for_year(year: i32) -> String {
    format!("ENR{year}")
}

/// Returns the next free sequence for a prefix, given the enrollment numbers
/// already issued under it. Numbers whose tail does not parse are skipped.
pub fn next_sequence(prefix: &str, existing: &[String]) -> u32 {
    existing
        .iter()
        .filter_map(|number| number.strip_prefix(prefix))
        .filter_map(|tail| tail.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1
}

/// Formats a full enrollment number, e.g. ("ENR2026", 7) -> "ENR20260007"
pub fn format_number(prefix: &str, sequence: u32) -> String {
    format!("{prefix}{sequence:04}")
}

#[cfg(test)]
mod tests {
    use super::{format_number, next_sequence, prefix_for_year};

    #[test]
    fn test_prefix_for_year() {
        assert_eq!(prefix_for_year(2026), "ENR2026");
    }

    #[test]
    fn test_first_number_of_a_year() {
        assert_eq!(next_sequence("ENR2026", &[]), 1);
        assert_eq!(format_number("ENR2026", 1), "ENR20260001");
    }

    #[test]
    fn test_next_sequence_follows_the_maximum() {
        let existing = vec![
            "ENR20260001".to_string(),
            "ENR20260007".to_string(),
            "ENR20260003".to_string(),
        ];
        assert_eq!(next_sequence("ENR2026", &existing), 8);
    }

    #[test]
    fn test_malformed_numbers_are_skipped() {
        let existing = vec!["ENR2026XXXX".to_string(), "ENR20260002".to_string()];
        assert_eq!(next_sequence("ENR2026", &existing), 3);
    }

    #[test]
    fn test_years_do_not_interfere() {
        // A number issued under another year's prefix never matches
        let existing = vec!["ENR20259999".to_string()];
        assert_eq!(next_sequence("ENR2026", &existing), 1);
    }

    #[test]
    fn test_sequence_padding() {
        assert_eq!(format_number("ENR2026", 42), "ENR20260042");
        assert_eq!(format_number("ENR2026", 10000), "ENR202610000");
    }
}
