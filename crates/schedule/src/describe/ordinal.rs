//! English ordinals for positional values, where negatives count from the end.

/// `st`, `nd`, `rd` or `th` for the magnitude of `n`.
pub fn ordinal_suffix(n: i64) -> &'static str {
    let n = n.unsigned_abs();
    match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    }
}

/// `2` -> `2nd`, `-1` -> `last`, `-2` -> `2nd last`.
pub fn ordinal_name(n: i64) -> String {
    match n {
        -1 => "last".to_string(),
        n if n < -1 => format!("{}{} last", n.unsigned_abs(), ordinal_suffix(n)),
        n => format!("{n}{}", ordinal_suffix(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_follow_teens_exception() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (111, "th"),
            (-23, "rd"),
        ];
        for (n, suffix) in cases {
            assert_eq!(ordinal_suffix(n), suffix, "n = {n}");
        }
    }

    #[test]
    fn names_count_negatives_from_the_end() {
        assert_eq!(ordinal_name(-1), "last");
        assert_eq!(ordinal_name(-2), "2nd last");
        assert_eq!(ordinal_name(2), "2nd");
        assert_eq!(ordinal_name(11), "11th");
        assert_eq!(ordinal_name(13), "13th");
        assert_eq!(ordinal_name(21), "21st");
    }
}
