use firmrel_catalog::models::CompileTime;
use time::UtcDateTime;
use time::macros::format_description;

/// Rendered in place of timestamps that aren't a representable Unix time.
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// Render a Unix timestamp (integer or numeric string) as
/// `YYYY-MM-DD HH:MM:SS UTC`, or [`UNKNOWN_TIMESTAMP`] if it can't be.
pub fn format_timestamp(timestamp: impl Into<CompileTime>) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    timestamp
        .into()
        .unix()
        .and_then(|seconds| UtcDateTime::from_unix_timestamp(seconds).ok())
        .and_then(|datetime| datetime.format(format).ok())
        .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CompileTime::from(1766075084), "2025-12-18 16:24:44 UTC")]
    #[case(CompileTime::from("1766075084"), "2025-12-18 16:24:44 UTC")]
    #[case(CompileTime::from(0), "1970-01-01 00:00:00 UTC")]
    #[case(CompileTime::from(" 86399 "), "1970-01-01 23:59:59 UTC")]
    #[case(CompileTime::from("not-a-number"), "Unknown")]
    #[case(CompileTime::from(""), "Unknown")]
    #[case(CompileTime::from("12.5"), "Unknown")]
    #[case(CompileTime::from(i64::MAX), "Unknown")]
    fn test_format_timestamp(#[case] input: CompileTime, #[case] expected: &str) {
        assert_eq!(format_timestamp(input), expected);
    }
}
