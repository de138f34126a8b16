//! Export file naming.

use chrono::{DateTime, SecondsFormat, Utc};

/// Source of the export timestamp.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Name for an exported document: `{base}_rotated_{timestamp}.pdf`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use pdfrotate::export::output_file_name;
///
/// let instant = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap();
/// assert_eq!(
///     output_file_name("report.PDF", instant),
///     "report_rotated_2024-05-01T12-30-45-000Z.pdf"
/// );
/// ```
pub fn output_file_name(original_name: &str, instant: DateTime<Utc>) -> String {
    format!(
        "{}_rotated_{}.pdf",
        base_name(original_name),
        filesystem_timestamp(instant)
    )
}

/// Strip one trailing `.pdf`, ignoring case.
pub fn base_name(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match name.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(".pdf") => &name[..split],
        _ => name,
    }
}

/// ISO-8601 instant with millisecond precision, `:` and `.` replaced by `-`.
pub fn filesystem_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-")
}
