pub mod cart;
pub mod classify;
pub mod dashboard;
pub mod lookup;

use tariff_core::schedule::ScheduleIndex;

/// Resolve the schedule to quote against: an explicit CSV path wins,
/// otherwise the bundled table.
pub fn load_schedule(
    path: &Option<String>,
) -> Result<std::borrow::Cow<'static, ScheduleIndex>, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(std::borrow::Cow::Owned(ScheduleIndex::from_csv_path(p)?)),
        None => Ok(std::borrow::Cow::Borrowed(ScheduleIndex::global())),
    }
}
