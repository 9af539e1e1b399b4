//! Deriving a filtered calendar from a fetched source calendar

use crate::calendar::Calendar;
use crate::error::FetchError;
use crate::grouping::GroupingTable;
use crate::traits::CalendarSource;

/// Fetch the calendar for `target` and keep only the events classified under `grouping`.
///
/// This is the whole pipeline behind one inbound request: the source resolves
/// the calendar (from its cache or the remote server), then the filter derives
/// a fresh calendar from it.
pub async fn request_calendar(
    source: &impl CalendarSource,
    target: &str,
    grouping: &str,
    params: &[(String, String)],
    table: &GroupingTable,
) -> Result<Calendar, FetchError> {
    let calendar = source.fetch_calendar(target, params).await?;
    Ok(filter_by_grouping(&calendar, grouping, table))
}

/// Build a new calendar containing only the events of one grouping.
///
/// Calendar-level properties are copied verbatim from the source, the name is
/// replaced to indicate the filter, and event order is preserved. The source
/// calendar is shared with the cache and is never written to.
pub fn filter_by_grouping(source: &Calendar, grouping: &str, table: &GroupingTable) -> Calendar {
    let mut filtered = Calendar::new();
    for property in source.properties() {
        filtered.push_property(property.clone());
    }
    filtered.set_name(&format!("Filtered calendar - {}", grouping));

    for event in source.events() {
        if table.classify(event) != grouping {
            continue;
        }

        // The summary rewrite must happen on our own copy of the event
        let mut event = event.clone();
        if let Some(stripped) = strip_course_code(event.summary()) {
            event.set_summary(stripped);
        }
        filtered.add_event(event);
    }

    filtered
}

/// Remove a leading course-code prefix (`"INFO101 - Tentamen"` → `"Tentamen"`).
/// Returns `None` when the summary is absent or carries no separator.
fn strip_course_code(summary: Option<&str>) -> Option<String> {
    let summary = summary?;
    let index = summary.find(" - ")?;
    Some(summary[index + 3..].to_string())
}
