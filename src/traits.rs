use std::sync::Arc;

use async_trait::async_trait;

use crate::calendar::Calendar;
use crate::error::FetchError;

/// A source of parsed calendars, keyed by target name.
#[async_trait]
pub trait CalendarSource {
    /// Returns the calendar for `target`.
    /// This may serve a cached copy, or trigger a remote fetch (that can be a long process, or that can even fail).
    /// The returned calendar is shared: callers must not mutate it, only read it or copy out of it.
    async fn fetch_calendar(
        &self,
        target: &str,
        params: &[(String, String)],
    ) -> Result<Arc<Calendar>, FetchError>;
}
