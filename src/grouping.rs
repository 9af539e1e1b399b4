//! Classification of events into configured groupings
//!
//! Events carry their category as a `Type: <value>` line inside the free-text
//! description. Groupings map those type tags onto a handful of named
//! categories; everything unknown or untagged lands in the default group.

use std::collections::HashMap;

use crate::event::Event;

/// Marks the event-type line inside a description. Matching is literal and
/// case-sensitive.
const TYPE_PREFIX: &str = "Type: ";

/// The configured groupings plus the default group to fall back to.
///
/// Classification is total: every event resolves to either a configured
/// grouping name or the default group, never to an error.
pub struct GroupingTable {
    groupings: HashMap<String, Vec<String>>,
    default_group: String,
}

impl GroupingTable {
    pub fn new<S: Into<String>>(groupings: HashMap<String, Vec<String>>, default_group: S) -> Self {
        Self {
            groupings,
            default_group: default_group.into(),
        }
    }

    /// Whether `name` is a configured grouping
    pub fn contains(&self, name: &str) -> bool {
        self.groupings.contains_key(name)
    }

    pub fn default_group(&self) -> &str {
        &self.default_group
    }

    /// Returns the grouping this event belongs to.
    /// Events without a recognizable type end up in the default group.
    pub fn classify(&self, event: &Event) -> &str {
        match detect_event_type(event) {
            None => &self.default_group,
            Some(event_type) => self.resolve(event_type),
        }
    }

    /// Match an event type to the grouping whose tag set contains it
    fn resolve(&self, event_type: &str) -> &str {
        for (grouping, types) in &self.groupings {
            if types.iter().any(|t| t == event_type) {
                return grouping;
            }
        }

        log::warn!(
            "Unknown event type '{}', using default group '{}'",
            event_type,
            self.default_group
        );
        &self.default_group
    }
}

/// Extracts the event type from the description field.
///
/// The type is expected in the format `Type: <type>` on any line of the
/// description. Returns `None` if no such line exists.
pub fn detect_event_type(event: &Event) -> Option<&str> {
    let description = event.description()?;

    description
        .lines()
        // descriptions often carry RFC 5545 escaped line breaks instead of real ones
        .flat_map(|line| line.split("\\n"))
        .map(str::trim)
        .find_map(|line| line.strip_prefix(TYPE_PREFIX))
        .map(str::trim)
        .filter(|event_type| !event_type.is_empty())
}
