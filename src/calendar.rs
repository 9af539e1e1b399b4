//! The internal representation of a calendar document

use crate::event::Event;

/// A single `NAME;PARAM=...:value` content line of an iCal document.
///
/// Values are kept in their wire form (no unescaping), so that a parsed
/// calendar can be serialized again without loss.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub name: String,
    pub params: Vec<(String, Vec<String>)>,
    pub value: String,
}

impl Property {
    /// Create a property without parameters
    pub fn new<S: Into<String>, T: Into<String>>(name: S, value: T) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            value: value.into(),
        }
    }
}

/// A parsed calendar: its top-level properties plus the events it contains.
///
/// Calendars handed out by the cache are shared between concurrent consumers.
/// Deriving a new calendar from a shared one must never write through it;
/// [`crate::filter::filter_by_grouping`] clones events before touching them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calendar {
    properties: Vec<Property>,
    events: Vec<Event>,
}

impl Calendar {
    /// Create an empty calendar
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn push_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Returns the value of the first property named `name`
    pub fn property_value(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.value.as_str())
    }

    /// The calendar display name (RFC 7986 `NAME`, falling back to the
    /// widely-used `X-WR-CALNAME`)
    pub fn name(&self) -> Option<&str> {
        self.property_value("NAME")
            .or_else(|| self.property_value("X-WR-CALNAME"))
    }

    /// Set the calendar display name, replacing any existing one.
    ///
    /// Both `NAME` and `X-WR-CALNAME` are written, since consumers disagree
    /// on which one they read.
    pub fn set_name(&mut self, name: &str) {
        self.upsert_property("NAME", name);
        self.upsert_property("X-WR-CALNAME", name);
    }

    fn upsert_property(&mut self, name: &str, value: &str) {
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(property) => property.value = value.to_string(),
            None => self.properties.push(Property::new(name, value)),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn add_event(&mut self, event: Event) {
        self.events.push(event);
    }
}
