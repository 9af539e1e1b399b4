//! Calendar events

use crate::calendar::Property;

/// A single VEVENT: an ordered list of its properties.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    properties: Vec<Property>,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_properties(properties: Vec<Property>) -> Self {
        Self { properties }
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

    pub fn summary(&self) -> Option<&str> {
        self.property_value("SUMMARY")
    }

    /// Replace the event summary, keeping any parameters the property carried
    pub fn set_summary<S: Into<String>>(&mut self, summary: S) {
        let summary = summary.into();
        match self.properties.iter_mut().find(|p| p.name == "SUMMARY") {
            Some(property) => property.value = summary,
            None => self.properties.push(Property::new("SUMMARY", summary)),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.property_value("DESCRIPTION")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_summary_keeps_parameters() {
        let mut event = Event::new();
        event.push_property(Property {
            name: "SUMMARY".to_string(),
            params: vec![("LANGUAGE".to_string(), vec!["nl".to_string()])],
            value: "INFO101 - Hoorcollege".to_string(),
        });

        event.set_summary("Hoorcollege");

        assert_eq!(event.summary(), Some("Hoorcollege"));
        assert_eq!(
            event.properties()[0].params,
            vec![("LANGUAGE".to_string(), vec!["nl".to_string()])]
        );
    }

    #[test]
    fn set_summary_on_event_without_one() {
        let mut event = Event::new();
        event.set_summary("Tentamen");
        assert_eq!(event.summary(), Some("Tentamen"));
    }
}
