//! A module to parse iCal documents

use crate::calendar::{Calendar, Property};
use crate::error::ParseError;
use crate::event::Event;

/// Parse an iCal document into a [`Calendar`]
pub fn parse(content: &str) -> Result<Calendar, ParseError> {
    let mut reader = ical::IcalParser::new(content.as_bytes());
    let parsed = match reader.next() {
        None => return Err(ParseError::NoCalendar),
        Some(Err(err)) => return Err(ParseError::Syntax(err.to_string())),
        Some(Ok(calendar)) => calendar,
    };

    // Feeds are expected to contain a single VCALENDAR
    if reader.next().map(|r| r.is_ok()) == Some(true) {
        log::warn!("Document contains more than one calendar, keeping only the first one");
    }

    let mut calendar = Calendar::new();
    for property in parsed.properties {
        calendar.push_property(convert_property(property));
    }
    for event in parsed.events {
        let properties = event.properties.into_iter().map(convert_property).collect();
        calendar.add_event(Event::from_properties(properties));
    }

    Ok(calendar)
}

fn convert_property(property: ical::property::Property) -> Property {
    Property {
        name: property.name,
        params: property.params.unwrap_or_default(),
        value: property.value.unwrap_or_default(),
    }
}
