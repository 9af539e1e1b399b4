//! A module to build iCal documents

use ics::components::{Parameter, Property as IcsProperty};
use ics::{Event as IcsEvent, ICalendar};

use crate::calendar::{Calendar, Property};
use crate::event::Event;

use super::default_prod_id;

/// Serialize a [`Calendar`] back to its iCal text representation
pub fn build_from(calendar: &Calendar) -> String {
    let version = calendar.property_value("VERSION").unwrap_or("2.0");
    let prod_id = calendar
        .property_value("PRODID")
        .unwrap_or_else(|| default_prod_id());

    let mut document = ICalendar::new(version, prod_id);
    for property in calendar.properties() {
        // VERSION and PRODID are already part of the document header
        if property.name == "VERSION" || property.name == "PRODID" {
            continue;
        }
        document.push(convert_property(property));
    }
    for event in calendar.events() {
        document.add_event(convert_event(event));
    }

    document.to_string()
}

fn convert_event(event: &Event) -> IcsEvent<'_> {
    let uid = event.property_value("UID").unwrap_or_default();
    let dtstamp = event.property_value("DTSTAMP").unwrap_or_default();

    let mut out = IcsEvent::new(uid, dtstamp);
    for property in event.properties() {
        // UID and DTSTAMP were given to the constructor
        if property.name == "UID" || property.name == "DTSTAMP" {
            continue;
        }
        out.push(convert_property(property));
    }
    out
}

fn convert_property(property: &Property) -> IcsProperty<'_> {
    let mut out = IcsProperty::new(property.name.as_str(), property.value.as_str());
    for (name, values) in &property.params {
        out.add(Parameter::new(name.as_str(), values.join(",")));
    }
    out
}
