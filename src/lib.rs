//! This crate implements a filtering proxy for iCalendar feeds.
//!
//! It fetches remote calendars in the [`client`] module, keeping them for a few minutes in the time-bounded [`cache`] so that busy feeds are not hammered on every request.
//!
//! Events carry their category as a `Type:` line inside their description; the [`grouping`] module classifies each event into one of the configured groupings (falling back to a default group), and the [`filter`] module derives a new calendar containing only the events of one grouping. \
//! The [`server`] module exposes the whole pipeline over HTTP, re-serving the filtered calendar as a regular iCal document.

pub mod traits;

pub mod calendar;
pub use calendar::Calendar;
mod event;
pub use event::Event;

pub mod cache;
pub mod client;
pub use client::Client;
pub mod config;
pub use config::Config;
pub mod error;
pub use error::{ConfigError, FetchError, ParseError};
pub mod filter;
pub mod grouping;
pub mod ical;
pub mod server;
