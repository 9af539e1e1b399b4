//! This module handles conversion between iCal documents and the internal representation
//!
//! It is a wrapper around different Rust third-party libraries, since I haven't found any complete library that is able to parse _and_ generate iCal files

mod parser;
pub use parser::parse;
mod builder;
pub use builder::build_from;

use once_cell::sync::Lazy;

/// Part of the ProdID string that describes the organization (example of a ProdID string: `-//ABC Corporation//My Product//EN`)
const ORG_NAME: &str = "calsieve";
/// Part of the ProdID string that describes the product name
const PRODUCT_NAME: &str = "CalSieve";

static DEFAULT_PROD_ID: Lazy<String> = Lazy::new(|| format!("-//{}//{}//EN", ORG_NAME, PRODUCT_NAME));

/// The ProdID used for calendars whose source did not provide one
pub fn default_prod_id() -> &'static str {
    &DEFAULT_PROD_ID
}
