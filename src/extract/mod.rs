//! Price extraction from page markup.
//!
//! - site profiles and matchers (`profile`)
//! - fragment parsing (`parse`)
//! - the fallback chain itself (`extractor`)

pub mod extractor;
pub mod parse;
pub mod profile;

pub use extractor::{extract, extract_from_document};
pub use parse::parse_price;
pub use profile::{Matcher, SelectorRule, SiteProfile};
