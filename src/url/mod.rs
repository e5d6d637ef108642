//! URL handling module for Sumi-Mirror
//!
//! This module provides the crawler's URL identity (fragment-stripped,
//! depth-tagged) and extraction of the domain of record.

mod domain;
mod identity;

pub use domain::domain_of_record;
pub use identity::CrawlUrl;
