//! Package discovery and selection.
//!
//! This module locates the repo's member packages on disk and applies the
//! name-based ignore filter before anything is scheduled.

mod discovery;
mod filter;

pub use discovery::{PACKAGES_DIR, find_packages};
pub use filter::filter_packages;
