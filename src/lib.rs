//! gh-secrets-visibility
//!
//! Synchronizes the set of repositories authorized to read GitHub
//! organization secrets: resolves a desired repository list to numeric ids,
//! compares it with each secret's currently selected repositories, and
//! replaces the selection when any desired repository is missing.

pub mod client;
pub mod config;
pub mod error;
pub mod sync;
