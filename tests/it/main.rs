//! Single test binary entry point.
//!
//! Every integration test compiles into this one binary, which keeps link
//! time down.
//!
//! Structure:
//! - helpers: Builders and fakes for the collaborator traits
//! - integration: Multi-component workflows driven through `Pinboard`
//! - unit: Single-component tests against the public API

mod helpers;
mod unit;
