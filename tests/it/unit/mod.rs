//! Unit tests - single components through their public API.

mod favicon_tests;
mod notifications_tests;
mod snapshot_tests;
mod store_tests;
