//! Domain types and pure logic for the WeChef recipe backend.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these types.

pub mod costing;
pub mod error;
pub mod recipe;
pub mod types;
