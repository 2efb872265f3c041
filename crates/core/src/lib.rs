//! Shared vocabulary of the learnpath backend.
//!
//! Domain types, the error taxonomy, and pure business logic (no database
//! or HTTP dependencies). The recommendation scorer lives here so it can be
//! exercised without any I/O.

pub mod error;
pub mod learning;
pub mod recommendation;
pub mod types;
