//! Access-token handling.
//!
//! Tokens are issued by the platform's login service; this server only
//! verifies them to identify the current user.

pub mod jwt;
