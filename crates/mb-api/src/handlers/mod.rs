//! # mb-api Handlers
//!
//! Thin coordination between HTTP requests and the service layer: parse,
//! authorize, delegate, serialize. Authorization always runs before any
//! mutation is attempted.

pub mod auth;
pub mod boards;
pub mod elements;
pub mod labels;
pub mod social;
pub mod users;
