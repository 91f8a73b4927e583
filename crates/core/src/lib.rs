//! Student Records Core - Shared types library.
//!
//! This crate provides the domain types used across the workspace:
//! - `admin` - Web administration panel for student records
//! - `cli` - Command-line tools for migrations and admin accounts
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Every free-text value that reaches the store passes through
//! one of the parsers defined here.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, usernames, and validated student fields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
