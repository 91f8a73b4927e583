//! Student Records admin library.
//!
//! Login-gated CRUD over a single `student` table in `SQLite`, served with
//! axum and server-rendered askama templates. The binary in `main.rs` and
//! the integration tests both build the router through [`routes::app`].
//!
//! # Security
//!
//! - Admin passwords are stored as Argon2id hashes only
//! - Every SQL statement binds user-supplied values as parameters
//! - Free text is stripped of markup on input and HTML-escaped on output
//! - Sessions live server-side; the cookie carries only the session id

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod flash;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
