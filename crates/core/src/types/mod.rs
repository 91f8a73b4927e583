//! Core types for student records.
//!
//! This module provides type-safe wrappers for the domain concepts.

pub mod id;
pub mod markup;
pub mod student;
pub mod username;

pub use id::StudentId;
pub use markup::strip_markup;
pub use student::{Age, Grade, StudentFieldError, StudentName};
pub use username::{Username, UsernameError};
