//! # bfhl-classifier
//!
//! HTTP service that sorts an array of mixed-type values into odd numbers,
//! even numbers, alphabets and special characters, and derives a numeric sum
//! and an alternating-case concatenation of every letter it saw.
//!
//! ## Layout
//!
//! - [`domain`]: the pure classifier and the token stringify step
//! - [`api`]: axum handlers, DTOs, error envelope and router
//! - [`config`]: identity details and server settings read from the environment

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod domain;
