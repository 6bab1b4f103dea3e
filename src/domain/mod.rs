//! Domain module for array classification.
//!
//! This module contains the token model and the pure classifier.

pub mod classifier;
pub mod token;

pub use classifier::{ClassificationResult, TokenClass, classify, classify_token};
pub use token::{RawToken, stringify};
