//! Utility functions for privacy hashing, request classification, and
//! redirect sanitization.
//!
//! This module provides pure helper functions used across the application:
//!
//! - [`privacy`] - Daily-salted one-way IP hashing
//! - [`classify`] - Device and referrer classification from headers
//! - [`sanitize`] - Redirect target validation and normalization

pub mod classify;
pub mod privacy;
pub mod sanitize;
