//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod money;
pub mod sku;

pub use email::{Email, EmailError};
pub use money::display_amount;
pub use sku::{Sku, SkuError};
