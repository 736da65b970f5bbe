//! Shopfront Core - Shared types library.
//!
//! This crate provides common value types used across Shopfront components:
//! - `storefront` - Cart session and checkout client library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for SKUs, emails, and money display

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
