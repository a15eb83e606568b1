//! Shoebox Core - Shared types library.
//!
//! This crate provides the common types used across all Shoebox components:
//! - `cart` - The cart session store library
//! - `cli` - Command-line front end for cart operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog and cart types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
