//! GreenMart Core - Shared domain library.
//!
//! This crate provides the types and pure logic shared by GreenMart
//! components:
//! - `storefront` - Public-facing e-commerce site
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session handling. Everything here is deterministic and
//! testable in isolation.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, quantities, and prices
//! - [`cart`] - Cart line items and the subtotal/item-count reduction
//! - [`order`] - Order-history domain types
//! - [`validation`] - Declarative credential validation rules

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod order;
pub mod types;
pub mod validation;

pub use types::*;
