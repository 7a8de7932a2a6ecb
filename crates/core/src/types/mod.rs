//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for the catalog's domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use email::{Email, EmailError};
pub use id::ProductId;
pub use price::{CartTotal, ListedPrice};
pub use product::{ImageFiles, Product, ProductImage};
