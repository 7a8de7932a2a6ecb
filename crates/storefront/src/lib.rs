//! Shopfront storefront library.
//!
//! A headless storefront client: a persisted shopping cart, a remote product
//! catalog, email/password login and the three-screen navigation that ties
//! them together. A presentation shell drives it through [`Storefront`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod services;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use state::Storefront;
