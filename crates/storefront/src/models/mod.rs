//! Domain models for the storefront session.

pub mod session;

pub use session::AccessToken;
