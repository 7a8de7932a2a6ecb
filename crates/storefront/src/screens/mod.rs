//! Screen view models.
//!
//! Each screen holds the data a presentation shell needs to render it. The
//! shell owns layout; these types own what is shown and what a user action
//! does.
//!
//! - `login` - Email/password form with inline error text
//! - `catalog` - Product list with add/remove buttons
//! - `cart` - Cart contents and total price

pub mod cart;
pub mod catalog;
pub mod login;

pub use cart::{CartItemView, CartView};
pub use catalog::{CatalogScreen, ProductCard};
pub use login::LoginScreen;
