//! Three-screen navigation stack.
//!
//! ```text
//! Login --login_succeeded--> Catalog --open_cart--> Cart
//!   ^                           |  ^                  |
//!   +---------logout------------+  +------back--------+
//!   +---------------------logout----------------------+
//! ```
//!
//! A successful login replaces the stack, so `back` from the catalog never
//! returns to the login form.

use core::fmt;

use thiserror::Error;

/// A storefront screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Catalog,
    Cart,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Login => "Login",
            Self::Catalog => "Catalog",
            Self::Cart => "Cart",
        })
    }
}

/// Navigation transition not allowed from the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot {action} from {from}")]
pub struct NavigationError {
    /// Screen the transition was attempted from.
    pub from: Screen,
    /// Attempted transition.
    pub action: &'static str,
}

/// Navigation stack. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Start on the login screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Screen::Login],
        }
    }

    /// Screen currently shown.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.stack.last().copied().unwrap_or(Screen::Login)
    }

    /// Screens from bottom to top.
    #[must_use]
    pub fn stack(&self) -> &[Screen] {
        &self.stack
    }

    /// Login → Catalog, replacing the whole stack.
    ///
    /// # Errors
    ///
    /// Returns an error unless the login screen is shown.
    pub fn login_succeeded(&mut self) -> Result<Screen, NavigationError> {
        self.require(Screen::Login, "complete login")?;
        self.stack = vec![Screen::Catalog];
        Ok(Screen::Catalog)
    }

    /// Catalog → Cart.
    ///
    /// # Errors
    ///
    /// Returns an error unless the catalog is shown.
    pub fn open_cart(&mut self) -> Result<Screen, NavigationError> {
        self.require(Screen::Catalog, "open cart")?;
        self.stack.push(Screen::Cart);
        Ok(Screen::Cart)
    }

    /// Return to the previous screen.
    ///
    /// # Errors
    ///
    /// Returns an error when there is nothing to go back to.
    pub fn back(&mut self) -> Result<Screen, NavigationError> {
        if self.stack.len() <= 1 {
            return Err(NavigationError {
                from: self.current(),
                action: "go back",
            });
        }
        self.stack.pop();
        Ok(self.current())
    }

    /// Catalog or Cart → Login, clearing the stack.
    ///
    /// # Errors
    ///
    /// Returns an error if already on the login screen.
    pub fn logout(&mut self) -> Result<Screen, NavigationError> {
        if self.current() == Screen::Login {
            return Err(NavigationError {
                from: Screen::Login,
                action: "log out",
            });
        }
        self.stack = vec![Screen::Login];
        Ok(Screen::Login)
    }

    /// Check that `screen` is the one currently shown.
    ///
    /// # Errors
    ///
    /// Returns an error naming `action` if another screen is shown.
    pub fn require(&self, screen: Screen, action: &'static str) -> Result<(), NavigationError> {
        let from = self.current();
        if from == screen {
            Ok(())
        } else {
            Err(NavigationError { from, action })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_login() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Screen::Login);
        assert_eq!(nav.stack(), &[Screen::Login]);
    }

    #[test]
    fn test_forward_flow() {
        let mut nav = Navigator::new();
        assert_eq!(nav.login_succeeded().unwrap(), Screen::Catalog);
        assert_eq!(nav.open_cart().unwrap(), Screen::Cart);
        assert_eq!(nav.stack(), &[Screen::Catalog, Screen::Cart]);
        assert_eq!(nav.back().unwrap(), Screen::Catalog);
    }

    #[test]
    fn test_login_replaces_stack() {
        let mut nav = Navigator::new();
        nav.login_succeeded().unwrap();

        let err = nav.back().unwrap_err();
        assert_eq!(err.from, Screen::Catalog);
        assert_eq!(nav.current(), Screen::Catalog);
    }

    #[test]
    fn test_logout_from_cart() {
        let mut nav = Navigator::new();
        nav.login_succeeded().unwrap();
        nav.open_cart().unwrap();

        assert_eq!(nav.logout().unwrap(), Screen::Login);
        assert_eq!(nav.stack(), &[Screen::Login]);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut nav = Navigator::new();
        assert!(nav.open_cart().is_err());
        assert!(nav.logout().is_err());
        assert!(nav.back().is_err());

        nav.login_succeeded().unwrap();
        assert!(nav.login_succeeded().is_err());

        nav.open_cart().unwrap();
        assert!(nav.open_cart().is_err());
    }

    #[test]
    fn test_error_display() {
        let err = NavigationError {
            from: Screen::Login,
            action: "open cart",
        };
        assert_eq!(err.to_string(), "cannot open cart from Login");
    }
}
