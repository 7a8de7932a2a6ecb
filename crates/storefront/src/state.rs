//! Application root.
//!
//! [`Storefront`] owns every piece of state the screens share: the cart
//! store, the navigation stack, the service clients and the screen models.
//! A presentation shell holds one `Storefront` and forwards user actions to
//! it; nothing lives in globals.

use std::sync::Arc;

use shopfront_core::ProductId;
use tracing::{info, instrument};

use crate::cart::{CartChange, CartStore};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::navigation::{NavigationError, Navigator, Screen};
use crate::screens::{CartView, CatalogScreen, LoginScreen, ProductCard};
use crate::services::{self, AuthClient, AuthSession, CatalogClient};
use crate::storage::{FileStore, KeyValueStore};

/// The running storefront.
pub struct Storefront<S: KeyValueStore> {
    config: StorefrontConfig,
    auth: AuthSession<S>,
    catalog_client: CatalogClient,
    cart: CartStore,
    navigator: Navigator,
    login: LoginScreen,
    catalog: CatalogScreen,
}

impl Storefront<FileStore> {
    /// Launch with a [`FileStore`] in the configured storage directory.
    ///
    /// # Errors
    ///
    /// See [`Storefront::launch`].
    pub async fn launch_with_file_store(config: StorefrontConfig) -> Result<Self> {
        let store = Arc::new(FileStore::new(config.storage_dir.clone()));
        Self::launch(config, store).await
    }
}

impl<S: KeyValueStore> Storefront<S> {
    /// Build the service clients and restore the persisted cart.
    ///
    /// Starts on the login screen. A missing or unreadable cart snapshot is
    /// not an error: the cart starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or a configured
    /// endpoint is not a valid URL.
    #[instrument(skip_all)]
    pub async fn launch(config: StorefrontConfig, store: Arc<S>) -> Result<Self> {
        let http = services::http_client(config.http_timeout)?;
        let catalog_client = CatalogClient::new(&config.catalog, http.clone())?;
        let auth_client = AuthClient::new(&config.auth, http)?;
        let auth = AuthSession::new(auth_client, Arc::clone(&store));

        let cart = CartStore::load(store).await;
        info!(cart_items = cart.items().len(), "Storefront launched");

        Ok(Self {
            config,
            auth,
            catalog_client,
            cart,
            navigator: Navigator::new(),
            login: LoginScreen::new(),
            catalog: CatalogScreen::new(),
        })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Screen currently shown.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.navigator.current()
    }

    /// Navigation stack.
    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Auth session (stored token access).
    #[must_use]
    pub const fn auth(&self) -> &AuthSession<S> {
        &self.auth
    }

    /// Login form.
    #[must_use]
    pub const fn login_screen(&self) -> &LoginScreen {
        &self.login
    }

    /// Login form, for editing its fields.
    pub const fn login_screen_mut(&mut self) -> &mut LoginScreen {
        &mut self.login
    }

    /// Catalog screen.
    #[must_use]
    pub const fn catalog_screen(&self) -> &CatalogScreen {
        &self.catalog
    }

    /// Submit the login form.
    ///
    /// On success the token is persisted, the catalog replaces the login
    /// screen and the product list is fetched. On failure the form's error
    /// text is set and the login screen stays. Returns whether login
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns a navigation error if the login screen is not shown.
    pub async fn submit_login(&mut self) -> Result<bool> {
        self.navigator.require(Screen::Login, "submit login")?;

        if self.login.submit(&self.auth).await.is_none() {
            return Ok(false);
        }

        self.navigator.login_succeeded()?;
        self.catalog.load(&self.catalog_client).await;
        Ok(true)
    }

    /// Fetch the product list again.
    pub async fn reload_catalog(&mut self) {
        self.catalog.load(&self.catalog_client).await;
    }

    /// Product cards for the catalog screen.
    #[must_use]
    pub fn product_cards(&self) -> Vec<ProductCard> {
        self.catalog.cards(self.cart.state())
    }

    /// Add or remove a listed product (the catalog's cart button).
    ///
    /// Returns `None` if the product is not in the current catalog.
    pub fn toggle_product(&mut self, product_id: &ProductId) -> Option<CartChange> {
        let product = self.catalog.product(product_id)?.clone();
        Some(self.cart.toggle(product))
    }

    /// Catalog → Cart.
    ///
    /// # Errors
    ///
    /// Returns a navigation error unless the catalog is shown.
    pub fn open_cart(&mut self) -> Result<CartView> {
        self.navigator.open_cart()?;
        Ok(self.cart_view())
    }

    /// Current cart contents and total.
    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from(self.cart.state())
    }

    /// Remove an entry from the cart screen.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> CartView {
        self.cart.remove(product_id);
        self.cart_view()
    }

    /// Return to the previous screen.
    ///
    /// # Errors
    ///
    /// Returns a navigation error when there is nothing to go back to.
    pub fn back(&mut self) -> Result<Screen> {
        Ok(self.navigator.back()?)
    }

    /// Clear the stored token and return to the login screen.
    ///
    /// The cart is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if already on the login screen or the token could
    /// not be removed; in both cases the screen does not change.
    pub async fn logout(&mut self) -> Result<()> {
        if self.navigator.current() == Screen::Login {
            return Err(NavigationError {
                from: Screen::Login,
                action: "log out",
            }
            .into());
        }

        self.auth.logout().await?;
        self.navigator.logout()?;
        self.login = LoginScreen::new();
        Ok(())
    }

    /// Wait for pending cart writes before the process exits.
    pub async fn shutdown(self) {
        self.cart.flush().await;
        info!("Storefront shut down");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use shopfront_core::Product;

    use super::*;
    use crate::config::{AuthConfig, CatalogConfig};
    use crate::error::AppError;
    use crate::screens::login::MISSING_FIELDS_MESSAGE;
    use crate::storage::{MemoryStore, keys};

    // Nothing listens on the discard port, so any request fails fast.
    fn offline_config() -> StorefrontConfig {
        StorefrontConfig {
            catalog: CatalogConfig {
                endpoint: "http://127.0.0.1:9/catalog".to_string(),
                ..CatalogConfig::default()
            },
            auth: AuthConfig {
                endpoint: "http://127.0.0.1:9/auth".to_string(),
            },
            http_timeout: Duration::from_secs(2),
            ..StorefrontConfig::default()
        }
    }

    #[tokio::test]
    async fn test_launch_starts_on_login_with_empty_cart() {
        let store = Arc::new(MemoryStore::new());
        let app = Storefront::launch(offline_config(), store).await.unwrap();

        assert_eq!(app.screen(), Screen::Login);
        assert!(app.cart().items().is_empty());
        assert_eq!(app.cart_view().total_label, "Total Price: 0.00");
    }

    #[tokio::test]
    async fn test_launch_restores_persisted_cart() {
        let store = Arc::new(MemoryStore::new());
        let saved = vec![Product::new(1, "Laptop", Some("1299.00"))];
        store
            .set(keys::CART, &serde_json::to_string(&saved).unwrap())
            .await
            .unwrap();

        let app = Storefront::launch(offline_config(), store).await.unwrap();

        assert_eq!(app.cart().items(), saved.as_slice());
        assert_eq!(app.cart_view().total_label, "Total Price: 1299.00");
    }

    #[tokio::test]
    async fn test_launch_rejects_invalid_endpoint() {
        let mut config = offline_config();
        config.catalog.endpoint = "not a url".to_string();

        let result = Storefront::launch(config, Arc::new(MemoryStore::new())).await;

        assert!(matches!(result, Err(AppError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_empty_login_stays_on_login() {
        let mut app = Storefront::launch(offline_config(), Arc::new(MemoryStore::new()))
            .await
            .unwrap();

        assert!(!app.submit_login().await.unwrap());
        assert_eq!(app.screen(), Screen::Login);
        assert_eq!(app.login_screen().error(), Some(MISSING_FIELDS_MESSAGE));
    }

    #[tokio::test]
    async fn test_cart_navigation_requires_login() {
        let mut app = Storefront::launch(offline_config(), Arc::new(MemoryStore::new()))
            .await
            .unwrap();

        assert!(matches!(app.open_cart(), Err(AppError::Navigation(_))));
        assert!(matches!(app.back(), Err(AppError::Navigation(_))));
        assert!(matches!(app.logout().await, Err(AppError::Navigation(_))));
        assert_eq!(app.screen(), Screen::Login);
    }

    #[tokio::test]
    async fn test_toggle_unknown_product_is_ignored() {
        let mut app = Storefront::launch(offline_config(), Arc::new(MemoryStore::new()))
            .await
            .unwrap();

        assert!(app.toggle_product(&ProductId::from(1)).is_none());
        assert!(app.cart().items().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_flushes_cart() {
        let store = Arc::new(MemoryStore::new());
        let mut app = Storefront::launch(offline_config(), Arc::clone(&store))
            .await
            .unwrap();

        app.remove_from_cart(&ProductId::from(1));
        app.shutdown().await;

        assert_eq!(store.get(keys::CART).await.unwrap().as_deref(), Some("[]"));
    }
}
