use std::path::Path;

use chrono::Local;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cart::Cart;
use crate::catalog::default_catalog;
use crate::checkout::{self, CheckoutDecision, CheckoutResult, FulfillmentWindow};
use crate::db::{CART_KEY, Database, PROFILE_KEY, THEME_KEY};
use crate::error::EatFitResult;
use crate::menu::{MenuQuery, filter_meals};
use crate::models::{
    CartLine, MealRecord, ProfileForm, ProfileInsights, Theme, Totals, UserProfile,
};
use crate::nutrition;

/// Key-value storage for the persisted profile, cart and theme.
///
/// The SQLite [`Database`] is the production implementation; tests swap in
/// in-memory or failing stores.
pub trait StateStore {
    fn load(&self, key: &str) -> EatFitResult<Option<String>>;
    fn save(&self, key: &str, value: &str) -> EatFitResult<()>;
    /// Remove every key or, on failure, none of them.
    fn remove_all(&self, keys: &[&str]) -> EatFitResult<()>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub profile: Option<UserProfile>,
    pub cart: Cart,
}

/// Owns the application state and the store it is persisted to.
///
/// Every mutation is applied to a copy, persisted, and only then committed,
/// so a storage failure leaves the in-memory state as it was. Multi-key
/// writes go through [`StateStore::remove_all`] so the store is never left
/// half-updated either.
pub struct EatFitService {
    store: Box<dyn StateStore>,
    catalog: Vec<MealRecord>,
    state: AppState,
}

impl EatFitService {
    pub fn new(db_path: &Path) -> EatFitResult<Self> {
        let db = Database::open(db_path)?;
        Self::with_store(Box::new(db), default_catalog())
    }

    pub fn new_in_memory() -> EatFitResult<Self> {
        let db = Database::open_in_memory()?;
        Self::with_store(Box::new(db), default_catalog())
    }

    pub fn with_store(store: Box<dyn StateStore>, catalog: Vec<MealRecord>) -> EatFitResult<Self> {
        let profile = load_json::<Option<UserProfile>>(store.as_ref(), PROFILE_KEY)?.flatten();
        let cart = load_json::<Cart>(store.as_ref(), CART_KEY)?.unwrap_or_default();
        debug!(
            has_profile = profile.is_some(),
            cart_rows = cart.rows().len(),
            "loaded state"
        );
        Ok(Self {
            store,
            catalog,
            state: AppState { profile, cart },
        })
    }

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn catalog(&self) -> &[MealRecord] {
        &self.catalog
    }

    // --- Profile ---

    /// Validate the raw form, derive the calorie target, and replace the
    /// stored profile.
    pub fn set_profile(&mut self, form: &ProfileForm) -> EatFitResult<UserProfile> {
        let profile = UserProfile::from_form(form)?;
        self.store
            .save(PROFILE_KEY, &serde_json::to_string(&profile)?)?;
        info!(
            goal = %profile.goal,
            activity = %profile.activity,
            calories = profile.calories,
            "profile updated"
        );
        self.state.profile = Some(profile.clone());
        Ok(profile)
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.profile.as_ref()
    }

    #[must_use]
    pub fn insights(&self) -> Option<ProfileInsights> {
        self.state.profile.as_ref().map(nutrition::insights)
    }

    // --- Menu ---

    #[must_use]
    pub fn filtered_meals(&self, query: &MenuQuery) -> Vec<&MealRecord> {
        let goal = self.state.profile.as_ref().map(|p| p.goal);
        filter_meals(&self.catalog, goal, query)
    }

    // --- Cart ---

    pub fn add_to_cart(&mut self, id: u32) -> EatFitResult<()> {
        self.mutate_cart(|cart| cart.add(id))?;
        debug!(id, "added to cart");
        Ok(())
    }

    /// Returns `false` when the meal is not in the cart.
    pub fn increase_qty(&mut self, id: u32) -> EatFitResult<bool> {
        self.mutate_cart(|cart| cart.update_qty(id, 1))
    }

    /// Returns `false` when the meal is not in the cart.
    pub fn decrease_qty(&mut self, id: u32) -> EatFitResult<bool> {
        self.mutate_cart(|cart| cart.update_qty(id, -1))
    }

    pub fn remove_from_cart(&mut self, id: u32) -> EatFitResult<bool> {
        self.mutate_cart(|cart| cart.remove(id))
    }

    pub fn clear_cart(&mut self) -> EatFitResult<()> {
        self.mutate_cart(Cart::clear)
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.state.cart
    }

    #[must_use]
    pub fn cart_totals(&self) -> Totals {
        self.state.cart.totals(&self.catalog)
    }

    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.state.cart.lines(&self.catalog)
    }

    fn mutate_cart<R>(&mut self, apply: impl FnOnce(&mut Cart) -> R) -> EatFitResult<R> {
        let mut next = self.state.cart.clone();
        let outcome = apply(&mut next);
        self.store.save(CART_KEY, &serde_json::to_string(&next)?)?;
        self.state.cart = next;
        Ok(outcome)
    }

    // --- Checkout ---

    /// Rejections come back as `accepted: false` results and leave the cart
    /// untouched. Acceptance empties and persists the cart.
    pub fn checkout(&mut self) -> EatFitResult<CheckoutResult> {
        let totals = self.cart_totals();
        match checkout::evaluate(&totals, self.state.profile.as_ref()) {
            CheckoutDecision::EmptyCart => {
                debug!("checkout rejected: cart empty");
                Ok(CheckoutResult::empty_cart())
            }
            CheckoutDecision::OverBudget { overage } => {
                debug!(overage, "checkout rejected: over budget");
                Ok(CheckoutResult::over_budget(overage))
            }
            CheckoutDecision::Accepted => {
                self.mutate_cart(Cart::clear)?;
                info!(
                    items = totals.items,
                    price = totals.price,
                    calories = totals.calories,
                    "order placed"
                );
                Ok(CheckoutResult::accepted(
                    self.state.profile.as_ref(),
                    FulfillmentWindow::starting_at(Local::now()),
                ))
            }
        }
    }

    /// Forget the profile and the cart, including their persisted copies.
    pub fn reset_all(&mut self) -> EatFitResult<()> {
        self.store.remove_all(&[PROFILE_KEY, CART_KEY])?;
        self.state = AppState::default();
        info!("all data reset");
        Ok(())
    }

    // --- Theme ---

    pub fn theme(&self) -> EatFitResult<Theme> {
        match self.store.load(THEME_KEY)? {
            Some(raw) => Ok(raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "ignoring unknown stored theme");
                Theme::default()
            })),
            None => Ok(Theme::default()),
        }
    }

    pub fn set_theme(&self, theme: Theme) -> EatFitResult<()> {
        self.store.save(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&self) -> EatFitResult<Theme> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

/// Read and decode a stored value. Undecodable data is logged and treated
/// as absent; store failures propagate.
fn load_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> EatFitResult<Option<T>> {
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable stored value");
            Ok(None)
        }
    }
}
