//! The cart store.
//!
//! ## Operation Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  snapshot ──► fetch stock ──► build candidate ──► commit ──► persist │
//! │      │             │                 │               │               │
//! │      │             └── reject ───────┴── notice ◄────┘ (conflict:    │
//! │      │                                                 retry when    │
//! │      └─────────────── fresh snapshot ◄──────────────── optimistic)   │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart itself sits behind a short-lived `std::sync::Mutex` that is never
//! held across an `.await` or a storage write. Operations work on a clone of
//! the snapshot and swap in a new `Arc<Cart>` on commit; the write happens
//! after the swap, and a write for an older version never replaces a newer
//! one.

use crate::config::{Concurrency, StoreConfig, MAX_COMMIT_RETRIES};
use crate::error::{CartOperation, StoreError};
use crate::notify::Notifier;
use rocketshoes_cache::Cache;
use rocketshoes_commerce::{Cart, CommerceError, Product, ProductId};
use rocketshoes_data::CatalogApi;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Arguments of [`CartStore::update_product_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

#[derive(Debug)]
struct CartState {
    cart: Arc<Cart>,
    /// Bumped on every commit.
    version: u64,
}

/// Shopping cart store.
///
/// Holds the current cart, validates mutations against live stock through a
/// [`CatalogApi`], reports failures to a [`Notifier`] and persists every
/// committed cart through a [`Cache`].
pub struct CartStore<A, N> {
    api: A,
    cache: Cache,
    notifier: N,
    config: StoreConfig,
    state: Mutex<CartState>,
    /// Version of the last cart handed to storage.
    persisted: Mutex<u64>,
}

impl<A, N> CartStore<A, N>
where
    A: CatalogApi,
    N: Notifier,
{
    /// Create a store, loading the persisted cart.
    ///
    /// A missing key yields an empty cart. So does unreadable or invalid
    /// content, which is logged and left in place until the next commit
    /// overwrites it.
    pub fn open(api: A, cache: Cache, notifier: N, config: StoreConfig) -> Self {
        let cart = load_cart(&cache, &config.storage_key);
        debug!(
            key = %config.storage_key,
            items = cart.len(),
            "cart store opened"
        );

        Self {
            api,
            cache,
            notifier,
            config,
            state: Mutex::new(CartState {
                cart: Arc::new(cart),
                version: 0,
            }),
            persisted: Mutex::new(0),
        }
    }

    /// Current cart contents.
    pub fn cart(&self) -> Arc<Cart> {
        Arc::clone(&self.lock_state().cart)
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line item, or fetches the product and appends
    /// it with amount 1. Fails with [`StoreError::OutOfStock`] when the new
    /// amount would exceed stock.
    pub async fn add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, StoreError> {
        let result = self.with_retries(move || self.try_add(product_id)).await;
        self.report(CartOperation::Add, product_id, result)
    }

    /// Remove a product's line item entirely.
    pub fn remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, StoreError> {
        let result = self.mutate_now(|cart| {
            cart.remove(product_id)?;
            Ok(())
        });
        self.report(CartOperation::Remove, product_id, result)
    }

    /// Set a product's amount.
    ///
    /// Amounts of zero or less are ignored and return `Ok(None)` without
    /// touching the API; use [`remove_product`](Self::remove_product) to
    /// delete a line item.
    pub async fn update_product_amount(
        &self,
        UpdateProductAmount { product_id, amount }: UpdateProductAmount,
    ) -> Result<Option<Arc<Cart>>, StoreError> {
        if amount <= 0 {
            debug!(%product_id, amount, "ignoring non-positive amount");
            return Ok(None);
        }

        let result = self
            .with_retries(move || self.try_update(product_id, amount))
            .await;
        self.report(CartOperation::Update, product_id, result)
            .map(Some)
    }

    async fn try_add(&self, product_id: ProductId) -> Result<Arc<Cart>, StoreError> {
        let (snapshot, version) = self.snapshot();
        let mut candidate = Cart::clone(&snapshot);

        let current = candidate.amount_of(product_id);
        let requested = current
            .checked_add(1)
            .ok_or(CommerceError::InvalidQuantity(current))?;

        let stock = self.api.stock(product_id).await?;
        if !stock.can_fulfill(requested) {
            return Err(StoreError::OutOfStock {
                product_id,
                requested,
                available: stock.amount,
            });
        }

        if candidate.contains(product_id) {
            candidate.set_amount(product_id, requested)?;
        } else {
            let product: Product = self.api.product(product_id).await?;
            candidate.push(product.with_amount(1))?;
        }

        self.commit(version, Arc::new(candidate))
    }

    async fn try_update(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<Cart>, StoreError> {
        let (snapshot, version) = self.snapshot();

        let stock = self.api.stock(product_id).await?;
        if !stock.can_fulfill(amount) {
            return Err(StoreError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        let mut candidate = Cart::clone(&snapshot);
        candidate.set_amount(product_id, amount)?;

        self.commit(version, Arc::new(candidate))
    }

    /// Run `attempt` until it commits, fails for a reason other than a
    /// conflict, or runs out of retries.
    async fn with_retries<F, Fut>(&self, mut attempt: F) -> Result<Arc<Cart>, StoreError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Arc<Cart>, StoreError>>,
    {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match attempt().await {
                Err(StoreError::Conflict { .. }) if attempts < MAX_COMMIT_RETRIES => {
                    debug!(attempts, "cart changed underneath operation, retrying");
                }
                Err(StoreError::Conflict { .. }) => {
                    return Err(StoreError::Conflict { attempts });
                }
                other => return other,
            }
        }
    }

    /// Apply a purely local change to the current cart and commit it in one
    /// critical section.
    fn mutate_now<F>(&self, change: F) -> Result<Arc<Cart>, StoreError>
    where
        F: FnOnce(&mut Cart) -> Result<(), StoreError>,
    {
        let (candidate, version) = {
            let mut state = self.lock_state();
            let mut candidate = Cart::clone(&state.cart);
            change(&mut candidate)?;
            let candidate = Arc::new(candidate);
            let version = self.install(&mut state, &candidate);
            (candidate, version)
        };
        Ok(self.persist_committed(candidate, version))
    }

    fn snapshot(&self) -> (Arc<Cart>, u64) {
        let state = self.lock_state();
        (Arc::clone(&state.cart), state.version)
    }

    fn commit(&self, base_version: u64, candidate: Arc<Cart>) -> Result<Arc<Cart>, StoreError> {
        let version = {
            let mut state = self.lock_state();
            if self.config.concurrency == Concurrency::Optimistic && state.version != base_version {
                return Err(StoreError::Conflict { attempts: 1 });
            }
            self.install(&mut state, &candidate)
        };
        Ok(self.persist_committed(candidate, version))
    }

    /// Swap in `candidate`, returning its new version if it is a different
    /// cart value.
    fn install(&self, state: &mut CartState, candidate: &Arc<Cart>) -> Option<u64> {
        if Arc::ptr_eq(&state.cart, candidate) {
            return None;
        }

        state.cart = Arc::clone(candidate);
        state.version += 1;
        info!(
            version = state.version,
            items = candidate.len(),
            units = candidate.item_count(),
            "cart committed"
        );
        Some(state.version)
    }

    /// Must be called with the state lock released.
    fn persist_committed(&self, cart: Arc<Cart>, version: Option<u64>) -> Arc<Cart> {
        if let Some(version) = version {
            self.persist(version, &cart);
        }
        cart
    }

    fn persist(&self, version: u64, cart: &Cart) {
        let mut persisted = self.persisted.lock().unwrap_or_else(PoisonError::into_inner);
        if *persisted >= version {
            debug!(version, persisted = *persisted, "newer cart already persisted");
            return;
        }
        *persisted = version;

        if let Err(e) = self.cache.set(&self.config.storage_key, cart) {
            error!(key = %self.config.storage_key, error = %e, "failed to persist cart");
        }
    }

    fn report<T>(
        &self,
        op: CartOperation,
        product_id: ProductId,
        result: Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        if let Err(e) = &result {
            let notice = e.notice(op);
            warn!(%op, %product_id, error = %e, notice = notice.message(), "cart operation failed");
            self.notifier.notify(notice);
        }
        result
    }

    fn lock_state(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn load_cart(cache: &Cache, key: &str) -> Cart {
    match cache.get::<Vec<Product>>(key) {
        Ok(Some(items)) => Cart::from_items(items).unwrap_or_else(|e| {
            warn!(key, error = %e, "persisted cart breaks cart invariants, starting empty");
            Cart::new()
        }),
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "persisted cart is unreadable, starting empty");
            Cart::new()
        }
    }
}
