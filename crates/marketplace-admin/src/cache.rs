//! Client-side list cache with optimistic status patches.
//!
//! A patch is written into the cached list before the confirming request is polled. If the
//! request resolves to `Err`, the affected items are restored to their pre-patch values;
//! items touched by nothing else keep whatever state they have.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Item stored in a cached list and addressable by id.
pub trait CachedItem: Clone {
    type Id: Clone + Eq + Hash + std::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Pre-patch values for the items a patch touched.
#[derive(Debug)]
pub struct PatchUndo<T: CachedItem> {
    key: String,
    previous: Vec<T>,
}

impl<T: CachedItem> PatchUndo<T> {
    pub fn affected(&self) -> usize {
        self.previous.len()
    }
}

pub struct OptimisticCache<T: CachedItem> {
    entries: Mutex<HashMap<String, Vec<T>>>,
}

impl<T: CachedItem> Default for OptimisticCache<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: CachedItem> OptimisticCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Vec<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the cached list for a query key with freshly fetched data.
    pub fn put(&self, key: impl Into<String>, items: Vec<T>) {
        self.entries().insert(key.into(), items);
    }

    pub fn get(&self, key: &str) -> Option<Vec<T>> {
        self.entries().get(key).cloned()
    }

    pub fn invalidate(&self, key: &str) {
        self.entries().remove(key);
    }

    /// Apply `patch` to every cached item whose id is in `ids`, returning what is needed to undo it.
    pub fn patch<F>(&self, key: &str, ids: &[T::Id], patch: F) -> PatchUndo<T>
    where
        F: Fn(&mut T),
    {
        let mut entries = self.entries();
        let mut previous = Vec::new();

        if let Some(items) = entries.get_mut(key) {
            for item in items.iter_mut().filter(|item| ids.contains(item.id())) {
                previous.push(item.clone());
                patch(item);
            }
        }

        PatchUndo {
            key: key.to_string(),
            previous,
        }
    }

    /// Restore the items recorded in `undo`. Items removed from the cache since are skipped.
    pub fn revert(&self, undo: PatchUndo<T>) {
        let mut entries = self.entries();
        let Some(items) = entries.get_mut(&undo.key) else {
            return;
        };

        for original in undo.previous {
            if let Some(slot) = items.iter_mut().find(|item| item.id() == original.id()) {
                *slot = original;
            }
        }
    }

    /// Patch synchronously, then await `request`; the patch is reverted iff the request fails.
    pub async fn apply_optimistic<F, Fut, O, E>(
        &self,
        key: &str,
        ids: &[T::Id],
        patch: F,
        request: Fut,
    ) -> Result<O, E>
    where
        F: Fn(&mut T),
        Fut: Future<Output = Result<O, E>>,
        E: std::fmt::Display,
    {
        let undo = self.patch(key, ids, patch);

        match request.await {
            Ok(output) => Ok(output),
            Err(error) => {
                warn!(
                    cache_key = key,
                    affected = undo.affected(),
                    %error,
                    "optimistic update rejected; reverting cached items"
                );
                self.revert(undo);
                Err(error)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Active,
    Inactive,
    SoldOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub status: ListingStatus,
    pub price_per_unit: f64,
}

impl CachedItem for ListingSummary {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub buyer_name: String,
    pub status: OrderStatus,
    pub total_amount: f64,
}

impl CachedItem for OrderSummary {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

/// Bulk listing status mutation with optimistic cache update.
pub async fn bulk_update_listing_status<Fut, O, E>(
    cache: &OptimisticCache<ListingSummary>,
    key: &str,
    ids: &[String],
    status: ListingStatus,
    request: Fut,
) -> Result<O, E>
where
    Fut: Future<Output = Result<O, E>>,
    E: std::fmt::Display,
{
    cache
        .apply_optimistic(key, ids, |listing| listing.status = status, request)
        .await
}

/// Bulk order status mutation with optimistic cache update.
pub async fn bulk_update_order_status<Fut, O, E>(
    cache: &OptimisticCache<OrderSummary>,
    key: &str,
    ids: &[String],
    status: OrderStatus,
    request: Fut,
) -> Result<O, E>
where
    Fut: Future<Output = Result<O, E>>,
    E: std::fmt::Display,
{
    cache
        .apply_optimistic(key, ids, |order| order.status = status, request)
        .await
}
