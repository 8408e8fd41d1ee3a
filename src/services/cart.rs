// services/cart.rs
//
// Shopping cart held outside the database. The storage backing is injected as
// a trait so the server can keep carts in a JSON file per visitor while tests
// run fully in memory; the totals are recomputed and persisted on every
// mutation, last write wins.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};

pub trait CartStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, raw: &str) -> Result<()>;
}

impl<T: CartStorage + ?Sized> CartStorage for &T {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, raw: &str) -> Result<()> {
        (**self).save(raw)
    }
}

/// Key-value persistence backed by a single JSON file.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::ServiceUnavailable(format!(
                "Cart storage read failed: {}",
                e
            ))),
        }
    }

    fn save(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).ok();
        }
        fs::write(&self.path, raw).map_err(|e| {
            AppError::ServiceUnavailable(format!("Cart storage write failed: {}", e))
        })
    }
}

/// In-memory storage for tests.
#[derive(Default)]
pub struct MemoryStorage {
    raw: Mutex<Option<String>>,
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.raw.lock().unwrap().clone())
    }

    fn save(&self, raw: &str) -> Result<()> {
        *self.raw.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

pub struct CartStore<S: CartStorage> {
    storage: S,
    items: Vec<CartLine>,
    total: f64,
    item_count: u32,
}

impl<S: CartStorage> CartStore<S> {
    /// Restores a cart from storage; an absent or unreadable payload starts
    /// an empty cart rather than failing the page.
    pub fn load(storage: S) -> Result<Self> {
        let items = match storage.load()? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => Vec::new(),
        };
        let mut store = CartStore {
            storage,
            items,
            total: 0.0,
            item_count: 0,
        };
        store.recompute();
        Ok(store)
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    /// Adds a line; an existing product id accumulates quantity instead of
    /// duplicating the line.
    pub fn add(&mut self, line: CartLine) -> Result<()> {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => self.items.push(line),
        }
        self.persist()
    }

    pub fn remove(&mut self, product_id: &str) -> Result<()> {
        self.items.retain(|line| line.product_id != product_id);
        self.persist()
    }

    /// Sets an absolute quantity; zero removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return self.remove(product_id);
        }
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            line.quantity = quantity;
        }
        self.persist()
    }

    fn recompute(&mut self) {
        self.total = self
            .items
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum();
        self.item_count = self.items.iter().map(|line| line.quantity).sum();
    }

    fn persist(&mut self) -> Result<()> {
        self.recompute();
        let raw = serde_json::to_string(&self.items)?;
        self.storage.save(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shirt(quantity: u32) -> CartLine {
        CartLine {
            product_id: "p1".to_string(),
            name: "Home Shirt".to_string(),
            price: 10.0,
            quantity,
        }
    }

    #[test]
    fn repeated_adds_accumulate_quantity_and_total() {
        let mut cart = CartStore::load(MemoryStorage::default()).unwrap();
        cart.add(shirt(1)).unwrap();
        cart.add(shirt(1)).unwrap();
        cart.add(shirt(2)).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 4);
        assert!((cart.total() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_drops_the_line() {
        let mut cart = CartStore::load(MemoryStorage::default()).unwrap();
        cart.add(shirt(2)).unwrap();
        cart.remove("p1").unwrap();
        assert!(cart.items().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn set_quantity_is_absolute_and_zero_removes() {
        let mut cart = CartStore::load(MemoryStorage::default()).unwrap();
        cart.add(shirt(3)).unwrap();
        cart.set_quantity("p1", 1).unwrap();
        assert_eq!(cart.item_count(), 1);
        cart.set_quantity("p1", 0).unwrap();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn cart_round_trips_through_storage() {
        let storage = MemoryStorage::default();
        {
            let mut cart = CartStore::load(&storage).unwrap();
            cart.add(shirt(2)).unwrap();
        }
        let restored = CartStore::load(&storage).unwrap();
        assert_eq!(restored.item_count(), 2);
        assert!((restored.total() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn corrupt_storage_starts_empty() {
        let storage = MemoryStorage::default();
        storage.save("not json").unwrap();
        let cart = CartStore::load(storage).unwrap();
        assert!(cart.items().is_empty());
    }
}
