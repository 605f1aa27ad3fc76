//! JSON repository for tracked products.
//!
//! File layout (kept compatible with existing tracker files):
//!
//! ```json
//! {
//!   "AirPods Pro": {
//!     "name": "AirPods Pro",
//!     "url": "https://...",
//!     "prices": [ { "date": "2024-01-15T10:30:00.123456", "price": 249.99 } ]
//!   }
//! }
//! ```
//!
//! Commands load a [`Catalog`] once, work on it in memory and save it once.
//! Saves go through a temporary sibling file and a rename so readers never see
//! a partial file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::domain::Product;
use crate::error::StoreError;

/// Tracked products in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name == name)
    }

    /// Add a product; names are unique.
    pub fn insert(&mut self, product: Product) -> Result<(), StoreError> {
        if self.contains(&product.name) {
            return Err(StoreError::Duplicate(product.name));
        }
        self.products.push(product);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Product> {
        self.products.iter_mut()
    }
}

/// The products file on disk.
#[derive(Debug, Clone)]
pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog.
    ///
    /// A missing file is an empty catalog. A file that is not valid product
    /// JSON is copied to `<file>.corrupt`, reported, and treated as empty; the
    /// original is replaced on the next save.
    pub fn load(&self) -> Result<Catalog, StoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no products file yet");
            return Ok(Catalog::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| self.io_error("read", source))?;

        match decode(&raw) {
            Ok(catalog) => {
                tracing::debug!(path = %self.path.display(), products = catalog.len(), "loaded products");
                Ok(catalog)
            }
            Err(err) => {
                let backup = self.sibling("corrupt");
                match fs::copy(&self.path, &backup) {
                    Ok(_) => tracing::warn!(
                        path = %self.path.display(),
                        backup = %backup.display(),
                        %err,
                        "products file is corrupted, starting fresh"
                    ),
                    Err(copy_err) => tracing::warn!(
                        path = %self.path.display(),
                        %err,
                        %copy_err,
                        "products file is corrupted and could not be backed up, starting fresh"
                    ),
                }
                Ok(Catalog::new())
            }
        }
    }

    /// Write the catalog, replacing the file atomically.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let mut map = Map::new();
        for product in catalog.iter() {
            let value = serde_json::to_value(product).map_err(StoreError::Encode)?;
            map.insert(product.name.clone(), value);
        }
        let mut body = serde_json::to_string_pretty(&map).map_err(StoreError::Encode)?;
        body.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error("create directory for", source))?;
        }

        let tmp = self.sibling("tmp");
        fs::write(&tmp, body).map_err(|source| self.io_error("write", source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error("replace", source))?;

        tracing::debug!(path = %self.path.display(), products = catalog.len(), "saved products");
        Ok(())
    }

    /// `<file>.<suffix>` next to the products file.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(&self, action: &'static str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            action,
            path: self.path.display().to_string(),
            source,
        }
    }
}

fn decode(raw: &str) -> Result<Catalog, serde_json::Error> {
    let map: Map<String, Value> = serde_json::from_str(raw)?;
    let mut catalog = Catalog::new();
    for (key, value) in map {
        let mut product: Product = serde_json::from_value(value)?;
        if product.name != key {
            tracing::warn!(key = %key, name = %product.name, "product name differs from its key, using the key");
            product.name = key;
        }
        catalog.products.push(product);
    }
    Ok(catalog)
}
