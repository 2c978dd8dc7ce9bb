// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The menu catalog.
//!
//! The catalog is defined once at process start and never mutated
//! afterwards. Availability is tracked separately so that toggling an
//! item never touches the catalog itself.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Menu category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Rice meal combos
    Budget,
    /// A la carte dishes
    Food,
    /// Beverages
    Drink,
}

impl Category {
    /// All categories in menu display order.
    pub const ALL: [Self; 3] = [Self::Budget, Self::Food, Self::Drink];

    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Food => "food",
            Self::Drink => "drink",
        }
    }

    /// Returns the heading shown for this category on the menu.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Budget Meals",
            Self::Food => "Foods",
            Self::Drink => "Drinks",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "budget" => Ok(Self::Budget),
            "food" | "foods" => Ok(Self::Food),
            "drink" | "drinks" => Ok(Self::Drink),
            _ => Err(DomainError::InvalidCatalog(format!(
                "unknown category '{s}'"
            ))),
        }
    }
}

/// A purchasable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    id: String,
    name: String,
    price: Decimal,
    category: Category,
}

impl CatalogItem {
    /// Creates a new catalog item.
    ///
    /// # Arguments
    ///
    /// * `id` - Stable unique identifier (e.g. `f8`)
    /// * `name` - Display name
    /// * `price` - Unit price
    /// * `category` - Menu category
    #[must_use]
    pub fn new(id: &str, name: &str, price: Decimal, category: Category) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            category,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }
}

/// The immutable set of items on offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog from a list of items, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCatalog` if an id or name is blank,
    /// an id appears twice, or a price is negative.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, DomainError> {
        let mut seen: HashSet<&str> = HashSet::new();
        for item in &items {
            if item.id.trim().is_empty() {
                return Err(DomainError::InvalidCatalog(String::from(
                    "item id cannot be empty",
                )));
            }
            if item.name.trim().is_empty() {
                return Err(DomainError::InvalidCatalog(format!(
                    "item '{}' has an empty name",
                    item.id
                )));
            }
            if item.price.is_sign_negative() {
                return Err(DomainError::InvalidCatalog(format!(
                    "item '{}' has a negative price",
                    item.id
                )));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }

        Ok(Self { items })
    }

    /// Parses a catalog from a JSON array of items.
    ///
    /// Prices may be given as strings or numbers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCatalog` if the JSON is malformed or
    /// fails catalog validation.
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let items: Vec<CatalogItem> = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidCatalog(e.to_string()))?;
        Self::new(items)
    }

    /// The built-in canteen menu.
    #[must_use]
    pub fn default_menu() -> Self {
        let entries: [(&str, &str, i64, Category); 18] = [
            ("s1", "Budget Meal A (Fried Chicken + Rice)", 50, Category::Budget),
            ("s2", "Budget Meal B (Pork Adobo + Rice)", 50, Category::Budget),
            ("s3", "Budget Meal C (Burger Steak + Rice)", 50, Category::Budget),
            ("s4", "Budget Meal D (Hotdog + Egg + Rice)", 45, Category::Budget),
            ("f1", "Sisig", 70, Category::Food),
            ("f2", "Dinakdakan", 75, Category::Food),
            ("f3", "Pork Adobo", 65, Category::Food),
            ("f4", "Beef Caldereta", 80, Category::Food),
            ("f5", "Carbonara", 70, Category::Food),
            ("f6", "Spaghetti", 60, Category::Food),
            ("f7", "Palabok", 60, Category::Food),
            ("f8", "Fried Rice", 20, Category::Food),
            ("d1", "Coke", 25, Category::Drink),
            ("d2", "Sprite", 25, Category::Drink),
            ("d3", "Royal", 25, Category::Drink),
            ("d4", "Bottled Water", 15, Category::Drink),
            ("d5", "C2 Green Tea", 20, Category::Drink),
            ("d6", "Iced Coffee", 35, Category::Drink),
        ];

        Self {
            items: entries
                .iter()
                .map(|(id, name, price, category)| {
                    CatalogItem::new(id, name, Decimal::from(*price), *category)
                })
                .collect(),
        }
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Looks up an item by id, failing if it is not on the menu.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ItemNotFound` if no item has this id.
    pub fn lookup(&self, item_id: &str) -> Result<&CatalogItem, DomainError> {
        self.get(item_id).ok_or_else(|| DomainError::ItemNotFound {
            item_id: item_id.to_string(),
        })
    }

    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.get(item_id).is_some()
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items in one category, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CatalogItem> {
        self.items
            .iter()
            .filter(move |item| item.category == category)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_menu()
    }
}
