// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-scoped shopping cart.
//!
//! A cart is an ordered list of lines, unique by item id. Re-adding an
//! item merges into the existing line. Name and price are copied from the
//! catalog when a line is first created.

use crate::availability::AvailabilitySet;
use crate::catalog::{Catalog, CatalogItem};
use crate::error::DomainError;
use rust_decimal::Decimal;

/// Flat surcharge added to every order.
pub const DELIVERY_FEE: Decimal = Decimal::TEN;

/// Largest quantity a single cart line may hold.
pub const MAX_QUANTITY: u32 = i32::MAX.unsigned_abs();

/// One item in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    item_id: String,
    name: String,
    price: Decimal,
    quantity: u32,
}

impl CartLine {
    /// Creates a cart line.
    ///
    /// # Arguments
    ///
    /// * `item_id` - The catalog item id
    /// * `name` - Item name at the time it was added
    /// * `price` - Unit price at the time it was added
    /// * `quantity` - Number of units (at least 1)
    #[must_use]
    pub fn new(item_id: &str, name: &str, price: Decimal, quantity: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            name: name.to_string(),
            price,
            quantity,
        }
    }

    fn from_catalog(item: &CatalogItem, quantity: u32) -> Self {
        Self::new(item.id(), item.name(), item.price(), quantity)
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
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
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The staging collection of items a customer intends to order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuilds a cart from stored lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// Adds units of an item, merging with an existing line.
    ///
    /// # Arguments
    ///
    /// * `catalog` - The menu to resolve the item against
    /// * `availability` - Current sold out state
    /// * `item_id` - The item to add
    /// * `quantity` - Units to add (must be positive)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The quantity is zero or the merged quantity exceeds `MAX_QUANTITY`
    /// - The item is not in the catalog
    /// - The item is sold out
    pub fn add(
        &mut self,
        catalog: &Catalog,
        availability: &AvailabilitySet,
        item_id: &str,
        quantity: u32,
    ) -> Result<(), DomainError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity(String::from(
                "Quantity must be at least 1",
            )));
        }

        let item: &CatalogItem = catalog.lookup(item_id)?;

        if availability.is_sold_out(item_id) {
            return Err(DomainError::SoldOut {
                item_id: item_id.to_string(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .filter(|merged| *merged <= MAX_QUANTITY)
                .ok_or_else(|| {
                    DomainError::InvalidQuantity(format!(
                        "Quantity cannot exceed {MAX_QUANTITY}"
                    ))
                })?;
        } else {
            if quantity > MAX_QUANTITY {
                return Err(DomainError::InvalidQuantity(format!(
                    "Quantity cannot exceed {MAX_QUANTITY}, got {quantity}"
                )));
            }
            self.lines.push(CartLine::from_catalog(item, quantity));
        }

        Ok(())
    }

    /// Sets the quantity of a line.
    ///
    /// A quantity of zero or less removes the line. Setting the quantity of
    /// an item that is not in the cart does nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuantity` if the quantity exceeds
    /// `MAX_QUANTITY`.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> Result<(), DomainError> {
        if quantity <= 0 {
            self.remove(item_id);
            return Ok(());
        }

        let quantity: u32 = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_QUANTITY)
            .ok_or_else(|| {
                DomainError::InvalidQuantity(format!(
                    "Quantity cannot exceed {MAX_QUANTITY}, got {quantity}"
                ))
            })?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity;
        }

        Ok(())
    }

    /// Removes a line. Returns `true` if a line was removed.
    pub fn remove(&mut self, item_id: &str) -> bool {
        let before: usize = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal plus the delivery fee.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.subtotal() + DELIVERY_FEE
    }

    /// Ids of lines whose item is currently sold out, in cart order.
    #[must_use]
    pub fn sold_out_items(&self, availability: &AvailabilitySet) -> Vec<String> {
        self.lines
            .iter()
            .filter(|l| availability.is_sold_out(&l.item_id))
            .map(|l| l.item_id.clone())
            .collect()
    }

    #[must_use]
    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
