use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use galleria_core::{MaterialId, Money};
use galleria_inventory::Material;

/// Cart line: material, quantity, sell price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub material_id: MaterialId,
    pub name: String,
    pub sell_price: Money,
    pub quantity: i64,
}

impl CartLine {
    pub fn line_total(&self) -> Option<Money> {
        self.sell_price.checked_mul(self.quantity)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("{name} is out of stock")]
    OutOfStock { material_id: MaterialId, name: String },

    #[error("material {0} has no sell price")]
    MissingPrice(MaterialId),

    #[error("material {0} is not in the cart")]
    NotInCart(MaterialId),

    #[error("cart total overflow")]
    Overflow,
}

/// The open sale.
///
/// Invariant: for every material the cart has seen, remaining stock plus the
/// quantity in the cart equals the stock the material had when first added.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    remaining: HashMap<MaterialId, i64>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, material_id: MaterialId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.material_id == material_id)
    }

    /// Stock left on the shelf for a material the cart has seen.
    pub fn remaining_stock(&self, material_id: MaterialId) -> Option<i64> {
        self.remaining.get(&material_id).copied()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Add one unit of `material`.
    ///
    /// The first time a material is seen its listed quantity becomes the
    /// shelf stock; later calls draw from what is left.
    pub fn add(&mut self, material: &Material) -> Result<&CartLine, CartError> {
        let sell_price = material
            .sell_price
            .ok_or(CartError::MissingPrice(material.id))?;

        let remaining = self
            .remaining
            .entry(material.id)
            .or_insert(material.quantity.max(0));
        if *remaining <= 0 {
            return Err(CartError::OutOfStock {
                material_id: material.id,
                name: material.name.clone(),
            });
        }
        *remaining -= 1;

        let idx = match self.lines.iter().position(|l| l.material_id == material.id) {
            Some(idx) => {
                self.lines[idx].quantity += 1;
                idx
            }
            None => {
                self.lines.push(CartLine {
                    material_id: material.id,
                    name: material.name.clone(),
                    sell_price,
                    quantity: 1,
                });
                self.lines.len() - 1
            }
        };

        Ok(&self.lines[idx])
    }

    /// Remove a whole line, returning its units to the shelf.
    pub fn remove(&mut self, material_id: MaterialId) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.material_id == material_id)?;
        let line = self.lines.remove(idx);
        *self.remaining.entry(material_id).or_insert(0) += line.quantity;
        Some(line)
    }

    /// Return one unit to the shelf. Returns the quantity left in the cart;
    /// a line that reaches zero is dropped.
    pub fn decrement(&mut self, material_id: MaterialId) -> Result<i64, CartError> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.material_id == material_id)
            .ok_or(CartError::NotInCart(material_id))?;

        self.lines[idx].quantity -= 1;
        *self.remaining.entry(material_id).or_insert(0) += 1;

        let left = self.lines[idx].quantity;
        if left == 0 {
            self.lines.remove(idx);
        }
        Ok(left)
    }

    /// Σ sell price × quantity.
    pub fn total(&self) -> Result<Money, CartError> {
        self.lines.iter().try_fold(Money::ZERO, |acc, line| {
            line.line_total()
                .and_then(|t| acc.checked_add(t))
                .ok_or(CartError::Overflow)
        })
    }

    /// Empty the cart, returning every unit to the shelf.
    pub fn clear(&mut self) {
        for line in self.lines.drain(..) {
            *self.remaining.entry(line.material_id).or_insert(0) += line.quantity;
        }
    }
}
