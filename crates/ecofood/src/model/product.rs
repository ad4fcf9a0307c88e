//! Products published by companies.
//!
//! Product status is never stored: it is derived from quantity, price and
//! expiry on every read, so the stock-decrement path needs no status write
//! and price/expiry-driven states can never go stale.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::AccountId;

/// Type-safe identifier for products.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(format!("product_{id}"))
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived product state, in evaluation order: stock, then price, then
/// expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "expiring-soon")]
    ExpiringSoon,
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "expired")]
    Expired,
    #[serde(rename = "out-of-stock")]
    OutOfStock,
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProductStatus::Available => "available",
            ProductStatus::ExpiringSoon => "expiring-soon",
            ProductStatus::Free => "free",
            ProductStatus::Expired => "expired",
            ProductStatus::OutOfStock => "out-of-stock",
        };
        write!(f, "{name}")
    }
}

/// Days before expiry at which a product counts as expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub company_id: AccountId,
    pub name: String,
    pub description: String,
    /// Non-negative, at most 2 decimals. Zero marks a donation.
    pub price: Decimal,
    pub quantity: u32,
    pub expiry: Option<NaiveDate>,
}

impl Product {
    /// Derives the status as of `today`.
    ///
    /// Stock wins over price, price over expiry: an exhausted product is
    /// `out-of-stock` no matter how it is priced or dated.
    pub fn status(&self, today: NaiveDate) -> ProductStatus {
        if self.quantity == 0 {
            return ProductStatus::OutOfStock;
        }
        if self.price <= Decimal::ZERO {
            return ProductStatus::Free;
        }
        match self.expiry {
            Some(expiry) if expiry < today => ProductStatus::Expired,
            Some(expiry) if (expiry - today).num_days() <= EXPIRING_SOON_DAYS => {
                ProductStatus::ExpiringSoon
            }
            _ => ProductStatus::Available,
        }
    }

    /// Whether a client may place an order against this product as of
    /// `today`.
    pub fn orderable(&self, today: NaiveDate) -> bool {
        matches!(
            self.status(today),
            ProductStatus::Available | ProductStatus::ExpiringSoon | ProductStatus::Free
        )
    }
}

/// Payload for publishing a product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub company_id: AccountId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub expiry: Option<NaiveDate>,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
    pub expiry: Option<NaiveDate>,
}

/// Field-equality filters over the product store.
#[derive(Debug, Clone)]
pub enum ProductFilter {
    ByCompany(AccountId),
    /// Products a client may order as of the given date.
    Orderable { on: NaiveDate },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(price: i64, quantity: u32, expiry: Option<NaiveDate>) -> Product {
        Product {
            id: ProductId::from(1),
            company_id: AccountId::from(1),
            name: "Pan integral".to_string(),
            description: "Lote del día anterior".to_string(),
            price: Decimal::from(price),
            quantity,
            expiry,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn exhausted_stock_wins_over_everything() {
        let today = day("2024-06-10");
        // Even free and expired products read out-of-stock at quantity 0.
        assert_eq!(
            product(0, 0, Some(day("2024-06-01"))).status(today),
            ProductStatus::OutOfStock
        );
        assert_eq!(product(1500, 0, None).status(today), ProductStatus::OutOfStock);
    }

    #[test]
    fn zero_price_reads_free() {
        let today = day("2024-06-10");
        assert_eq!(product(0, 5, None).status(today), ProductStatus::Free);
        // Price wins over expiry.
        assert_eq!(
            product(0, 5, Some(day("2024-06-01"))).status(today),
            ProductStatus::Free
        );
    }

    #[test]
    fn expiry_window_drives_remaining_states() {
        let today = day("2024-06-10");
        assert_eq!(
            product(1000, 5, Some(day("2024-06-09"))).status(today),
            ProductStatus::Expired
        );
        // Boundary: exactly 3 days out is still expiring-soon.
        assert_eq!(
            product(1000, 5, Some(day("2024-06-13"))).status(today),
            ProductStatus::ExpiringSoon
        );
        assert_eq!(
            product(1000, 5, Some(day("2024-06-14"))).status(today),
            ProductStatus::Available
        );
        assert_eq!(product(1000, 5, None).status(today), ProductStatus::Available);
    }

    #[test]
    fn orderable_excludes_expired_and_exhausted() {
        let today = day("2024-06-10");
        assert!(product(1000, 5, None).orderable(today));
        assert!(product(0, 5, None).orderable(today));
        assert!(product(1000, 5, Some(day("2024-06-12"))).orderable(today));
        assert!(!product(1000, 0, None).orderable(today));
        assert!(!product(1000, 5, Some(day("2024-06-01"))).orderable(today));
    }
}
