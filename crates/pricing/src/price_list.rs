use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use galleria_core::{
    DomainError, DomainResult, MaterialId, Money, PriceListId, Searchable, ValidityWindow,
};

/// A price list entry as returned by `GET /PriceList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    pub id: PriceListId,
    #[serde(rename = "materialID")]
    pub material_id: MaterialId,
    #[serde(rename = "materialName", default)]
    pub material_name: Option<String>,
    #[serde(flatten)]
    pub window: ValidityWindow,
    #[serde(rename = "buyPrice")]
    pub buy_price: Money,
    #[serde(rename = "sellPrice")]
    pub sell_price: Money,
}

impl PriceList {
    /// Whether this entry applies on `today` (both window ends inclusive).
    pub fn is_effective_on(&self, today: NaiveDate) -> bool {
        self.window.contains(today)
    }

    /// Sell price minus buy price; `None` when the stored prices are too far
    /// apart to subtract.
    pub fn margin(&self) -> Option<Money> {
        self.sell_price.checked_sub(self.buy_price)
    }

    /// Checks run before `PUT /PriceList/{id}`.
    pub fn validate(&self) -> DomainResult<()> {
        validate_prices(self.buy_price, self.sell_price)?;
        self.window.validate()
    }
}

impl Searchable for PriceList {
    fn search_key(&self) -> &str {
        self.material_name.as_deref().unwrap_or_default()
    }
}

/// Body of `POST /PriceList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPriceList {
    #[serde(rename = "materialID")]
    pub material_id: MaterialId,
    #[serde(flatten)]
    pub window: ValidityWindow,
    #[serde(rename = "buyPrice")]
    pub buy_price: Money,
    #[serde(rename = "sellPrice")]
    pub sell_price: Money,
}

impl NewPriceList {
    pub fn validate(&self) -> DomainResult<()> {
        if self.material_id.get() <= 0 {
            return Err(DomainError::validation("a material must be selected"));
        }
        validate_prices(self.buy_price, self.sell_price)?;
        self.window.validate()
    }
}

/// The entry pricing `material` on `today`.
///
/// When windows overlap, the one that started most recently wins.
pub fn effective_for(
    lists: &[PriceList],
    material: MaterialId,
    today: NaiveDate,
) -> Option<&PriceList> {
    lists
        .iter()
        .filter(|p| p.material_id == material && p.is_effective_on(today))
        .max_by_key(|p| (p.window.valid_from, p.id))
}

fn validate_prices(buy: Money, sell: Money) -> DomainResult<()> {
    if buy.is_negative() {
        return Err(DomainError::validation("buy price cannot be negative"));
    }
    if sell.is_negative() {
        return Err(DomainError::validation("sell price cannot be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn entry(id: i64, material: i64, from: NaiveDate, to: NaiveDate, sell: i64) -> PriceList {
        PriceList {
            id: PriceListId::new(id),
            material_id: MaterialId::new(material),
            material_name: Some(format!("Material {material}")),
            window: ValidityWindow::new(from, to).unwrap(),
            buy_price: Money::from_minor(100),
            sell_price: Money::from_minor(sell),
        }
    }

    #[test]
    fn decodes_backend_listing() {
        let json = serde_json::json!({
            "id": 9,
            "materialID": 3,
            "materialName": "Rug",
            "validFrom": "2025-01-01T00:00:00",
            "validTo": "2025-12-31T00:00:00",
            "buyPrice": 10,
            "sellPrice": 14.25
        });
        let p: PriceList = serde_json::from_value(json).unwrap();
        assert_eq!(p.material_id, MaterialId::new(3));
        assert_eq!(p.sell_price, Money::from_minor(1425));
        assert_eq!(p.margin(), Some(Money::from_minor(425)));
    }

    #[test]
    fn new_price_list_body_uses_backend_names() {
        let new = NewPriceList {
            material_id: MaterialId::new(3),
            window: ValidityWindow::new(d(2025, 1, 1), d(2025, 6, 30)).unwrap(),
            buy_price: Money::from_minor(1000),
            sell_price: Money::from_minor(1500),
        };
        assert_eq!(
            serde_json::to_value(&new).unwrap(),
            serde_json::json!({
                "materialID": 3,
                "validFrom": "2025-01-01",
                "validTo": "2025-06-30",
                "buyPrice": 10.0,
                "sellPrice": 15.0
            })
        );
    }

    #[test]
    fn effectiveness_is_inclusive() {
        let p = entry(1, 3, d(2025, 1, 1), d(2025, 1, 31), 500);
        assert!(p.is_effective_on(d(2025, 1, 1)));
        assert!(p.is_effective_on(d(2025, 1, 31)));
        assert!(!p.is_effective_on(d(2025, 2, 1)));
    }

    #[test]
    fn latest_starting_entry_wins() {
        let lists = vec![
            entry(1, 3, d(2025, 1, 1), d(2025, 12, 31), 500),
            entry(2, 3, d(2025, 6, 1), d(2025, 6, 30), 450),
            entry(3, 4, d(2025, 1, 1), d(2025, 12, 31), 900),
        ];
        let june = effective_for(&lists, MaterialId::new(3), d(2025, 6, 15)).unwrap();
        assert_eq!(june.id, PriceListId::new(2));

        let july = effective_for(&lists, MaterialId::new(3), d(2025, 7, 1)).unwrap();
        assert_eq!(july.id, PriceListId::new(1));

        assert!(effective_for(&lists, MaterialId::new(5), d(2025, 7, 1)).is_none());
    }

    #[test]
    fn validation_requires_material_and_non_negative_prices() {
        let mut new = NewPriceList {
            material_id: MaterialId::new(0),
            window: ValidityWindow::new(d(2025, 1, 1), d(2025, 1, 2)).unwrap(),
            buy_price: Money::ZERO,
            sell_price: Money::ZERO,
        };
        assert!(new.validate().is_err());

        new.material_id = MaterialId::new(1);
        assert!(new.validate().is_ok());

        new.buy_price = Money::from_minor(-5);
        assert!(new.validate().is_err());
    }

    #[test]
    fn margin_of_extreme_backend_prices_is_none() {
        let p: PriceList = serde_json::from_value(serde_json::json!({
            "id": 1,
            "materialID": 3,
            "validFrom": "2025-01-01",
            "validTo": "2025-12-31",
            "buyPrice": -9e16,
            "sellPrice": 9e16
        }))
        .unwrap();
        assert_eq!(p.margin(), None);
    }

    #[test]
    fn search_uses_material_name() {
        let p = entry(1, 3, d(2025, 1, 1), d(2025, 1, 2), 1);
        assert!(p.matches("material 3"));
        let unnamed = PriceList {
            material_name: None,
            ..p
        };
        assert!(!unnamed.matches("material"));
    }
}
