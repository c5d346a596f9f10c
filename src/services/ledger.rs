//! Cost and profit arithmetic for livestock records
//!
//! All money values are `Decimal`. Derived totals are rounded to cents,
//! midpoint away from zero.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RanchError;
use crate::models::application::ApplicationEvent;
use crate::models::livestock::{Livestock, Sale};

/// Largest derived total a `decimal(16,2)` column holds
pub const MAX_TOTAL: Decimal = dec!(99999999999999.99);

/// Round a money amount to two decimal places
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// weight * unit price, rounded; rejected against `field` when out of range
fn checked_total(field: &str, weight: Decimal, unit_price: Decimal) -> Result<Decimal, RanchError> {
    weight
        .checked_mul(unit_price)
        .map(round_money)
        .filter(|total| *total <= MAX_TOTAL)
        .ok_or_else(|| RanchError::field(field, format!("cannot exceed {}", MAX_TOTAL)))
}

/// entry_weight * purchase_unit_price
pub fn purchase_total(entry_weight: Decimal, purchase_unit_price: Decimal) -> Result<Decimal, RanchError> {
    checked_total("purchase_total", entry_weight, purchase_unit_price)
}

/// Build the sale block with its derived total
pub fn sale(exit_weight: Decimal, unit_price: Decimal, date: chrono::NaiveDate) -> Result<Sale, RanchError> {
    Ok(Sale {
        exit_weight,
        unit_price,
        total: checked_total("sale_total", exit_weight, unit_price)?,
        date,
    })
}

/// Sum of the costs of the events that carry one
pub fn applications_cost(events: &[ApplicationEvent]) -> Decimal {
    events.iter().filter_map(|event| event.cost).sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    pub purchase_total: Decimal,
    pub sale_total: Option<Decimal>,
    pub applications_cost: Decimal,
    /// purchase_total + applications_cost
    pub total_cost: Decimal,
    /// sale_total - total_cost, only for sold animals
    pub profit: Option<Decimal>,
}

impl CostSummary {
    pub fn compute(livestock: &Livestock, events: &[ApplicationEvent]) -> Self {
        let purchase_total = livestock.purchase_total;
        let applications_cost = round_money(applications_cost(events));
        let total_cost = purchase_total + applications_cost;
        let sale_total = livestock.sale.as_ref().map(|sale| sale.total);
        let profit = sale_total.map(|total| total - total_cost);

        tracing::debug!(
            livestock_id = livestock.id,
            %purchase_total,
            %applications_cost,
            ?profit,
            "Computed cost summary"
        );

        Self {
            purchase_total,
            sale_total,
            applications_cost,
            total_cost,
            profit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn animal(sale: Option<Sale>) -> Livestock {
        let created = date(2025, 1, 10).and_hms_opt(8, 0, 0).unwrap();
        Livestock {
            id: 7,
            tag: "A-100".to_string(),
            lot_id: Some(1),
            entry_weight: dec!(450.50),
            purchase_unit_price: dec!(25.50),
            purchase_total: purchase_total(dec!(450.50), dec!(25.50)).unwrap(),
            purchase_date: date(2025, 1, 10),
            sale,
            image_url: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn event(id: i32, cost: Option<Decimal>) -> ApplicationEvent {
        ApplicationEvent {
            id,
            livestock_id: 7,
            product_id: 1,
            product_name: "Ivermectina".to_string(),
            quantity: "5 ml".to_string(),
            cost,
            reason: None,
            applied_on: date(2025, 2, 1),
            created_at: date(2025, 2, 1).and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_purchase_total_example() {
        assert_eq!(purchase_total(dec!(450.50), dec!(25.50)), Ok(dec!(11487.75)));
    }

    #[test]
    fn test_purchase_total_rounds_to_cents() {
        // 100.33 * 1.15 = 115.3795
        assert_eq!(purchase_total(dec!(100.33), dec!(1.15)), Ok(dec!(115.38)));
        // 0.5 cent midpoint rounds away from zero
        assert_eq!(round_money(dec!(2.005)), dec!(2.01));
    }

    #[test]
    fn test_sale_total() {
        let sold = sale(dec!(500), dec!(30), date(2025, 6, 1)).unwrap();
        assert_eq!(sold.total, dec!(15000.00));
    }

    #[test]
    fn test_totals_out_of_range_are_rejected() {
        // largest representable Decimal times two overflows the multiplication itself
        match purchase_total(Decimal::MAX, dec!(2)) {
            Err(RanchError::Validation(fields)) => assert_eq!(fields[0].field, "purchase_total"),
            other => panic!("expected validation error, got {:?}", other),
        }

        // fits in a Decimal but not in the stored column
        match sale(dec!(9999999999.99), dec!(9999999999.99), date(2025, 6, 1)) {
            Err(RanchError::Validation(fields)) => assert_eq!(fields[0].field, "sale_total"),
            other => panic!("expected validation error, got {:?}", other),
        }

        assert_eq!(purchase_total(dec!(9999999.99), dec!(9999999.99)), Ok(dec!(99999999800000.00)));
    }

    #[test]
    fn test_applications_cost_skips_missing_costs() {
        let events = vec![
            event(1, Some(dec!(12.50))),
            event(2, None),
            event(3, Some(dec!(7.25))),
        ];
        assert_eq!(applications_cost(&events), dec!(19.75));
        assert_eq!(applications_cost(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_summary_active_has_no_profit() {
        let summary = CostSummary::compute(&animal(None), &[event(1, Some(dec!(10)))]);

        assert_eq!(summary.purchase_total, dec!(11487.75));
        assert_eq!(summary.applications_cost, dec!(10));
        assert_eq!(summary.total_cost, dec!(11497.75));
        assert_eq!(summary.sale_total, None);
        assert_eq!(summary.profit, None);
    }

    #[test]
    fn test_summary_sold_profit() {
        let sold = animal(Some(sale(dec!(520.00), dec!(28.00), date(2025, 6, 1)).unwrap()));
        let events = vec![event(1, Some(dec!(12.50))), event(2, Some(dec!(30.00))), event(3, None)];

        let summary = CostSummary::compute(&sold, &events);

        assert_eq!(summary.sale_total, Some(dec!(14560.00)));
        assert_eq!(summary.total_cost, dec!(11530.25));
        // 14560.00 - (11487.75 + 42.50)
        assert_eq!(summary.profit, Some(dec!(3029.75)));
    }

    #[test]
    fn test_summary_sold_at_a_loss() {
        let sold = animal(Some(sale(dec!(440), dec!(25), date(2025, 3, 1)).unwrap()));
        let summary = CostSummary::compute(&sold, &[]);

        assert_eq!(summary.profit, Some(dec!(-487.75)));
    }
}
