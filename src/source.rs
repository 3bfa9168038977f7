//! External data-access collaborator interface.

use crate::error::Result;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Data-access collaborator supplying the engine's inputs.
///
/// Implementations query whatever store holds sales and stock data; the
/// engine never performs I/O itself, so all retrieval (and any caching or
/// retrying) happens behind this trait before the numeric work starts.
/// Historical rows must combine completed-sale line items with non-sale
/// outbound movements and exclude pending or cancelled transactions.
pub trait DemandSource {
    /// Daily (date, quantity) pairs for the lookback window. Order and
    /// duplicate dates are tolerated; preprocessing normalizes both.
    fn historical_demand(
        &self,
        product_id: &str,
        store_id: Option<&str>,
        lookback_days: u32,
    ) -> Result<Vec<(NaiveDate, f64)>>;

    /// Current stock for the product, summed across stores when
    /// `store_id` is `None`.
    fn current_stock(&self, product_id: &str, store_id: Option<&str>) -> Result<i64>;

    /// Units available from a secondary supply source (e.g. a central
    /// warehouse). Only consulted to enrich recommendation text; never
    /// part of the numeric contract.
    fn alternate_supply(&self, _product_id: &str) -> Result<Option<i64>> {
        Ok(None)
    }
}

/// In-memory [`DemandSource`] for tests and demos.
///
/// Holds fixture rows verbatim; the lookback window is assumed to have
/// been applied when the fixtures were built.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    demand: HashMap<(String, Option<String>), Vec<(NaiveDate, f64)>>,
    stock: HashMap<(String, Option<String>), i64>,
    alternate: HashMap<String, i64>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add demand history for a (product, store) pair.
    pub fn with_demand(
        mut self,
        product_id: &str,
        store_id: Option<&str>,
        rows: Vec<(NaiveDate, f64)>,
    ) -> Self {
        self.demand
            .insert((product_id.to_string(), store_id.map(String::from)), rows);
        self
    }

    /// Set current stock for a (product, store) pair.
    pub fn with_stock(mut self, product_id: &str, store_id: Option<&str>, stock: i64) -> Self {
        self.stock
            .insert((product_id.to_string(), store_id.map(String::from)), stock);
        self
    }

    /// Set secondary-supply units for a product.
    pub fn with_alternate(mut self, product_id: &str, units: i64) -> Self {
        self.alternate.insert(product_id.to_string(), units);
        self
    }
}

impl DemandSource for MemorySource {
    fn historical_demand(
        &self,
        product_id: &str,
        store_id: Option<&str>,
        _lookback_days: u32,
    ) -> Result<Vec<(NaiveDate, f64)>> {
        Ok(self
            .demand
            .get(&(product_id.to_string(), store_id.map(String::from)))
            .cloned()
            .unwrap_or_default())
    }

    fn current_stock(&self, product_id: &str, store_id: Option<&str>) -> Result<i64> {
        Ok(self
            .stock
            .get(&(product_id.to_string(), store_id.map(String::from)))
            .copied()
            .unwrap_or(0))
    }

    fn alternate_supply(&self, product_id: &str) -> Result<Option<i64>> {
        Ok(self.alternate.get(product_id).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn memory_source_returns_fixtures() {
        let source = MemorySource::new()
            .with_demand("p1", None, vec![(date(2024, 1, 1), 3.0)])
            .with_stock("p1", None, 17)
            .with_alternate("p1", 40);

        assert_eq!(
            source.historical_demand("p1", None, 90).unwrap(),
            vec![(date(2024, 1, 1), 3.0)]
        );
        assert_eq!(source.current_stock("p1", None).unwrap(), 17);
        assert_eq!(source.alternate_supply("p1").unwrap(), Some(40));
    }

    #[test]
    fn unknown_products_read_as_empty() {
        let source = MemorySource::new();
        assert!(source.historical_demand("p9", None, 90).unwrap().is_empty());
        assert_eq!(source.current_stock("p9", None).unwrap(), 0);
        assert_eq!(source.alternate_supply("p9").unwrap(), None);
    }

    #[test]
    fn store_scoping_is_part_of_the_key() {
        let source = MemorySource::new()
            .with_stock("p1", Some("s1"), 5)
            .with_stock("p1", None, 25);

        assert_eq!(source.current_stock("p1", Some("s1")).unwrap(), 5);
        assert_eq!(source.current_stock("p1", None).unwrap(), 25);
        assert_eq!(source.current_stock("p1", Some("s2")).unwrap(), 0);
    }
}
