use serde::{Deserialize, Serialize};

use crate::catalog::find_meal;
use crate::models::{CartLine, CartRow, MealRecord, Totals};

/// Ordered cart rows, unique by meal id, every quantity at least 1.
///
/// Serializes as a bare array of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartRow>", into = "Vec<CartRow>")]
pub struct Cart {
    rows: Vec<CartRow>,
}

impl From<Vec<CartRow>> for Cart {
    /// Drops rows with a zero quantity and folds repeated ids into the first
    /// occurrence, so a hand-edited store cannot break the row invariants.
    fn from(raw: Vec<CartRow>) -> Self {
        let mut cart = Cart::default();
        for row in raw.into_iter().filter(|r| r.qty > 0) {
            match cart.rows.iter_mut().find(|r| r.id == row.id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(row.qty),
                None => cart.rows.push(row),
            }
        }
        cart
    }
}

impl From<Cart> for Vec<CartRow> {
    fn from(cart: Cart) -> Self {
        cart.rows
    }
}

impl Cart {
    #[must_use]
    pub fn rows(&self) -> &[CartRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn qty_of(&self, id: u32) -> Option<u32> {
        self.rows.iter().find(|r| r.id == id).map(|r| r.qty)
    }

    /// Increment an existing row or append a new one. The id is not checked
    /// against the catalog.
    pub fn add(&mut self, id: u32) {
        match self.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => row.qty = row.qty.saturating_add(1),
            None => self.rows.push(CartRow { id, qty: 1 }),
        }
    }

    /// Shift a row's quantity by `delta`, removing it once it reaches zero.
    /// Returns `false` when no row has this id.
    pub fn update_qty(&mut self, id: u32, delta: i64) -> bool {
        let Some(pos) = self.rows.iter().position(|r| r.id == id) else {
            return false;
        };
        let next = i64::from(self.rows[pos].qty).saturating_add(delta);
        if next <= 0 {
            self.rows.remove(pos);
        } else {
            self.rows[pos].qty = u32::try_from(next).unwrap_or(u32::MAX);
        }
        true
    }

    /// Returns `false` when no row has this id.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Item count, price and calories over every row that resolves in the
    /// catalog. Unknown ids contribute nothing.
    #[must_use]
    pub fn totals(&self, catalog: &[MealRecord]) -> Totals {
        self.rows
            .iter()
            .filter_map(|row| find_meal(catalog, row.id).map(|meal| (row.qty, meal)))
            .fold(Totals::default(), |mut acc, (qty, meal)| {
                acc.items += u64::from(qty);
                acc.price += meal.price * f64::from(qty);
                acc.calories += u64::from(meal.calories) * u64::from(qty);
                acc
            })
    }

    #[must_use]
    pub fn lines(&self, catalog: &[MealRecord]) -> Vec<CartLine> {
        self.rows
            .iter()
            .filter_map(|row| {
                let meal = find_meal(catalog, row.id)?;
                Some(CartLine {
                    id: row.id,
                    name: meal.name.clone(),
                    qty: row.qty,
                    unit_price: meal.price,
                    line_price: meal.price * f64::from(row.qty),
                    line_calories: u64::from(meal.calories) * u64::from(row.qty),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn test_add_appends_then_increments() {
        let mut cart = Cart::default();
        cart.add(2);
        cart.add(5);
        cart.add(2);
        assert_eq!(
            cart.rows(),
            &[CartRow { id: 2, qty: 2 }, CartRow { id: 5, qty: 1 }]
        );
    }

    #[test]
    fn test_add_unknown_id_is_allowed() {
        let mut cart = Cart::default();
        cart.add(404);
        assert_eq!(cart.qty_of(404), Some(1));
    }

    #[test]
    fn test_update_qty_increase_and_decrease() {
        let mut cart = Cart::default();
        cart.add(1);
        assert!(cart.update_qty(1, 1));
        assert_eq!(cart.qty_of(1), Some(2));
        assert!(cart.update_qty(1, -1));
        assert_eq!(cart.qty_of(1), Some(1));
    }

    #[test]
    fn test_update_qty_to_zero_removes_row() {
        let mut cart = Cart::default();
        cart.add(3);
        cart.add(3);
        cart.add(3);
        let qty = i64::from(cart.qty_of(3).unwrap());
        assert!(cart.update_qty(3, -qty));
        assert_eq!(cart.qty_of(3), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_qty_below_zero_removes_row() {
        let mut cart = Cart::default();
        cart.add(3);
        assert!(cart.update_qty(3, -10));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_qty_missing_is_noop() {
        let mut cart = Cart::default();
        cart.add(1);
        let before = cart.clone();
        assert!(!cart.update_qty(7, 1));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_twice_is_same_as_once() {
        let mut cart = Cart::default();
        cart.add(1);
        cart.add(2);
        assert!(cart.remove(1));
        let once = cart.clone();
        assert!(!cart.remove(1));
        assert_eq!(cart, once);
        assert_eq!(cart.rows(), &[CartRow { id: 2, qty: 1 }]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::default();
        cart.add(1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_empty() {
        let totals = Cart::default().totals(&default_catalog());
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_totals_sum_resolved_rows_only() {
        let catalog = default_catalog();
        let mut cart = Cart::default();
        cart.add(1); // 10.99, 520 kcal
        cart.add(6); // 6.89, 500 kcal
        cart.add(6);
        cart.add(999);
        cart.add(999);

        let totals = cart.totals(&catalog);
        assert_eq!(totals.items, 3);
        assert_eq!(totals.calories, 520 + 2 * 500);
        let expected: f64 = cart
            .rows()
            .iter()
            .filter_map(|r| find_meal(&catalog, r.id).map(|m| m.price * f64::from(r.qty)))
            .sum();
        assert!((totals.price - expected).abs() < 1e-9);
        assert!((totals.price - 24.77).abs() < 1e-9);
    }

    #[test]
    fn test_lines_skip_unknown_ids() {
        let catalog = default_catalog();
        let mut cart = Cart::default();
        cart.add(999);
        cart.add(4);
        cart.add(4);
        let lines = cart.lines(&catalog);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Chicken Quinoa Box");
        assert_eq!(lines[0].qty, 2);
        assert!((lines[0].line_price - 22.98).abs() < 1e-9);
        assert_eq!(lines[0].line_calories, 1240);
    }

    #[test]
    fn test_json_is_plain_row_array() {
        let mut cart = Cart::default();
        cart.add(8);
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"id":8,"qty":1}]"#);
    }

    #[test]
    fn test_deserialize_normalizes_rows() {
        let cart: Cart =
            serde_json::from_str(r#"[{"id":1,"qty":2},{"id":2,"qty":0},{"id":1,"qty":3}]"#)
                .unwrap();
        assert_eq!(cart.rows(), &[CartRow { id: 1, qty: 5 }]);
    }

    #[test]
    fn test_totals_with_huge_stored_quantities() {
        let catalog = default_catalog();
        let cart: Cart =
            serde_json::from_str(r#"[{"id":1,"qty":4294967295},{"id":2,"qty":1}]"#).unwrap();

        let totals = cart.totals(&catalog);
        assert_eq!(totals.items, u64::from(u32::MAX) + 1);
        assert_eq!(totals.calories, 520 * u64::from(u32::MAX) + 340);

        let lines = cart.lines(&catalog);
        assert_eq!(lines[0].line_calories, 520 * u64::from(u32::MAX));
        assert_eq!(lines[1].line_calories, 340);
    }

    #[test]
    fn test_saturated_quantity_still_counts_as_items() {
        let mut cart = Cart::from(vec![CartRow { id: 4, qty: u32::MAX }]);
        cart.add(4);
        assert_eq!(cart.qty_of(4), Some(u32::MAX));
        let totals = cart.totals(&default_catalog());
        assert_eq!(totals.items, u64::from(u32::MAX));
        assert_eq!(totals.calories, 620 * u64::from(u32::MAX));
    }
}
