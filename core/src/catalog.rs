use crate::models::{Goal, MealRecord, MealType};

fn meal(
    id: u32,
    name: &str,
    (calories, protein, carbs, fat): (u32, u32, u32, u32),
    price: f64,
    meal_type: MealType,
    goals: &[Goal],
) -> MealRecord {
    MealRecord {
        id,
        name: name.to_string(),
        calories,
        protein,
        carbs,
        fat,
        price,
        meal_type,
        goals: goals.to_vec(),
    }
}

/// The fixed menu every session starts with.
#[must_use]
pub fn default_catalog() -> Vec<MealRecord> {
    use Goal::{Maintenance, MuscleGain, WeightLoss};
    use MealType::{Drink, NonVeg, Veg};

    vec![
        meal(1, "Protein Power Bowl", (520, 40, 48, 14), 10.99, NonVeg, &[MuscleGain, Maintenance]),
        meal(2, "Green Detox Salad", (340, 12, 32, 11), 8.49, Veg, &[WeightLoss, Maintenance]),
        meal(3, "Balanced Veggie Plate", (430, 20, 45, 14), 9.29, Veg, &[Maintenance, WeightLoss]),
        meal(4, "Chicken Quinoa Box", (620, 48, 52, 20), 11.49, NonVeg, &[MuscleGain, Maintenance]),
        meal(5, "Overnight Oats Combo", (390, 14, 57, 12), 7.99, Veg, &[WeightLoss, Maintenance]),
        meal(6, "Peanut Banana Smoothie", (500, 22, 53, 20), 6.89, Drink, &[MuscleGain]),
        meal(7, "Tofu Teriyaki Bowl", (470, 27, 51, 16), 10.29, Veg, &[Maintenance, MuscleGain]),
        meal(8, "Lean Wrap Combo", (410, 29, 42, 11), 9.79, NonVeg, &[WeightLoss, Maintenance]),
    ]
}

#[must_use]
pub fn find_meal(catalog: &[MealRecord], id: u32) -> Option<&MealRecord> {
    catalog.iter().find(|m| m.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_catalog_has_unique_ids() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 8);
        let ids: HashSet<u32> = catalog.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(catalog.iter().all(|m| m.id > 0 && m.price >= 0.0));
    }

    #[test]
    fn test_find_meal() {
        let catalog = default_catalog();
        assert_eq!(find_meal(&catalog, 6).unwrap().name, "Peanut Banana Smoothie");
        assert!(find_meal(&catalog, 99).is_none());
    }

    #[test]
    fn test_every_meal_supports_a_goal() {
        assert!(default_catalog().iter().all(|m| !m.goals.is_empty()));
    }
}
