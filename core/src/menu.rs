use std::str::FromStr;

use serde::Serialize;

use crate::error::{EatFitError, EatFitResult};
use crate::models::{Goal, MealRecord, MealType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(MealType),
}

impl FromStr for TypeFilter {
    type Err = EatFitError;

    fn from_str(s: &str) -> EatFitResult<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        s.parse::<MealType>().map(TypeFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default)]
pub struct MenuQuery {
    pub type_filter: TypeFilter,
    pub keyword: String,
    pub sort: SortDirection,
}

/// Narrow the catalog by goal, type, and name keyword, then sort by price.
///
/// The sort is stable, so meals with equal prices keep catalog order.
#[must_use]
pub fn filter_meals<'a>(
    catalog: &'a [MealRecord],
    goal: Option<Goal>,
    query: &MenuQuery,
) -> Vec<&'a MealRecord> {
    let keyword = query.keyword.trim().to_lowercase();

    let mut list: Vec<&MealRecord> = catalog
        .iter()
        .filter(|m| goal.is_none_or(|g| m.supports(g)))
        .filter(|m| match query.type_filter {
            TypeFilter::All => true,
            TypeFilter::Only(t) => m.meal_type == t,
        })
        .filter(|m| keyword.is_empty() || m.name.to_lowercase().contains(&keyword))
        .collect();

    match query.sort {
        SortDirection::Ascending => list.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortDirection::Descending => list.sort_by(|a, b| b.price.total_cmp(&a.price)),
    }
    list
}
