use anyhow::{Context, Result};
use std::process;

use eatfit_core::menu::{MenuQuery, SortDirection, TypeFilter};
use eatfit_core::service::EatFitService;

use super::helpers::print_meal_table;

pub(crate) fn cmd_menu(
    svc: &EatFitService,
    meal_type: &str,
    search: Option<&str>,
    desc: bool,
    json: bool,
) -> Result<()> {
    let type_filter: TypeFilter = meal_type
        .parse()
        .with_context(|| format!("Unknown meal type filter '{meal_type}'"))?;
    let query = MenuQuery {
        type_filter,
        keyword: search.unwrap_or_default().to_string(),
        sort: if desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };

    let meals = svc.filtered_meals(&query);

    if json {
        println!("{}", serde_json::to_string_pretty(&meals)?);
        return Ok(());
    }

    if meals.is_empty() {
        eprintln!("No meals found for this filter/search.");
        process::exit(2);
    }

    if let Some(profile) = svc.profile() {
        let goal = profile.goal;
        println!("Showing meals for {goal}\n");
    }
    print_meal_table(&meals);

    Ok(())
}
