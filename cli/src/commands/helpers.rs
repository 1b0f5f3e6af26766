use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use eatfit_core::models::{CartLine, MealRecord, Totals};

pub(crate) fn print_meal_table(meals: &[&MealRecord]) {
    #[derive(Tabled)]
    struct MealRow {
        #[tabled(rename = "ID")]
        id: u32,
        #[tabled(rename = "Name")]
        name: String,
        #[tabled(rename = "Type")]
        meal_type: String,
        #[tabled(rename = "Kcal")]
        calories: u32,
        #[tabled(rename = "P")]
        protein: String,
        #[tabled(rename = "C")]
        carbs: String,
        #[tabled(rename = "F")]
        fat: String,
        #[tabled(rename = "Price")]
        price: String,
    }

    let rows: Vec<MealRow> = meals
        .iter()
        .map(|m| MealRow {
            id: m.id,
            name: truncate(&m.name, 30),
            meal_type: m.meal_type.to_string(),
            calories: m.calories,
            protein: format!("{}g", m.protein),
            carbs: format!("{}g", m.carbs),
            fat: format!("{}g", m.fat),
            price: format_price(m.price),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_cart_table(lines: &[CartLine]) {
    #[derive(Tabled)]
    struct LineRow {
        #[tabled(rename = "ID")]
        id: u32,
        #[tabled(rename = "Meal")]
        name: String,
        #[tabled(rename = "Qty")]
        qty: u32,
        #[tabled(rename = "Each")]
        each: String,
        #[tabled(rename = "Price")]
        price: String,
        #[tabled(rename = "Kcal")]
        calories: u64,
    }

    let rows: Vec<LineRow> = lines
        .iter()
        .map(|l| LineRow {
            id: l.id,
            name: truncate(&l.name, 30),
            qty: l.qty,
            each: format_price(l.unit_price),
            price: format_price(l.line_price),
            calories: l.line_calories,
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn print_totals(totals: &Totals) {
    let items = totals.items;
    let price = format_price(totals.price);
    let calories = totals.calories;
    println!("  TOTAL: {items} items | {price} | {calories} kcal");
}

/// Cart contents plus totals, the shape every `--json` cart command prints.
#[derive(Serialize)]
pub(crate) struct CartView {
    pub lines: Vec<CartLine>,
    pub totals: Totals,
}

pub(crate) fn format_price(value: f64) -> String {
    format!("${:.2}", no_neg_zero(value))
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn no_neg_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}
