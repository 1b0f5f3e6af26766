use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EatFitError, EatFitResult};
use crate::nutrition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WeightLoss,
    Maintenance,
    MuscleGain,
}

pub const GOALS: &[&str] = &["weight-loss", "maintenance", "muscle-gain"];

impl Goal {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight-loss",
            Goal::Maintenance => "maintenance",
            Goal::MuscleGain => "muscle-gain",
        }
    }
}

impl FromStr for Goal {
    type Err = EatFitError;

    fn from_str(s: &str) -> EatFitResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "weight-loss" => Ok(Goal::WeightLoss),
            "maintenance" => Ok(Goal::Maintenance),
            "muscle-gain" => Ok(Goal::MuscleGain),
            _ => Err(EatFitError::validation(
                "goal",
                format!("'{s}' is not one of: {}", GOALS.join(", ")),
            )),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activity {
    Low,
    Moderate,
    High,
}

pub const ACTIVITY_LEVELS: &[&str] = &["low", "moderate", "high"];

impl Activity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Activity::Low => "low",
            Activity::Moderate => "moderate",
            Activity::High => "high",
        }
    }
}

impl FromStr for Activity {
    type Err = EatFitError;

    fn from_str(s: &str) -> EatFitResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Activity::Low),
            "moderate" => Ok(Activity::Moderate),
            "high" => Ok(Activity::High),
            _ => Err(EatFitError::validation(
                "activity",
                format!("'{s}' is not one of: {}", ACTIVITY_LEVELS.join(", ")),
            )),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealType {
    Veg,
    NonVeg,
    Drink,
}

pub const MEAL_TYPES: &[&str] = &["veg", "non-veg", "drink"];

impl MealType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Veg => "veg",
            MealType::NonVeg => "non-veg",
            MealType::Drink => "drink",
        }
    }
}

impl FromStr for MealType {
    type Err = EatFitError;

    fn from_str(s: &str) -> EatFitResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "veg" => Ok(MealType::Veg),
            "non-veg" => Ok(MealType::NonVeg),
            "drink" => Ok(MealType::Drink),
            _ => Err(EatFitError::validation(
                "meal type",
                format!("'{s}' is not one of: {}", MEAL_TYPES.join(", ")),
            )),
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    pub id: u32,
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub price: f64,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub goals: Vec<Goal>,
}

impl MealRecord {
    #[must_use]
    pub fn supports(&self, goal: Goal) -> bool {
        self.goals.contains(&goal)
    }
}

/// Raw values as typed into the profile form, before any coercion.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub age: String,
    pub weight: String,
    pub height: String,
    pub goal: String,
    pub activity: String,
    pub budget: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub goal: Goal,
    pub activity: Activity,
    pub budget: f64,
    /// Derived from weight, activity and goal whenever the profile is set.
    pub calories: i64,
}

impl UserProfile {
    /// Validate a submitted form and derive the calorie target from it.
    pub fn from_form(form: &ProfileForm) -> EatFitResult<Self> {
        let name = form.name.trim().to_string();
        let age = parse_age(&form.age)?;
        let weight = parse_positive("weight", &form.weight)?;
        let height = parse_positive("height", &form.height)?;
        let goal: Goal = form.goal.parse()?;
        let activity: Activity = form.activity.parse()?;
        let budget = parse_non_negative("budget", &form.budget)?;
        let calories = nutrition::daily_calories(weight, activity, goal);

        Ok(Self {
            name,
            age,
            weight,
            height,
            goal,
            activity,
            budget,
            calories,
        })
    }

    /// Name used to address the customer on the dashboard and on an order
    /// confirmation.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            GUEST_NAME
        } else {
            self.name.as_str()
        }
    }
}

pub const GUEST_NAME: &str = "Guest";

fn parse_number(field: &'static str, raw: &str) -> EatFitResult<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| EatFitError::validation(field, format!("'{raw}' is not a number")))?;
    if !value.is_finite() {
        return Err(EatFitError::validation(field, "must be a finite number"));
    }
    Ok(value)
}

pub fn parse_positive(field: &'static str, raw: &str) -> EatFitResult<f64> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(EatFitError::validation(field, "must be greater than 0"));
    }
    Ok(value)
}

pub fn parse_non_negative(field: &'static str, raw: &str) -> EatFitResult<f64> {
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(EatFitError::validation(field, "must not be negative"));
    }
    Ok(value)
}

fn parse_age(raw: &str) -> EatFitResult<u32> {
    let age: u32 = raw
        .trim()
        .parse()
        .map_err(|_| EatFitError::validation("age", format!("'{raw}' is not a whole number")))?;
    if age == 0 {
        return Err(EatFitError::validation("age", "must be greater than 0"));
    }
    Ok(age)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRow {
    pub id: u32,
    pub qty: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Totals {
    pub items: u64,
    pub price: f64,
    pub calories: u64,
}

/// A cart row resolved against the catalog, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: u32,
    pub name: String,
    pub qty: u32,
    pub unit_price: f64,
    pub line_price: f64,
    pub line_calories: u64,
}

/// Percentage split of daily calories between the three macronutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroSplit {
    pub protein_pct: i64,
    pub carbs_pct: i64,
    pub fat_pct: i64,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroTargets {
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bmi {
    pub value: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileInsights {
    /// Already resolved through [`UserProfile::display_name`].
    pub name: String,
    pub goal: Goal,
    pub calories: i64,
    pub bmi: Bmi,
    pub macros: MacroTargets,
    pub tip: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = EatFitError;

    fn from_str(s: &str) -> EatFitResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(EatFitError::validation(
                "theme",
                format!("'{s}' is not one of: light, dark"),
            )),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
