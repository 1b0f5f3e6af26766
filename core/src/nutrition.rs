//! Pure formulas that turn body metrics and a goal into daily targets.

use crate::models::{Activity, Bmi, Goal, MacroSplit, MacroTargets, ProfileInsights, UserProfile};

pub const CALORIE_FLOOR: i64 = 1200;
const KCAL_PER_KG: f64 = 30.0;
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

#[must_use]
pub fn activity_factor(activity: Activity) -> f64 {
    match activity {
        Activity::Low => 0.9,
        Activity::Moderate => 1.0,
        Activity::High => 1.12,
    }
}

#[must_use]
pub fn goal_delta(goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => -350.0,
        Goal::Maintenance => 0.0,
        Goal::MuscleGain => 280.0,
    }
}

/// Daily calorie target, never below [`CALORIE_FLOOR`].
///
/// A non-finite weight degrades to the floor instead of failing.
#[must_use]
pub fn daily_calories(weight: f64, activity: Activity, goal: Goal) -> i64 {
    let raw = weight * KCAL_PER_KG * activity_factor(activity) + goal_delta(goal);
    let rounded = if raw.is_finite() { raw.round() as i64 } else { 0 };
    rounded.max(CALORIE_FLOOR)
}

#[must_use]
pub fn macro_split(goal: Goal) -> MacroSplit {
    let (protein_pct, carbs_pct, fat_pct) = match goal {
        Goal::WeightLoss => (35, 35, 30),
        Goal::Maintenance => (30, 40, 30),
        Goal::MuscleGain => (30, 45, 25),
    };
    MacroSplit {
        protein_pct,
        carbs_pct,
        fat_pct,
    }
}

/// Grams per day of each macro. Each field is rounded on its own, so the
/// grams do not necessarily add back up to `calories`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn macro_targets(calories: i64, goal: Goal) -> MacroTargets {
    let split = macro_split(goal);
    let cal = calories as f64;
    let grams = |pct: i64, kcal_per_g: f64| (cal * pct as f64 / 100.0 / kcal_per_g).round() as i64;
    MacroTargets {
        protein: grams(split.protein_pct, KCAL_PER_G_PROTEIN),
        carbs: grams(split.carbs_pct, KCAL_PER_G_CARBS),
        fat: grams(split.fat_pct, KCAL_PER_G_FAT),
    }
}

#[must_use]
pub fn bmi_classification(weight: f64, height_cm: f64) -> Bmi {
    let m = height_cm / 100.0;
    let bmi = weight / (m * m);
    let label = if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    };
    Bmi {
        value: format!("{bmi:.1}"),
        label,
    }
}

#[must_use]
pub fn goal_tip(goal: Goal) -> &'static str {
    match goal {
        Goal::WeightLoss => {
            "Prioritize lean proteins, high-fiber veggies, and lower-calorie density meals."
        }
        Goal::Maintenance => "Keep a balanced plate with sustainable calories and hydration.",
        Goal::MuscleGain => "Increase meal frequency with high protein and complex carbs.",
    }
}

#[must_use]
pub fn insights(profile: &UserProfile) -> ProfileInsights {
    ProfileInsights {
        name: profile.display_name().to_string(),
        goal: profile.goal,
        calories: profile.calories,
        bmi: bmi_classification(profile.weight, profile.height),
        macros: macro_targets(profile.calories, profile.goal),
        tip: goal_tip(profile.goal),
    }
}
