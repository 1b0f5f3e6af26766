use anyhow::Result;
use std::process;

use eatfit_core::models::{ProfileForm, ProfileInsights};
use eatfit_core::nutrition;
use eatfit_core::service::EatFitService;

use super::helpers::{format_price, json_error};

pub(crate) fn cmd_profile_set(
    svc: &mut EatFitService,
    form: &ProfileForm,
    json: bool,
) -> Result<()> {
    let profile = svc.set_profile(form)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Profile updated. Recommendations refreshed.\n");
        print_insights(&nutrition::insights(&profile));
        let budget = format_price(profile.budget);
        println!("  Budget: {budget}");
    }

    Ok(())
}

pub(crate) fn cmd_profile_show(svc: &EatFitService, json: bool) -> Result<()> {
    let Some(view) = svc.insights() else {
        if json {
            println!("{}", json_error("No profile set"));
        } else {
            eprintln!(
                "Complete your profile to unlock your nutrition dashboard. Use `eatfit profile set`."
            );
        }
        process::exit(2);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print_insights(&view);
    if let Some(profile) = svc.profile() {
        let budget = format_price(profile.budget);
        let (goal, activity) = (profile.goal, profile.activity);
        println!("  Goal: {goal} | Activity: {activity} | Budget: {budget}");
    }

    Ok(())
}

fn print_insights(view: &ProfileInsights) {
    let name = &view.name;
    let calories = view.calories;
    println!("{name}, your personalized target is {calories} kcal/day.");

    let (bmi, label) = (&view.bmi.value, view.bmi.label);
    let (p, c, f) = (view.macros.protein, view.macros.carbs, view.macros.fat);
    println!("  BMI: {bmi} ({label})");
    println!("  Protein: {p} g/day | Carbs: {c} g/day | Fat: {f} g/day");
    println!("  Tip: {}", view.tip);
}
