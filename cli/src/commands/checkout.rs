use anyhow::Result;
use std::process;

use eatfit_core::service::EatFitService;

use super::helpers::print_totals;

pub(crate) fn cmd_checkout(svc: &mut EatFitService, json: bool) -> Result<()> {
    let totals = svc.cart_totals();
    let result = svc.checkout()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.accepted {
        print_totals(&totals);
        println!("{}", result.message);
    } else {
        eprintln!("{}", result.message);
    }

    if !result.accepted {
        process::exit(2);
    }
    Ok(())
}

pub(crate) fn cmd_reset(svc: &mut EatFitService, json: bool) -> Result<()> {
    svc.reset_all()?;

    if json {
        println!("{}", serde_json::json!({ "reset": true }));
    } else {
        println!("All data reset.");
    }
    Ok(())
}
