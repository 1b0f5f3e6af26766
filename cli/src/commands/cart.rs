use anyhow::Result;
use std::process;

use eatfit_core::catalog::find_meal;
use eatfit_core::service::EatFitService;

use super::helpers::{CartView, json_error, print_cart_table, print_totals};

fn cart_view(svc: &EatFitService) -> CartView {
    CartView {
        lines: svc.cart_lines(),
        totals: svc.cart_totals(),
    }
}

fn print_cart(svc: &EatFitService, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&cart_view(svc))?);
        return Ok(());
    }

    let lines = svc.cart_lines();
    if lines.is_empty() {
        println!("No items yet.");
    } else {
        print_cart_table(&lines);
    }
    print_totals(&svc.cart_totals());
    Ok(())
}

fn not_in_cart(id: u32, json: bool) -> ! {
    if json {
        println!("{}", json_error(&format!("Meal {id} is not in the cart")));
    } else {
        eprintln!("Meal {id} is not in the cart");
    }
    process::exit(2);
}

pub(crate) fn cmd_cart_add(svc: &mut EatFitService, id: u32, json: bool) -> Result<()> {
    svc.add_to_cart(id)?;

    if !json {
        match find_meal(svc.catalog(), id) {
            Some(meal) => println!("Added {} to cart.", meal.name),
            None => eprintln!("Meal {id} is not on the menu; it will not count toward totals."),
        }
    }
    print_cart(svc, json)
}

pub(crate) fn cmd_cart_inc(svc: &mut EatFitService, id: u32, json: bool) -> Result<()> {
    if !svc.increase_qty(id)? {
        not_in_cart(id, json);
    }
    print_cart(svc, json)
}

pub(crate) fn cmd_cart_dec(svc: &mut EatFitService, id: u32, json: bool) -> Result<()> {
    if !svc.decrease_qty(id)? {
        not_in_cart(id, json);
    }
    print_cart(svc, json)
}

pub(crate) fn cmd_cart_remove(svc: &mut EatFitService, id: u32, json: bool) -> Result<()> {
    if !svc.remove_from_cart(id)? {
        not_in_cart(id, json);
    }
    if !json {
        println!("Removed meal {id} from cart.");
    }
    print_cart(svc, json)
}

pub(crate) fn cmd_cart_show(svc: &EatFitService, json: bool) -> Result<()> {
    print_cart(svc, json)
}

pub(crate) fn cmd_cart_clear(svc: &mut EatFitService, json: bool) -> Result<()> {
    svc.clear_cart()?;

    if json {
        println!("{}", serde_json::json!({ "cleared": true }));
    } else {
        println!("Cart cleared.");
    }
    Ok(())
}
