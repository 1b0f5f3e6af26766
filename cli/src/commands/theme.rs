use anyhow::Result;

use eatfit_core::models::Theme;
use eatfit_core::service::EatFitService;

fn print_theme(theme: Theme, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "theme": theme }));
    } else {
        println!("Theme: {theme}");
    }
}

pub(crate) fn cmd_theme_show(svc: &EatFitService, json: bool) -> Result<()> {
    print_theme(svc.theme()?, json);
    Ok(())
}

pub(crate) fn cmd_theme_toggle(svc: &EatFitService, json: bool) -> Result<()> {
    print_theme(svc.toggle_theme()?, json);
    Ok(())
}

pub(crate) fn cmd_theme_set(svc: &EatFitService, theme: &str, json: bool) -> Result<()> {
    let theme: Theme = theme.parse()?;
    svc.set_theme(theme)?;
    print_theme(theme, json);
    Ok(())
}
