mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process;
use tracing_subscriber::EnvFilter;

use crate::commands::{
    cmd_cart_add, cmd_cart_clear, cmd_cart_dec, cmd_cart_inc, cmd_cart_remove, cmd_cart_show,
    cmd_checkout, cmd_menu, cmd_profile_set, cmd_profile_show, cmd_reset, cmd_theme_set,
    cmd_theme_show, cmd_theme_toggle,
};
use crate::config::Config;
use eatfit_core::models::ProfileForm;
use eatfit_core::service::EatFitService;

#[derive(Parser)]
#[command(
    name = "eatfit",
    version,
    about = "Order meals that fit your nutrition goals",
    long_about = "Order meals that fit your nutrition goals.\n\n\
        Set a profile to get a daily calorie target, macro split and BMI, \
        browse the menu filtered to your goal, fill a cart, and check out \
        within your budget."
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set or show your body metrics, goal and budget
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Browse meals that match your goal
    Menu {
        /// Meal type: all, veg, non-veg, drink
        #[arg(short = 't', long = "type", default_value = "all")]
        meal_type: String,
        /// Only show meals whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Sort by price, highest first
        #[arg(long)]
        desc: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Place the order if the cart fits your budget
    Checkout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget the profile and the cart
    Reset {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change the display theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Save your profile and compute daily targets
    Set {
        /// Your name
        #[arg(long, default_value = "")]
        name: String,
        /// Age in years
        #[arg(long, allow_hyphen_values = true)]
        age: String,
        /// Weight in kg
        #[arg(long, allow_hyphen_values = true)]
        weight: String,
        /// Height in cm
        #[arg(long, allow_hyphen_values = true)]
        height: String,
        /// Goal: weight-loss, maintenance, muscle-gain
        #[arg(short, long, default_value = "maintenance")]
        goal: String,
        /// Activity level: low, moderate, high
        #[arg(short, long, default_value = "moderate")]
        activity: String,
        /// Order budget
        #[arg(short, long, allow_hyphen_values = true)]
        budget: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show your calorie target, BMI and macro targets
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CartCommands {
    /// Add one of a meal to the cart
    Add {
        /// Meal ID (see `eatfit menu`)
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Increase a meal's quantity by one
    Inc {
        /// Meal ID
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Decrease a meal's quantity by one (removes it at zero)
    Dec {
        /// Meal ID
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a meal from the cart
    Remove {
        /// Meal ID
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show cart contents and totals
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Empty the cart
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Show the current theme
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch between light and dark
    Toggle {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the theme: light or dark
    Set {
        theme: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let mut svc = EatFitService::new(&config.db_path)
        .with_context(|| format!("Failed to load state from {}", config.db_path.display()))?;

    match cli.command {
        Commands::Profile { command } => match command {
            ProfileCommands::Set {
                name,
                age,
                weight,
                height,
                goal,
                activity,
                budget,
                json,
            } => {
                let form = ProfileForm {
                    name,
                    age,
                    weight,
                    height,
                    goal,
                    activity,
                    budget,
                };
                cmd_profile_set(&mut svc, &form, json)
            }
            ProfileCommands::Show { json } => cmd_profile_show(&svc, json),
        },
        Commands::Menu {
            meal_type,
            search,
            desc,
            json,
        } => cmd_menu(&svc, &meal_type, search.as_deref(), desc, json),
        Commands::Cart { command } => match command {
            CartCommands::Add { id, json } => cmd_cart_add(&mut svc, id, json),
            CartCommands::Inc { id, json } => cmd_cart_inc(&mut svc, id, json),
            CartCommands::Dec { id, json } => cmd_cart_dec(&mut svc, id, json),
            CartCommands::Remove { id, json } => cmd_cart_remove(&mut svc, id, json),
            CartCommands::Show { json } => cmd_cart_show(&svc, json),
            CartCommands::Clear { json } => cmd_cart_clear(&mut svc, json),
        },
        Commands::Checkout { json } => cmd_checkout(&mut svc, json),
        Commands::Reset { json } => cmd_reset(&mut svc, json),
        Commands::Theme { command } => match command {
            ThemeCommands::Show { json } => cmd_theme_show(&svc, json),
            ThemeCommands::Toggle { json } => cmd_theme_toggle(&svc, json),
            ThemeCommands::Set { theme, json } => cmd_theme_set(&svc, &theme, json),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_profile_set_accepts_negative_values_for_validation() {
        let cli = Cli::try_parse_from([
            "eatfit", "profile", "set", "--age", "30", "--weight", "-5", "--height", "170",
            "--budget", "20",
        ])
        .unwrap();
        match cli.command {
            Commands::Profile {
                command: ProfileCommands::Set { weight, goal, .. },
            } => {
                assert_eq!(weight, "-5");
                assert_eq!(goal, "maintenance");
            }
            _ => panic!("expected profile set"),
        }
    }

    #[test]
    fn test_menu_defaults() {
        let cli = Cli::try_parse_from(["eatfit", "menu"]).unwrap();
        match cli.command {
            Commands::Menu {
                meal_type,
                search,
                desc,
                json,
            } => {
                assert_eq!(meal_type, "all");
                assert!(search.is_none());
                assert!(!desc);
                assert!(!json);
            }
            _ => panic!("expected menu"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["eatfit", "cart", "show", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
