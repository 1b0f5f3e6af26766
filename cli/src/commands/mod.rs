mod cart;
mod checkout;
mod helpers;
mod menu;
mod profile;
mod theme;

pub(crate) use cart::{
    cmd_cart_add, cmd_cart_clear, cmd_cart_dec, cmd_cart_inc, cmd_cart_remove, cmd_cart_show,
};
pub(crate) use checkout::{cmd_checkout, cmd_reset};
pub(crate) use menu::cmd_menu;
pub(crate) use profile::{cmd_profile_set, cmd_profile_show};
pub(crate) use theme::{cmd_theme_set, cmd_theme_show, cmd_theme_toggle};
