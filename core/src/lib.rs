pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod db;
pub mod error;
pub mod menu;
pub mod models;
pub mod nutrition;
pub mod service;
