// src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod checkout_handlers;
pub mod dev_handlers;
pub mod product_handlers;
pub mod user_handlers;
