// src/models/mod.rs

//! Data structures mirroring the rows of the managed backend's tables.
//!
//! Row structs deserialize from what the backend returns; `New*` structs are
//! insert payloads (no id — the backend assigns one).

pub mod cart;
pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod product;
pub mod user;

// Re-export the model structs for convenient access
pub use cart::{Cart, NewCart};
pub use cart_item::{CartItem, CartItemWithProduct, NewCartItem};
pub use order::{NewOrder, Order, OrderStatus};
pub use order_item::{NewOrderItem, OrderItem};
pub use product::{NewProduct, Product};
pub use user::User;
