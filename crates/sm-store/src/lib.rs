//! `sm-store`: inventory and shopping cart.
//!
//! These are the collaborators around the routing core: the inventory
//! answers "what does this cost and how many are left", the cart moves stock
//! out of the inventory and prices the bill.
//!
//! | Module        | Contents                                        |
//! |---------------|-------------------------------------------------|
//! | [`inventory`] | `Inventory`, `StockItem`, JSON load/save        |
//! | [`cart`]      | `Cart`, `Bill`, `BillLine`, JSON load/save      |
//! | [`error`]     | `StoreError`, `StoreResult<T>`                  |

pub mod cart;
pub mod error;
pub mod inventory;

#[cfg(test)]
mod tests;

pub use cart::{load_cart_json, save_cart_json, Bill, BillLine, Cart};
pub use error::{StoreError, StoreResult};
pub use inventory::{load_inventory_json, save_inventory_json, Inventory, StockItem};
