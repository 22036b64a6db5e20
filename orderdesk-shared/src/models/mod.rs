pub mod events;
pub mod order;

pub use order::{InvalidInput, LineItem, Order, Transaction};
