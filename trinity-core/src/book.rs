pub mod engine;
pub mod error;
pub mod level;
pub mod types;

pub mod prelude {
    pub use super::engine::OrderBook;
    pub use super::error::{BookConfigError, OrderError};
    pub use super::types::{L1, L2, OrderId, OrderState, OrderStatusQuery, Price, Quantity, Side};
}
