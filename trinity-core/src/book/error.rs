/// Errors returned by [`OrderBook::new`](super::engine::OrderBook::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookConfigError {
    /// `increment` was zero.
    ZeroIncrement,
    /// `max_price` is not an exact multiple of `increment`.
    IncrementDoesNotDivideMaxPrice,
}

/// Errors returned by order-book operations that take an `order_id`, or
/// that validate an incoming price/size pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    /// `price` is above `max_price`, or not a multiple of `increment`.
    InvalidPrice,
    /// `size` is zero, or (for `update`) not greater than what has
    /// already filled.
    InvalidSize,
    /// `order_id` was never issued by this book.
    UnknownOrder,
    /// `order_id` refers to an order that has already fully filled or
    /// was already cancelled.
    AlreadyFilled,
}
