/// A price, denominated in the book's smallest tick (always a multiple
/// of the book's `increment`).
pub type Price = u64;

/// An order size, in the book's smallest unit.
pub type Quantity = u64;

/// Opaque, monotonically increasing order identifier, starting from 1.
pub type OrderId = u64;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bid,
    Offer,
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }
}

/// One resting order, living inside an [`OrderLevel`](super::level::OrderLevel)'s FIFO queue.
#[derive(Debug, Clone)]
pub(crate) struct RestingOrder {
    pub(crate) id: OrderId,
    pub(crate) price: Price,
    pub(crate) original_size: Quantity,
    pub(crate) remaining_size: Quantity,
    pub(crate) filled_value: u128,
}

/// Where to find an order that is still active: which side it rests on
/// and which price level's queue holds it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ActiveRef {
    pub(crate) side: Side,
    pub(crate) level_idx: usize,
}

/// A point-in-time view of one order's fill progress.
///
/// `average_price` is `filled_value / filled_size` and is `0.0` when
/// nothing has filled yet. `remaining_size` is always `0` for an order
/// that has fully filled or been cancelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderState {
    pub filled_size: Quantity,
    pub remaining_size: Quantity,
    pub average_price: f64,
}

/// Result of [`OrderBook::order_status`](super::engine::OrderBook::order_status):
/// whether the order is still resting or has left the book, carrying its
/// current fill state either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderStatusQuery {
    Active(OrderState),
    Done(OrderState),
}

/// Best bid and best offer, each with the total size resting at that
/// price. `None` on a side means that side of the book is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct L1 {
    pub best_bid: Option<(Price, Quantity)>,
    pub best_offer: Option<(Price, Quantity)>,
}

/// Full depth snapshot: bids in decreasing price order, offers in
/// increasing price order. Only non-empty levels appear.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct L2 {
    pub bids: Vec<(Price, Quantity)>,
    pub offers: Vec<(Price, Quantity)>,
}
