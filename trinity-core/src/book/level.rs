use super::types::{ActiveRef, L1, L2, OrderId, OrderState, Price, Quantity, RestingOrder, Side};
use std::collections::{HashMap, VecDeque};

/// One price level's resting orders, plus its position in the
/// doubly-linked chain of non-empty levels on its side of the book.
///
/// `prev_idx`/`next_idx` are `-1` at either end of the chain. A level
/// not currently in any chain (because it is empty) carries `-1` in
/// both and `total_size == 0`; `total_size` is the single source of
/// truth for "is this level in the chain".
pub(crate) struct OrderLevel {
    pub(crate) orders: VecDeque<RestingOrder>,
    pub(crate) total_size: Quantity,
    pub(crate) prev_idx: i64,
    pub(crate) next_idx: i64,
}

impl OrderLevel {
    fn empty() -> Self {
        Self {
            orders: VecDeque::new(),
            total_size: 0,
            prev_idx: -1,
            next_idx: -1,
        }
    }
}

/// A price-time-priority limit order book.
///
/// Price levels live in a dense array indexed by `price / increment`,
/// one slot per tick from `0` to `max_price` inclusive. Non-empty levels
/// on each side are additionally threaded into a doubly-linked chain so
/// that matching and depth queries never have to scan the (mostly
/// empty) array: `first_*_idx` is the worst price on that side,
/// `last_*_idx` is the best, and walking `prev_idx` from the best always
/// visits levels in worsening price order.
pub struct OrderBook {
    pub(crate) max_price: Price,
    pub(crate) increment: Price,
    pub(crate) levels: Vec<OrderLevel>,

    pub(crate) first_bid_idx: i64,
    pub(crate) last_bid_idx: i64,
    pub(crate) first_offer_idx: i64,
    pub(crate) last_offer_idx: i64,

    pub(crate) active: HashMap<OrderId, ActiveRef>,
    pub(crate) done: HashMap<OrderId, OrderState>,
    pub(crate) next_order_id: OrderId,
}

impl OrderBook {
    pub(crate) fn level_index(&self, price: Price) -> usize {
        (price / self.increment) as usize
    }

    pub(crate) fn level_price(&self, idx: i64) -> Price {
        idx as u64 * self.increment
    }

    pub(crate) fn is_better(side: Side, a: i64, b: i64) -> bool {
        match side {
            Side::Bid => a > b,
            Side::Offer => a < b,
        }
    }

    pub(crate) fn best_opposite(&self, side: Side) -> i64 {
        match side {
            Side::Bid => self.last_offer_idx,
            Side::Offer => self.last_bid_idx,
        }
    }

    pub(crate) fn price_acceptable(side: Side, opposite_idx: i64, incoming_idx: i64) -> bool {
        match side {
            Side::Bid => opposite_idx <= incoming_idx,
            Side::Offer => opposite_idx >= incoming_idx,
        }
    }

    fn endpoints(&self, side: Side) -> (i64, i64) {
        match side {
            Side::Bid => (self.first_bid_idx, self.last_bid_idx),
            Side::Offer => (self.first_offer_idx, self.last_offer_idx),
        }
    }

    fn set_endpoints(&mut self, side: Side, first: i64, last: i64) {
        match side {
            Side::Bid => {
                self.first_bid_idx = first;
                self.last_bid_idx = last;
            }
            Side::Offer => {
                self.first_offer_idx = first;
                self.last_offer_idx = last;
            }
        }
    }

    /// Threads a newly-non-empty level at `new_idx` into `side`'s chain.
    /// Caller must have already established `total_size > 0` at that
    /// index before calling.
    pub(crate) fn splice_level(&mut self, side: Side, new_idx: i64) {
        let (mut first, mut last) = self.endpoints(side);

        if first == -1 {
            first = new_idx;
            last = new_idx;
            self.levels[new_idx as usize].prev_idx = -1;
            self.levels[new_idx as usize].next_idx = -1;
        } else if Self::is_better(side, new_idx, last) {
            self.levels[new_idx as usize].next_idx = -1;
            self.levels[new_idx as usize].prev_idx = last;
            self.levels[last as usize].next_idx = new_idx;
            last = new_idx;
        } else if Self::is_better(side, first, new_idx) {
            self.levels[new_idx as usize].prev_idx = -1;
            self.levels[new_idx as usize].next_idx = first;
            self.levels[first as usize].prev_idx = new_idx;
            first = new_idx;
        } else {
            let mut curr = last;
            while Self::is_better(side, curr, new_idx) {
                curr = self.levels[curr as usize].prev_idx;
            }
            let next = self.levels[curr as usize].next_idx;
            self.levels[curr as usize].next_idx = new_idx;
            self.levels[new_idx as usize].prev_idx = curr;
            self.levels[new_idx as usize].next_idx = next;
            self.levels[next as usize].prev_idx = new_idx;
        }

        self.set_endpoints(side, first, last);
    }

    /// Removes an emptied level at `idx` from `side`'s chain.
    pub(crate) fn unlink_level(&mut self, side: Side, idx: i64) {
        let prev = self.levels[idx as usize].prev_idx;
        let next = self.levels[idx as usize].next_idx;
        let (mut first, mut last) = self.endpoints(side);

        if prev != -1 {
            self.levels[prev as usize].next_idx = next;
        } else {
            first = next;
        }
        if next != -1 {
            self.levels[next as usize].prev_idx = prev;
        } else {
            last = prev;
        }

        self.levels[idx as usize].prev_idx = -1;
        self.levels[idx as usize].next_idx = -1;
        self.set_endpoints(side, first, last);
    }

    fn walk_chain(&self, start: i64) -> Vec<(Price, Quantity)> {
        let mut out = Vec::new();
        let mut curr = start;
        while curr != -1 {
            let level = &self.levels[curr as usize];
            out.push((self.level_price(curr), level.total_size));
            curr = level.prev_idx;
        }
        out
    }

    /// Best bid and best offer, with size resting at each.
    pub fn l1(&self) -> L1 {
        L1 {
            best_bid: (self.last_bid_idx != -1)
                .then(|| (self.level_price(self.last_bid_idx), self.levels[self.last_bid_idx as usize].total_size)),
            best_offer: (self.last_offer_idx != -1)
                .then(|| (self.level_price(self.last_offer_idx), self.levels[self.last_offer_idx as usize].total_size)),
        }
    }

    /// Full depth: bids in decreasing price order, offers in increasing
    /// price order.
    pub fn l2(&self) -> L2 {
        L2 {
            bids: self.walk_chain(self.last_bid_idx),
            offers: self.walk_chain(self.last_offer_idx),
        }
    }
}

pub(crate) fn new_level() -> OrderLevel {
    OrderLevel::empty()
}
