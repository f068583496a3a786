use super::error::{BookConfigError, OrderError};
use super::level::{new_level, OrderBook, OrderLevel};
use super::types::{ActiveRef, OrderId, OrderState, OrderStatusQuery, Price, Quantity, RestingOrder, Side};
use std::collections::HashMap;

impl OrderBook {
    /// Builds an empty book spanning prices `0..=max_price` at
    /// `increment` granularity.
    pub fn new(max_price: Price, increment: Price) -> Result<Self, BookConfigError> {
        if increment == 0 {
            return Err(BookConfigError::ZeroIncrement);
        }
        if max_price % increment != 0 {
            return Err(BookConfigError::IncrementDoesNotDivideMaxPrice);
        }

        let level_count = (max_price / increment + 1) as usize;
        let levels: Vec<OrderLevel> = (0..level_count).map(|_| new_level()).collect();

        Ok(Self {
            max_price,
            increment,
            levels,
            first_bid_idx: -1,
            last_bid_idx: -1,
            first_offer_idx: -1,
            last_offer_idx: -1,
            active: HashMap::new(),
            done: HashMap::new(),
            next_order_id: 1,
        })
    }

    fn validate_order_params(&self, price: Price, size: Quantity) -> Result<(), OrderError> {
        if price > self.max_price || price % self.increment != 0 {
            return Err(OrderError::InvalidPrice);
        }
        if size == 0 {
            return Err(OrderError::InvalidSize);
        }
        Ok(())
    }

    /// Submits a new limit order. Crosses the opposite side first; any
    /// remainder rests on `side` at `price`. Returns the order's id
    /// whether it rested, filled immediately, or did both in sequence.
    pub fn add_order(&mut self, price: Price, size: Quantity, side: Side) -> Result<OrderId, OrderError> {
        self.validate_order_params(price, size)?;
        let id = self.next_order_id;
        self.next_order_id += 1;
        self.match_and_rest(id, price, size, side);
        Ok(id)
    }

    /// Runs `size` of a fresh (or re-submitted) order at `price`/`side`
    /// against the opposite side of the book, then rests whatever is
    /// left — or, if nothing is left, records the order as done.
    fn match_and_rest(&mut self, id: OrderId, price: Price, size: Quantity, side: Side) {
        let incoming_idx = self.level_index(price) as i64;
        let mut incoming_remaining = size;
        let mut incoming_filled_value: u128 = 0;

        let mut current = self.best_opposite(side);
        while current != -1
            && incoming_remaining > 0
            && OrderBook::price_acceptable(side, current, incoming_idx)
        {
            let level_idx = current as usize;

            loop {
                if incoming_remaining == 0 || self.levels[level_idx].orders.is_empty() {
                    break;
                }

                let traded;
                let mut finished: Option<(OrderId, Quantity, u128)> = None;
                {
                    let front = self.levels[level_idx].orders.front_mut().unwrap();
                    traded = incoming_remaining.min(front.remaining_size);
                    let trade_value = traded as u128 * front.price as u128;
                    front.remaining_size -= traded;
                    front.filled_value += trade_value;
                    incoming_remaining -= traded;
                    incoming_filled_value += trade_value;
                    if front.remaining_size == 0 {
                        finished = Some((front.id, front.original_size, front.filled_value));
                    }
                }
                self.levels[level_idx].total_size -= traded;

                if let Some((fid, original_size, filled_value)) = finished {
                    self.levels[level_idx].orders.pop_front();
                    self.active.remove(&fid);
                    let average_price = filled_value as f64 / original_size as f64;
                    self.done.insert(
                        fid,
                        OrderState {
                            filled_size: original_size,
                            remaining_size: 0,
                            average_price,
                        },
                    );
                } else {
                    break;
                }
            }

            if self.levels[level_idx].total_size == 0 {
                let prev = self.levels[level_idx].prev_idx;
                self.unlink_level(side.opposite(), current);
                current = prev;
            } else {
                break;
            }
        }

        if incoming_remaining == 0 {
            let average_price = incoming_filled_value as f64 / size as f64;
            self.done.insert(
                id,
                OrderState {
                    filled_size: size,
                    remaining_size: 0,
                    average_price,
                },
            );
            return;
        }

        let level_was_empty = self.levels[incoming_idx as usize].total_size == 0;
        self.levels[incoming_idx as usize].orders.push_back(RestingOrder {
            id,
            price,
            original_size: size,
            remaining_size: incoming_remaining,
            filled_value: incoming_filled_value,
        });
        self.levels[incoming_idx as usize].total_size += incoming_remaining;
        if level_was_empty {
            self.splice_level(side, incoming_idx);
        }
        self.active.insert(
            id,
            ActiveRef {
                side,
                level_idx: incoming_idx as usize,
            },
        );
    }

    /// Current fill state of `order_id`, whether it is still resting or
    /// has already left the book.
    pub fn order_status(&self, order_id: OrderId) -> Result<OrderStatusQuery, OrderError> {
        if let Some(state) = self.done.get(&order_id) {
            return Ok(OrderStatusQuery::Done(*state));
        }
        if let Some(state) = self.active_state(order_id) {
            return Ok(OrderStatusQuery::Active(state));
        }
        Err(OrderError::UnknownOrder)
    }

    fn active_state(&self, order_id: OrderId) -> Option<OrderState> {
        let aref = self.active.get(&order_id)?;
        let order = self.levels[aref.level_idx]
            .orders
            .iter()
            .find(|o| o.id == order_id)
            .expect("active map entry points at a live order in its level");
        let filled_size = order.original_size - order.remaining_size;
        let average_price = if filled_size > 0 {
            order.filled_value as f64 / filled_size as f64
        } else {
            0.0
        };
        Some(OrderState {
            filled_size,
            remaining_size: order.remaining_size,
            average_price,
        })
    }

    /// Cancels a still-active order, removing it from its level and
    /// returning its fill state at the moment of cancellation.
    pub fn cancel(&mut self, order_id: OrderId) -> Result<OrderState, OrderError> {
        if self.done.contains_key(&order_id) {
            return Err(OrderError::AlreadyFilled);
        }
        let aref = *self.active.get(&order_id).ok_or(OrderError::UnknownOrder)?;

        let level = &mut self.levels[aref.level_idx];
        let pos = level
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .expect("active map entry points at a live order in its level");
        let removed = level.orders.remove(pos).unwrap();
        level.total_size -= removed.remaining_size;
        let now_empty = level.total_size == 0;

        self.active.remove(&order_id);
        if now_empty {
            self.unlink_level(aref.side, aref.level_idx as i64);
        }

        let filled_size = removed.original_size - removed.remaining_size;
        let average_price = if filled_size > 0 {
            removed.filled_value as f64 / filled_size as f64
        } else {
            0.0
        };
        Ok(OrderState {
            filled_size,
            remaining_size: removed.remaining_size,
            average_price,
        })
    }

    /// Changes an active order's price and/or size.
    ///
    /// A same-price update adjusts size in place, preserving the
    /// order's queue position (so it does not lose priority to orders
    /// behind it at that level). A price change cancels the order and
    /// re-submits the unfilled remainder at the new price under the
    /// same `order_id`, which may immediately cross the book.
    pub fn update(
        &mut self,
        order_id: OrderId,
        new_price: Price,
        new_size: Quantity,
    ) -> Result<OrderState, OrderError> {
        if self.done.contains_key(&order_id) {
            return Err(OrderError::AlreadyFilled);
        }
        let aref = *self.active.get(&order_id).ok_or(OrderError::UnknownOrder)?;
        self.validate_order_params(new_price, new_size)?;

        let (old_price, already_filled) = {
            let level = &self.levels[aref.level_idx];
            let order = level
                .orders
                .iter()
                .find(|o| o.id == order_id)
                .expect("active map entry points at a live order in its level");
            (order.price, order.original_size - order.remaining_size)
        };

        if new_size <= already_filled {
            return Err(OrderError::InvalidSize);
        }

        if new_price == old_price {
            let level = &mut self.levels[aref.level_idx];
            let order = level
                .orders
                .iter_mut()
                .find(|o| o.id == order_id)
                .expect("active map entry points at a live order in its level");
            let new_remaining = new_size - already_filled;
            level.total_size = level.total_size - order.remaining_size + new_remaining;
            order.original_size = new_size;
            order.remaining_size = new_remaining;
            return Ok(self.active_state(order_id).unwrap());
        }

        let level = &mut self.levels[aref.level_idx];
        let pos = level
            .orders
            .iter()
            .position(|o| o.id == order_id)
            .expect("active map entry points at a live order in its level");
        let removed = level.orders.remove(pos).unwrap();
        level.total_size -= removed.remaining_size;
        let now_empty = level.total_size == 0;
        self.active.remove(&order_id);
        if now_empty {
            self.unlink_level(aref.side, aref.level_idx as i64);
        }

        let remainder = new_size - already_filled;
        self.match_and_rest(order_id, new_price, remainder, aref.side);

        Ok(match self.order_status(order_id).unwrap() {
            OrderStatusQuery::Active(state) => state,
            OrderStatusQuery::Done(state) => state,
        })
    }
}
