mod common;

use common::fresh_book;
use trinity_core::prelude::*;

#[test]
fn a_resting_order_with_no_opposite_side_just_rests() {
    let mut book = fresh_book();
    let id = book.add_order(100, 10, Side::Bid).unwrap();

    let l1 = book.l1();
    assert_eq!(l1.best_bid, Some((100, 10)));
    assert_eq!(l1.best_offer, None);

    match book.order_status(id).unwrap() {
        OrderStatusQuery::Active(state) => {
            assert_eq!(state.filled_size, 0);
            assert_eq!(state.remaining_size, 10);
            assert_eq!(state.average_price, 0.0);
        }
        OrderStatusQuery::Done(_) => panic!("order should still be resting"),
    }
}

#[test]
fn a_crossing_order_fills_against_the_best_resting_price_first() {
    let mut book = fresh_book();
    book.add_order(99, 5, Side::Bid).unwrap();
    book.add_order(100, 5, Side::Bid).unwrap();

    let offer_id = book.add_order(99, 5, Side::Offer).unwrap();

    // The better (higher) bid at 100 should have been hit first, not
    // the earlier-placed 99 bid.
    match book.order_status(offer_id).unwrap() {
        OrderStatusQuery::Done(state) => {
            assert_eq!(state.filled_size, 5);
            assert_eq!(state.average_price, 100.0);
        }
        OrderStatusQuery::Active(_) => panic!("offer should have fully filled"),
    }

    assert_eq!(book.l1().best_bid, Some((99, 5)));
}

#[test]
fn a_partially_filled_resting_order_keeps_its_remainder_at_the_front() {
    let mut book = fresh_book();
    let bid_id = book.add_order(100, 10, Side::Bid).unwrap();
    book.add_order(100, 4, Side::Offer).unwrap();

    match book.order_status(bid_id).unwrap() {
        OrderStatusQuery::Active(state) => {
            assert_eq!(state.filled_size, 4);
            assert_eq!(state.remaining_size, 6);
            assert_eq!(state.average_price, 100.0);
        }
        OrderStatusQuery::Done(_) => panic!("bid should still have a remainder resting"),
    }
    assert_eq!(book.l1().best_bid, Some((100, 6)));
}

#[test]
fn an_incoming_order_can_walk_through_multiple_price_levels() {
    let mut book = fresh_book();
    book.add_order(100, 5, Side::Offer).unwrap();
    book.add_order(101, 5, Side::Offer).unwrap();
    book.add_order(102, 5, Side::Offer).unwrap();

    let bid_id = book.add_order(102, 12, Side::Bid).unwrap();

    match book.order_status(bid_id).unwrap() {
        OrderStatusQuery::Done(state) => {
            // 5 @ 100, 5 @ 101, 2 @ 102
            assert_eq!(state.filled_size, 12);
            let expected_avg = (5.0 * 100.0 + 5.0 * 101.0 + 2.0 * 102.0) / 12.0;
            assert!((state.average_price - expected_avg).abs() < 1e-9);
            assert_eq!(state.remaining_size, 0);
        }
        OrderStatusQuery::Active(_) => panic!("bid should have fully filled across three price levels"),
    }

    let l2 = book.l2();
    assert_eq!(l2.offers, vec![(102, 3)]);
    assert_eq!(l2.bids, vec![]);
}

#[test]
fn orders_at_the_same_price_fill_in_fifo_arrival_order() {
    let mut book = fresh_book();
    let first = book.add_order(100, 5, Side::Bid).unwrap();
    let second = book.add_order(100, 5, Side::Bid).unwrap();

    book.add_order(100, 5, Side::Offer).unwrap();

    assert!(matches!(book.order_status(first).unwrap(), OrderStatusQuery::Done(_)));
    assert!(matches!(book.order_status(second).unwrap(), OrderStatusQuery::Active(_)));
}

#[test]
fn invalid_price_and_size_are_rejected_without_mutating_the_book() {
    let mut book = OrderBook::new(1000, 5).unwrap();
    assert_eq!(book.add_order(7, 10, Side::Bid), Err(OrderError::InvalidPrice));
    assert_eq!(book.add_order(2000, 10, Side::Bid), Err(OrderError::InvalidPrice));
    assert_eq!(book.add_order(100, 0, Side::Bid), Err(OrderError::InvalidSize));
    assert_eq!(book.l1(), L1::default());
}

#[test]
fn price_zero_is_the_bottom_of_the_valid_range_not_invalid() {
    let mut book = OrderBook::new(1000, 5).unwrap();
    let id = book.add_order(0, 10, Side::Bid).unwrap();

    assert_eq!(book.l1().best_bid, Some((0, 10)));
    match book.order_status(id).unwrap() {
        OrderStatusQuery::Active(state) => assert_eq!(state.remaining_size, 10),
        OrderStatusQuery::Done(_) => panic!("order should still be resting"),
    }
}
