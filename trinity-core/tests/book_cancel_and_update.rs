mod common;

use common::fresh_book;
use trinity_core::prelude::*;

#[test]
fn cancelling_a_resting_order_removes_it_from_the_book() {
    let mut book = fresh_book();
    let id = book.add_order(100, 10, Side::Bid).unwrap();

    let state = book.cancel(id).unwrap();
    assert_eq!(state.remaining_size, 10);
    assert_eq!(state.filled_size, 0);
    assert_eq!(book.l1().best_bid, None);
    assert_eq!(book.cancel(id), Err(OrderError::UnknownOrder));
}

#[test]
fn cancelling_a_partially_filled_order_reports_what_already_filled() {
    let mut book = fresh_book();
    let id = book.add_order(100, 10, Side::Bid).unwrap();
    book.add_order(100, 4, Side::Offer).unwrap();

    let state = book.cancel(id).unwrap();
    assert_eq!(state.filled_size, 4);
    assert_eq!(state.remaining_size, 6);
    assert_eq!(state.average_price, 100.0);
}

#[test]
fn cancelling_a_fully_filled_order_fails_as_already_filled() {
    let mut book = fresh_book();
    let id = book.add_order(100, 10, Side::Bid).unwrap();
    book.add_order(100, 10, Side::Offer).unwrap();

    assert_eq!(book.cancel(id), Err(OrderError::AlreadyFilled));
}

#[test]
fn cancelling_an_unknown_id_fails() {
    let mut book = fresh_book();
    assert_eq!(book.cancel(42), Err(OrderError::UnknownOrder));
}

#[test]
fn same_price_update_adjusts_size_and_preserves_queue_position() {
    let mut book = fresh_book();
    let first = book.add_order(100, 10, Side::Bid).unwrap();
    let second = book.add_order(100, 10, Side::Bid).unwrap();

    book.add_order(100, 2, Side::Offer).unwrap();
    let state = book.update(first, 100, 8).unwrap();
    assert_eq!(state.filled_size, 2);
    assert_eq!(state.remaining_size, 6);

    // `first` kept its place at the front of the queue: a subsequent
    // offer should still hit it before `second`.
    book.add_order(100, 6, Side::Offer).unwrap();
    assert!(matches!(book.order_status(first).unwrap(), OrderStatusQuery::Done(_)));
    assert!(matches!(book.order_status(second).unwrap(), OrderStatusQuery::Active(_)));
}

#[test]
fn an_update_that_does_not_change_anything_is_a_no_op() {
    let mut book = fresh_book();
    let id = book.add_order(100, 10, Side::Bid).unwrap();
    book.update(id, 100, 10).unwrap();

    match book.order_status(id).unwrap() {
        OrderStatusQuery::Active(state) => {
            assert_eq!(state.remaining_size, 10);
            assert_eq!(state.filled_size, 0);
        }
        OrderStatusQuery::Done(_) => panic!("order should still be resting"),
    }
    assert_eq!(book.l1().best_bid, Some((100, 10)));
}

#[test]
fn updating_the_price_moves_the_order_and_can_immediately_cross() {
    let mut book = fresh_book();
    book.add_order(101, 5, Side::Offer).unwrap();
    let id = book.add_order(100, 5, Side::Bid).unwrap();

    let state = book.update(id, 101, 5).unwrap();
    assert_eq!(state.filled_size, 5);
    assert_eq!(state.remaining_size, 0);
    assert_eq!(state.average_price, 101.0);
    assert_eq!(book.l1().best_offer, None);
}

#[test]
fn update_rejects_shrinking_below_what_already_filled() {
    let mut book = fresh_book();
    let id = book.add_order(100, 10, Side::Bid).unwrap();
    book.add_order(100, 7, Side::Offer).unwrap();

    assert_eq!(book.update(id, 100, 7), Err(OrderError::InvalidSize));
}

#[test]
fn update_on_an_unknown_or_filled_order_fails() {
    let mut book = fresh_book();
    assert_eq!(book.update(42, 100, 10), Err(OrderError::UnknownOrder));

    let id = book.add_order(100, 5, Side::Bid).unwrap();
    book.add_order(100, 5, Side::Offer).unwrap();
    assert_eq!(book.update(id, 100, 10), Err(OrderError::AlreadyFilled));
}
