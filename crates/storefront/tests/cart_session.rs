//! Cart session behavior against an in-memory commerce backend.

#![allow(clippy::unwrap_used)]

mod common;

use common::{FailOp, FakeCommerce};
use rust_decimal::Decimal;
use shopfront_core::Sku;
use shopfront_storefront::{CartSession, CartState, CommerceError};

fn sku(s: &str) -> Sku {
    Sku::parse(s).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn session() -> (CartSession<FakeCommerce>, FakeCommerce) {
    let api = FakeCommerce::new(&[("TSHIRT", "25.00"), ("MUG-01", "12.50")]);
    (CartSession::new(api.clone()), api)
}

#[tokio::test]
async fn test_hydrate_without_session_settles_empty() {
    let (cart, api) = session();
    assert_eq!(cart.state(), CartState::NotLoaded);

    cart.hydrate().await.unwrap();

    assert_eq!(cart.state(), CartState::Empty);
    assert!(!cart.is_busy());
    // Absence of a token never produced a remote call.
    assert_eq!(api.calls().get, 0);
}

#[tokio::test]
async fn test_adding_same_sku_twice_merges_lines() {
    let (cart, _api) = session();

    cart.add_to_cart(&sku("TSHIRT"), 2).await.unwrap();
    let snapshot = cart.add_to_cart(&sku("TSHIRT"), 3).await.unwrap();

    assert_eq!(snapshot.lines.len(), 1);
    let line = snapshot.line(&sku("TSHIRT")).unwrap();
    assert_eq!(line.quantity, 5);
    assert_eq!(snapshot.subtotal, dec("125.00"));
}

#[tokio::test]
async fn test_subtotal_matches_line_sum_across_mutations() {
    let (cart, _api) = session();

    let s1 = cart.add_to_cart(&sku("TSHIRT"), 2).await.unwrap();
    assert_eq!(s1.subtotal, s1.computed_subtotal());

    let s2 = cart.add_to_cart(&sku("MUG-01"), 4).await.unwrap();
    assert_eq!(s2.subtotal, s2.computed_subtotal());
    assert_eq!(s2.subtotal, dec("100.00"));

    let s3 = cart.update_cart(&sku("TSHIRT"), 1).await.unwrap();
    assert_eq!(s3.subtotal, s3.computed_subtotal());
    assert_eq!(s3.subtotal, dec("75.00"));

    let s4 = cart.remove_from_cart(&sku("MUG-01")).await.unwrap();
    assert_eq!(s4.subtotal, s4.computed_subtotal());
    assert_eq!(s4.subtotal, dec("25.00"));
}

#[tokio::test]
async fn test_line_count_totals_quantities_across_lines() {
    let (cart, _api) = session();

    cart.add_to_cart(&sku("TSHIRT"), 2).await.unwrap();
    cart.add_to_cart(&sku("MUG-01"), 4).await.unwrap();

    // Two lines, six items: the count is item quantity, not distinct lines.
    assert_eq!(cart.snapshot().unwrap().lines.len(), 2);
    assert_eq!(cart.line_count(), 6);
}

#[tokio::test]
async fn test_removing_absent_sku_is_idempotent() {
    let (cart, _api) = session();
    cart.add_to_cart(&sku("TSHIRT"), 2).await.unwrap();
    let before = cart.snapshot().unwrap();

    let after = cart.remove_from_cart(&sku("MUG-01")).await.unwrap();

    assert_eq!(after.subtotal, before.subtotal);
    assert_eq!(after.lines, before.lines);
}

#[tokio::test]
async fn test_update_to_zero_rejected_before_network() {
    let (cart, api) = session();
    cart.add_to_cart(&sku("TSHIRT"), 2).await.unwrap();
    let before = cart.snapshot().unwrap();

    let err = cart.update_cart(&sku("TSHIRT"), 0).await.unwrap_err();

    assert!(matches!(err, CommerceError::Validation(_)));
    // The request never reached the backend.
    assert_eq!(api.calls().update, 0);
    assert_eq!(cart.snapshot().unwrap(), before);
    assert!(!cart.is_busy());
}

#[tokio::test]
async fn test_failed_mutation_leaves_snapshot_intact() {
    let (cart, api) = session();
    cart.add_to_cart(&sku("TSHIRT"), 2).await.unwrap();
    let before = cart.snapshot().unwrap();

    api.fail_next(FailOp::Update);
    let err = cart.update_cart(&sku("TSHIRT"), 7).await.unwrap_err();

    assert!(matches!(err, CommerceError::Rejected { .. }));
    assert_eq!(cart.snapshot().unwrap(), before);
    assert!(!cart.is_busy());
}

#[tokio::test]
async fn test_session_token_assigned_on_first_add_and_stable() {
    let (cart, _api) = session();

    let first = cart.add_to_cart(&sku("TSHIRT"), 1).await.unwrap();
    let token = first.session_token.clone().unwrap();

    let second = cart.add_to_cart(&sku("MUG-01"), 1).await.unwrap();
    assert_eq!(second.session_token.as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn test_removing_last_line_settles_empty() {
    let (cart, _api) = session();
    cart.add_to_cart(&sku("TSHIRT"), 1).await.unwrap();

    cart.remove_from_cart(&sku("TSHIRT")).await.unwrap();

    assert_eq!(cart.state(), CartState::Empty);
    assert_eq!(cart.subtotal(), Decimal::ZERO);
    assert_eq!(cart.line_count(), 0);
}

#[tokio::test]
async fn test_clear_drops_cart_and_session() {
    let (cart, api) = session();
    cart.add_to_cart(&sku("TSHIRT"), 3).await.unwrap();

    cart.clear().await.unwrap();

    assert_eq!(cart.state(), CartState::Empty);
    assert_eq!(api.calls().clear, 1);
}
