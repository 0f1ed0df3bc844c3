extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{assigned_minter, fund, mintable_project, set_time, setup};
use crate::{invariants, Error, MinterKind};

fn linear_fixture() -> (crate::test::Fixture, Address, u32, u32) {
    let fix = setup();
    let artist = Address::generate(&fix.env);
    let project_id = mintable_project(&fix, &artist);
    let minter_id = assigned_minter(&fix, &artist, project_id, MinterKind::DaLinear);
    (fix, artist, project_id, minter_id)
}

fn exp_fixture() -> (crate::test::Fixture, Address, u32, u32) {
    let fix = setup();
    let artist = Address::generate(&fix.env);
    let project_id = mintable_project(&fix, &artist);
    let minter_id = assigned_minter(&fix, &artist, project_id, MinterKind::DaExpSettlement);
    (fix, artist, project_id, minter_id)
}

#[test]
fn linear_price_decays_to_the_base() {
    let (fix, artist, project_id, minter_id) = linear_fixture();
    // 1_000 down to 100 over two hours.
    fix.client.set_auction_details_linear(
        &artist, &minter_id, &project_id, &1_000u64, &8_200u64, &1_000i128, &100i128,
    );

    set_time(&fix.env, 1_000);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 1_000);

    set_time(&fix.env, 4_600); // halfway
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 550);

    set_time(&fix.env, 8_200);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 100);

    // The price stays at the floor after the end.
    set_time(&fix.env, 50_000);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 100);
}

#[test]
fn exp_price_halves_every_half_life() {
    let (fix, artist, project_id, minter_id) = exp_fixture();
    fix.client.set_auction_details_exp(
        &artist, &minter_id, &project_id, &1_000u64, &600u64, &1_000i128, &50i128,
    );

    set_time(&fix.env, 1_000);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 1_000);

    // Halfway through a half-life the interpolation takes a quarter off.
    set_time(&fix.env, 1_300);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 750);

    set_time(&fix.env, 1_600);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 500);

    set_time(&fix.env, 2_200);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 250);

    // Deep into the decay the price clamps to the base.
    set_time(&fix.env, 100_000);
    assert_eq!(fix.client.get_price_info(&minter_id, &project_id).price, 50);
}

#[test]
fn decay_prices_never_increase() {
    let (fix, artist, project_id, minter_id) = exp_fixture();
    fix.client.set_auction_details_exp(
        &artist, &minter_id, &project_id, &1_000u64, &600u64, &1_000_000i128, &1_000i128,
    );

    let mut prices = std::vec::Vec::new();
    let mut t = 1_000u64;
    while t <= 20_000 {
        set_time(&fix.env, t);
        prices.push(fix.client.get_price_info(&minter_id, &project_id).price);
        t += 97;
    }
    invariants::assert_price_non_increasing(&prices);
    assert_eq!(*prices.last().unwrap(), 1_000);
}

#[test]
fn price_info_reports_the_start_price_before_the_auction_begins() {
    let (fix, artist, project_id, minter_id) = linear_fixture();
    fix.client.set_auction_details_linear(
        &artist, &minter_id, &project_id, &5_000u64, &10_000u64, &900i128, &100i128,
    );

    set_time(&fix.env, 1_000);
    let info = fix.client.get_price_info(&minter_id, &project_id);
    assert!(info.configured);
    assert_eq!(info.price, 900);
}

#[test]
fn price_info_reports_unconfigured_pairs() {
    let (fix, _artist, project_id, minter_id) = linear_fixture();
    let info = fix.client.get_price_info(&minter_id, &project_id);
    assert!(!info.configured);
    assert_eq!(info.price, 0);
}

#[test]
fn purchases_before_the_start_are_rejected() {
    let (fix, artist, project_id, minter_id) = linear_fixture();
    let buyer = Address::generate(&fix.env);
    fix.client.set_auction_details_linear(
        &artist, &minter_id, &project_id, &5_000u64, &10_000u64, &900i128, &100i128,
    );
    fund(&fix, &buyer, 900);

    set_time(&fix.env, 4_999);
    let result = fix
        .client
        .try_purchase(&minter_id, &project_id, &buyer, &900i128, &None);
    assert_eq!(result, Err(Ok(Error::AuctionNotStarted.into())));
}

#[test]
fn linear_purchase_pays_the_current_price_and_refunds_the_rest() {
    let (fix, artist, project_id, minter_id) = linear_fixture();
    let buyer = Address::generate(&fix.env);
    fix.client.set_auction_details_linear(
        &artist, &minter_id, &project_id, &1_000u64, &8_200u64, &1_000i128, &100i128,
    );
    fund(&fix, &buyer, 1_000);

    set_time(&fix.env, 4_600);
    fix.client
        .purchase(&minter_id, &project_id, &buyer, &1_000i128, &None);

    // Current price is 550; the excess 450 comes straight back.
    assert_eq!(fix.token.balance(&buyer), 450);
    assert_eq!(
        fix.token.balance(&fix.render) + fix.token.balance(&fix.platform) + fix.token.balance(&artist),
        550
    );
}

#[test]
fn linear_parameters_are_validated() {
    let (fix, artist, project_id, minter_id) = linear_fixture();

    // Shorter than the minimum auction length.
    let result = fix.client.try_set_auction_details_linear(
        &artist, &minter_id, &project_id, &1_000u64, &2_000u64, &900i128, &100i128,
    );
    assert_eq!(result, Err(Ok(Error::InvalidAuctionParams.into())));

    // Start price not above the base.
    let result = fix.client.try_set_auction_details_linear(
        &artist, &minter_id, &project_id, &1_000u64, &8_200u64, &100i128, &100i128,
    );
    assert_eq!(result, Err(Ok(Error::InvalidAuctionParams.into())));

    // Non-positive base.
    let result = fix.client.try_set_auction_details_linear(
        &artist, &minter_id, &project_id, &1_000u64, &8_200u64, &900i128, &0i128,
    );
    assert_eq!(result, Err(Ok(Error::InvalidAuctionParams.into())));
}

#[test]
fn exp_half_life_is_bounded() {
    let (fix, artist, project_id, minter_id) = exp_fixture();

    let result = fix.client.try_set_auction_details_exp(
        &artist, &minter_id, &project_id, &1_000u64, &299u64, &900i128, &100i128,
    );
    assert_eq!(result, Err(Ok(Error::InvalidAuctionParams.into())));

    let result = fix.client.try_set_auction_details_exp(
        &artist, &minter_id, &project_id, &1_000u64, &3_601u64, &900i128, &100i128,
    );
    assert_eq!(result, Err(Ok(Error::InvalidAuctionParams.into())));

    fix.client.set_auction_details_exp(
        &artist, &minter_id, &project_id, &1_000u64, &300u64, &900i128, &100i128,
    );
}

#[test]
fn a_started_auction_is_frozen_until_reset() {
    let (fix, artist, project_id, minter_id) = linear_fixture();
    fix.client.set_auction_details_linear(
        &artist, &minter_id, &project_id, &1_000u64, &8_200u64, &900i128, &100i128,
    );

    // Before the start the details may still be replaced.
    fix.client.set_auction_details_linear(
        &artist, &minter_id, &project_id, &1_000u64, &8_200u64, &800i128, &100i128,
    );

    set_time(&fix.env, 2_000);
    let result = fix.client.try_set_auction_details_linear(
        &artist, &minter_id, &project_id, &9_000u64, &20_000u64, &800i128, &100i128,
    );
    assert_eq!(result, Err(Ok(Error::InvalidTransition.into())));

    // Resetting reopens configuration.
    fix.client
        .reset_auction_details(&artist, &minter_id, &project_id);
    assert!(!fix.client.get_price_info(&minter_id, &project_id).configured);
    fix.client.set_auction_details_linear(
        &artist, &minter_id, &project_id, &9_000u64, &20_000u64, &800i128, &100i128,
    );
}

#[test]
fn strategy_kind_and_configuration_must_match() {
    let (fix, artist, project_id, minter_id) = linear_fixture();

    // A fixed price cannot be set on a linear decay minter.
    let result = fix
        .client
        .try_set_fixed_price(&artist, &minter_id, &project_id, &100i128);
    assert_eq!(result, Err(Ok(Error::InvalidTransition.into())));

    let result = fix.client.try_set_auction_details_exp(
        &artist, &minter_id, &project_id, &1_000u64, &600u64, &900i128, &100i128,
    );
    assert_eq!(result, Err(Ok(Error::InvalidTransition.into())));
}

#[test]
fn fixed_price_must_be_positive() {
    let fix = setup();
    let artist = Address::generate(&fix.env);
    let project_id = mintable_project(&fix, &artist);
    let minter_id = assigned_minter(&fix, &artist, project_id, MinterKind::SetPrice);

    let result = fix
        .client
        .try_set_fixed_price(&artist, &minter_id, &project_id, &0i128);
    assert_eq!(result, Err(Ok(Error::InvalidAuctionParams.into())));
}

#[test]
fn pricing_configuration_is_artist_only() {
    let (fix, _artist, project_id, minter_id) = linear_fixture();
    let outsider = Address::generate(&fix.env);

    let result = fix.client.try_set_auction_details_linear(
        &outsider, &minter_id, &project_id, &1_000u64, &8_200u64, &900i128, &100i128,
    );
    assert_eq!(result, Err(Ok(Error::NotAuthorized.into())));
}
