extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{assigned_minter, fund, mintable_project, set_time, setup, Fixture};
use crate::{invariants, Error, MinterKind};

const START_PRICE: i128 = 100_000_000; // 10 units at 7 decimals
const BASE_PRICE: i128 = 500_000;
const HALF_LIFE: u64 = 1_800;
const START_TIME: u64 = 1_000;

fn settlement_fixture() -> (Fixture, Address, u32, u32) {
    let fix = setup();
    let artist = Address::generate(&fix.env);
    let project_id = mintable_project(&fix, &artist);
    let minter_id = assigned_minter(&fix, &artist, project_id, MinterKind::DaExpSettlement);
    fix.client.set_auction_details_exp(
        &artist,
        &minter_id,
        &project_id,
        &START_TIME,
        &HALF_LIFE,
        &START_PRICE,
        &BASE_PRICE,
    );
    (fix, artist, project_id, minter_id)
}

#[test]
fn settlement_auction_settles_everyone_at_the_floor() {
    let (fix, artist, project_id, minter_id) = settlement_fixture();
    let alice = Address::generate(&fix.env);
    let bob = Address::generate(&fix.env);
    fund(&fix, &alice, START_PRICE);
    fund(&fix, &bob, START_PRICE);

    // Alice buys at the opening price, Bob one half-life later.
    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &START_PRICE, &None);
    set_time(&fix.env, START_TIME + HALF_LIFE);
    fix.client
        .purchase(&minter_id, &project_id, &bob, &50_000_000i128, &None);

    // The full payments stay escrowed in the contract.
    assert_eq!(fix.token.balance(&alice), 0);
    assert_eq!(fix.token.balance(&bob), 50_000_000);
    assert_eq!(fix.token.balance(&fix.client.address), 150_000_000);
    assert_eq!(fix.token.balance(&artist), 0);

    let receipt = fix.client.get_receipt(&minter_id, &project_id, &alice);
    assert_eq!(receipt.net_posted, START_PRICE);
    assert_eq!(receipt.num_purchased, 1);

    // Once the decay hits the floor, the clearing price is the base price.
    set_time(&fix.env, 100_000);
    invariants::assert_refund_non_negative(START_PRICE, BASE_PRICE);
    assert_eq!(
        fix.client.claim_refund(&minter_id, &project_id, &alice),
        99_500_000
    );
    assert_eq!(
        fix.client.claim_refund(&minter_id, &project_id, &bob),
        49_500_000
    );
    assert_eq!(fix.token.balance(&alice), 99_500_000);
    assert_eq!(fix.token.balance(&bob), 99_500_000);

    // Two mints at the clearing price flow through the splitter.
    fix.client
        .withdraw_revenues(&artist, &minter_id, &project_id);
    assert_eq!(fix.token.balance(&fix.render), 100_000);
    assert_eq!(fix.token.balance(&fix.platform), 25_000);
    assert_eq!(fix.token.balance(&artist), 875_000);
    assert_eq!(fix.token.balance(&fix.client.address), 0);
}

#[test]
fn a_receipt_pays_out_exactly_once() {
    let (fix, _artist, project_id, minter_id) = settlement_fixture();
    let alice = Address::generate(&fix.env);
    fund(&fix, &alice, START_PRICE);

    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &START_PRICE, &None);

    set_time(&fix.env, 100_000);
    fix.client.claim_refund(&minter_id, &project_id, &alice);
    let receipt = fix.client.get_receipt(&minter_id, &project_id, &alice);
    assert!(receipt.claimed);
    let result = fix.client.try_claim_refund(&minter_id, &project_id, &alice);
    assert_eq!(result, Err(Ok(Error::DoubleClaim.into())));
    assert_eq!(fix.token.balance(&alice), 99_500_000);
}

#[test]
fn strangers_have_nothing_to_claim() {
    let (fix, _artist, project_id, minter_id) = settlement_fixture();
    let stranger = Address::generate(&fix.env);

    set_time(&fix.env, 100_000);
    let result = fix
        .client
        .try_claim_refund(&minter_id, &project_id, &stranger);
    assert_eq!(result, Err(Ok(Error::NothingToClaim.into())));
}

#[test]
fn refunds_wait_for_a_clearing_price() {
    let (fix, artist, project_id, minter_id) = settlement_fixture();
    let alice = Address::generate(&fix.env);
    fund(&fix, &alice, START_PRICE);

    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &START_PRICE, &None);

    // Mid-auction: no clearing price yet, nothing can be claimed or paid out.
    set_time(&fix.env, START_TIME + HALF_LIFE);
    let result = fix.client.try_claim_refund(&minter_id, &project_id, &alice);
    assert_eq!(result, Err(Ok(Error::AuctionNotFinalized.into())));
    let result = fix
        .client
        .try_withdraw_revenues(&artist, &minter_id, &project_id);
    assert_eq!(result, Err(Ok(Error::AuctionNotFinalized.into())));
}

#[test]
fn early_finalize_clears_at_the_latest_purchase_price() {
    let (fix, artist, project_id, minter_id) = settlement_fixture();
    let alice = Address::generate(&fix.env);
    let bob = Address::generate(&fix.env);
    fund(&fix, &alice, START_PRICE);
    fund(&fix, &bob, 50_000_000);

    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &START_PRICE, &None);
    set_time(&fix.env, START_TIME + HALF_LIFE);
    fix.client
        .purchase(&minter_id, &project_id, &bob, &50_000_000i128, &None);

    set_time(&fix.env, START_TIME + HALF_LIFE + 200);
    fix.client
        .finalize_auction(&artist, &minter_id, &project_id);

    // Alice settles down to Bob's price. Bob paid exactly the clearing
    // price, so his one claim yields zero and only a repeat is an error.
    assert_eq!(
        fix.client.claim_refund(&minter_id, &project_id, &alice),
        50_000_000
    );
    assert_eq!(fix.client.claim_refund(&minter_id, &project_id, &bob), 0);
    assert_eq!(fix.token.balance(&bob), 0);
    let result = fix.client.try_claim_refund(&minter_id, &project_id, &bob);
    assert_eq!(result, Err(Ok(Error::DoubleClaim.into())));

    // No further purchases after finalization.
    let late = Address::generate(&fix.env);
    fund(&fix, &late, START_PRICE);
    let result = fix
        .client
        .try_purchase(&minter_id, &project_id, &late, &START_PRICE, &None);
    assert_eq!(result, Err(Ok(Error::AuctionAlreadyFinalized.into())));
}

#[test]
fn finalize_without_purchases_clears_at_the_current_price() {
    let (fix, artist, project_id, minter_id) = settlement_fixture();

    set_time(&fix.env, START_TIME + HALF_LIFE);
    fix.client
        .finalize_auction(&artist, &minter_id, &project_id);

    // Nothing was sold, so the revenue withdrawal moves nothing.
    fix.client
        .withdraw_revenues(&artist, &minter_id, &project_id);
    assert_eq!(fix.token.balance(&artist), 0);
    assert_eq!(fix.token.balance(&fix.render), 0);

    let result = fix
        .client
        .try_finalize_auction(&artist, &minter_id, &project_id);
    assert_eq!(result, Err(Ok(Error::AuctionAlreadyFinalized.into())));
}

#[test]
fn sellout_fixes_the_clearing_price_at_the_last_sale() {
    let (fix, artist, project_id, minter_id) = settlement_fixture();
    fix.client
        .update_max_invocations(&artist, &project_id, &2u64);
    let alice = Address::generate(&fix.env);
    let bob = Address::generate(&fix.env);
    fund(&fix, &alice, START_PRICE);
    fund(&fix, &bob, 50_000_000);

    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &START_PRICE, &None);
    set_time(&fix.env, START_TIME + HALF_LIFE);
    fix.client
        .purchase(&minter_id, &project_id, &bob, &50_000_000i128, &None);

    // The second sale sold the project out and finalized the auction at
    // 50_000_000; refunds are claimable immediately.
    assert_eq!(
        fix.client.claim_refund(&minter_id, &project_id, &alice),
        50_000_000
    );
    fix.client
        .withdraw_revenues(&artist, &minter_id, &project_id);
    // 100_000_000 of revenue: 10% render, 2.5% platform, rest to the artist.
    assert_eq!(fix.token.balance(&fix.render), 10_000_000);
    assert_eq!(fix.token.balance(&fix.platform), 2_500_000);
    assert_eq!(fix.token.balance(&artist), 87_500_000);
}

#[test]
fn revenues_are_collected_exactly_once() {
    let (fix, artist, project_id, minter_id) = settlement_fixture();
    let alice = Address::generate(&fix.env);
    fund(&fix, &alice, START_PRICE);

    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &START_PRICE, &None);

    set_time(&fix.env, 100_000);
    fix.client
        .withdraw_revenues(&artist, &minter_id, &project_id);
    let result = fix
        .client
        .try_withdraw_revenues(&artist, &minter_id, &project_id);
    assert_eq!(result, Err(Ok(Error::RevenuesAlreadyCollected.into())));

    // The withdrawal locked the floor in as the final clearing price, so the
    // escrow still covers Alice's refund afterwards.
    assert_eq!(
        fix.client.claim_refund(&minter_id, &project_id, &alice),
        99_500_000
    );
    assert_eq!(fix.token.balance(&fix.client.address), 0);
}

#[test]
fn overpayment_is_retained_and_settled_later() {
    let (fix, _artist, project_id, minter_id) = settlement_fixture();
    let alice = Address::generate(&fix.env);
    fund(&fix, &alice, 120_000_000);

    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &120_000_000i128, &None);

    // No instant refund through a settlement minter.
    assert_eq!(fix.token.balance(&alice), 0);
    let receipt = fix.client.get_receipt(&minter_id, &project_id, &alice);
    assert_eq!(receipt.net_posted, 120_000_000);

    set_time(&fix.env, 100_000);
    assert_eq!(
        fix.client.claim_refund(&minter_id, &project_id, &alice),
        119_500_000
    );
}

#[test]
fn settlement_details_are_frozen_once_purchases_exist() {
    let (fix, artist, project_id, minter_id) = settlement_fixture();
    let alice = Address::generate(&fix.env);
    fund(&fix, &alice, START_PRICE);

    set_time(&fix.env, START_TIME);
    fix.client
        .purchase(&minter_id, &project_id, &alice, &START_PRICE, &None);

    // Neither a reconfiguration nor a reset may orphan Alice's receipt.
    let result = fix.client.try_set_auction_details_exp(
        &artist,
        &minter_id,
        &project_id,
        &(START_TIME + 10_000),
        &HALF_LIFE,
        &START_PRICE,
        &BASE_PRICE,
    );
    assert_eq!(result, Err(Ok(Error::InvalidTransition.into())));
    let result = fix
        .client
        .try_reset_auction_details(&artist, &minter_id, &project_id);
    assert_eq!(result, Err(Ok(Error::InvalidTransition.into())));
}

#[test]
fn finalization_is_not_open_to_outsiders() {
    let (fix, _artist, project_id, minter_id) = settlement_fixture();
    let outsider = Address::generate(&fix.env);

    set_time(&fix.env, START_TIME);
    let result = fix
        .client
        .try_finalize_auction(&outsider, &minter_id, &project_id);
    assert_eq!(result, Err(Ok(Error::NotAuthorized.into())));
}
