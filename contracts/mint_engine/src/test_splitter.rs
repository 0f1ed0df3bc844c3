extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, panic_with_error, symbol_short, testutils::Address as _,
    Address, Env,
};

use crate::splitter::compute_shares;
use crate::test::{assigned_minter, fund, mintable_project, setup, PLATFORM_BPS, RENDER_BPS};
use crate::{invariants, Error, MintEngine, MintEngineClient, MinterKind};

#[test]
fn shares_sum_to_the_amount_exactly() {
    // Awkward amounts whose bps shares all truncate.
    for amount in [1i128, 3, 7, 99, 101, 9_999, 10_001, 123_456_789] {
        let shares = compute_shares(amount, RENDER_BPS, PLATFORM_BPS, 1_337);
        invariants::assert_split_exact(amount, &shares);
    }
}

#[test]
fn truncation_remainders_accrue_to_the_artist() {
    // 7 * 1000 / 10000 and 7 * 250 / 10000 both truncate to zero.
    let shares = compute_shares(7, RENDER_BPS, PLATFORM_BPS, 0);
    assert_eq!(shares.render, 0);
    assert_eq!(shares.platform, 0);
    assert_eq!(shares.additional, 0);
    assert_eq!(shares.artist, 7);
}

#[test]
fn additional_share_is_a_fraction_of_the_remainder() {
    // Providers take 12.5% of 100_000; the additional payee's 20% applies to
    // the 87_500 that remains, not to the gross amount.
    let shares = compute_shares(100_000, RENDER_BPS, PLATFORM_BPS, 2_000);
    assert_eq!(shares.render, 10_000);
    assert_eq!(shares.platform, 2_500);
    assert_eq!(shares.additional, 17_500);
    assert_eq!(shares.artist, 70_000);
}

#[test]
fn full_provider_take_leaves_the_artist_nothing() {
    let shares = compute_shares(100_000, 9_000, 1_000, 0);
    assert_eq!(shares.artist, 0);
    invariants::assert_split_exact(100_000, &shares);
}

#[test]
fn provider_shares_above_the_denominator_are_rejected() {
    let fix = setup();
    let result = fix
        .client
        .try_update_provider_shares(&fix.admin, &9_000u32, &1_001u32);
    assert_eq!(result, Err(Ok(Error::InvalidShares.into())));

    let artist = Address::generate(&fix.env);
    let project_id = fix.client.add_project(&fix.admin, &artist);
    let payee = Address::generate(&fix.env);
    let result = fix
        .client
        .try_update_additional_payee(&artist, &project_id, &payee, &10_001u32);
    assert_eq!(result, Err(Ok(Error::InvalidShares.into())));
}

#[test]
fn updated_shares_apply_to_later_sales() {
    let fix = setup();
    let artist = Address::generate(&fix.env);
    let buyer = Address::generate(&fix.env);

    let project_id = mintable_project(&fix, &artist);
    let minter_id = assigned_minter(&fix, &artist, project_id, MinterKind::SetPrice);
    fix.client
        .set_fixed_price(&artist, &minter_id, &project_id, &10_000i128);
    fund(&fix, &buyer, 20_000);

    fix.client
        .purchase(&minter_id, &project_id, &buyer, &10_000i128, &None);
    assert_eq!(fix.token.balance(&fix.render), 1_000);

    // Halve the render share; only the next sale is affected.
    fix.client
        .update_provider_shares(&fix.admin, &500u32, &PLATFORM_BPS);
    fix.client
        .purchase(&minter_id, &project_id, &buyer, &10_000i128, &None);
    assert_eq!(fix.token.balance(&fix.render), 1_500);
    assert_eq!(fix.token.balance(&fix.platform), 500);
}

#[test]
fn updated_provider_addresses_receive_later_payouts() {
    let fix = setup();
    let artist = Address::generate(&fix.env);
    let buyer = Address::generate(&fix.env);
    let new_render = Address::generate(&fix.env);
    let new_platform = Address::generate(&fix.env);

    let project_id = mintable_project(&fix, &artist);
    let minter_id = assigned_minter(&fix, &artist, project_id, MinterKind::SetPrice);
    fix.client
        .set_fixed_price(&artist, &minter_id, &project_id, &10_000i128);
    fund(&fix, &buyer, 10_000);

    fix.client
        .update_provider_addresses(&fix.admin, &new_render, &new_platform);
    fix.client
        .purchase(&minter_id, &project_id, &buyer, &10_000i128, &None);

    assert_eq!(fix.token.balance(&fix.render), 0);
    assert_eq!(fix.token.balance(&new_render), 1_000);
    assert_eq!(fix.token.balance(&new_platform), 250);
}

/// Minimal SEP-41 surface backed by instance storage, able to refuse
/// transfers to chosen recipients. The stock Stellar asset cannot model a
/// refused payout because its issuer here is not authorization-revocable.
#[contract]
struct FreezableToken;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
enum FreezableTokenError {
    Frozen = 1,
}

#[contractimpl]
impl FreezableToken {
    pub fn mint(env: Env, to: Address, amount: i128) {
        let key = (symbol_short!("bal"), to);
        let balance: i128 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage().instance().set(&key, &(balance + amount));
    }

    pub fn freeze(env: Env, who: Address) {
        env.storage()
            .instance()
            .set(&(symbol_short!("frozen"), who), &true);
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        let frozen: bool = env
            .storage()
            .instance()
            .get(&(symbol_short!("frozen"), to.clone()))
            .unwrap_or(false);
        if frozen {
            panic_with_error!(&env, FreezableTokenError::Frozen);
        }
        let from_key = (symbol_short!("bal"), from);
        let to_key = (symbol_short!("bal"), to);
        let from_balance: i128 = env.storage().instance().get(&from_key).unwrap_or(0);
        let to_balance: i128 = env.storage().instance().get(&to_key).unwrap_or(0);
        env.storage().instance().set(&from_key, &(from_balance - amount));
        env.storage().instance().set(&to_key, &(to_balance + amount));
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .instance()
            .get(&(symbol_short!("bal"), id))
            .unwrap_or(0)
    }
}

#[test]
fn refused_payout_rolls_back_the_whole_purchase() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MintEngine, ());
    let client = MintEngineClient::new(&env, &contract_id);
    let token_id = env.register(FreezableToken, ());
    let token = FreezableTokenClient::new(&env, &token_id);

    let admin = Address::generate(&env);
    let render = Address::generate(&env);
    let platform = Address::generate(&env);
    client.init(&admin, &token_id, &render, &RENDER_BPS, &platform, &PLATFORM_BPS);

    let artist = Address::generate(&env);
    let buyer = Address::generate(&env);
    let project_id = client.add_project(&admin, &artist);
    client.toggle_project_is_active(&admin, &project_id);
    client.toggle_project_is_paused(&artist, &project_id);
    let minter_id = client.add_minter(&admin, &MinterKind::SetPrice);
    client.approve_minter(&admin, &minter_id);
    client.set_minter_for_project(&artist, &project_id, &minter_id);
    client.set_fixed_price(&artist, &minter_id, &project_id, &100_000i128);
    token.mint(&buyer, &100_000);

    // The render provider refuses its share; the whole purchase must abort.
    token.freeze(&render);
    let result = client.try_purchase(&minter_id, &project_id, &buyer, &100_000i128, &None);
    assert_eq!(result, Err(Ok(Error::TransferFailed.into())));

    // Nothing happened: no mint, no counter bump, no funds moved.
    assert_eq!(client.get_project(&project_id).invocations, 0);
    assert_eq!(token.balance(&buyer), 100_000);
    assert_eq!(token.balance(&contract_id), 0);
    assert_eq!(client.try_owner_of(&0u64), Err(Ok(Error::TokenNotFound.into())));
}

#[test]
fn payment_configuration_is_admin_only() {
    let fix = setup();
    let outsider = Address::generate(&fix.env);

    let result = fix
        .client
        .try_update_provider_shares(&outsider, &500u32, &250u32);
    assert_eq!(result, Err(Ok(Error::NotAuthorized.into())));
    let result = fix
        .client
        .try_update_provider_addresses(&outsider, &outsider, &outsider);
    assert_eq!(result, Err(Ok(Error::NotAuthorized.into())));
}
