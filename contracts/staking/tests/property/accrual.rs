#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for per-epoch score accrual.
//!
//! Invariants tested:
//! - A stake adds its score to every epoch of its range and nowhere else
//! - Principal is booked against the unlock epoch regardless of duration
//! - The global total equals the user's score after a single-user stake

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};
use staking::epoch::ONE_WEEK;
use staking::score::compute_score;
use staking::{StakingContract, StakingContractClient};

const REWARD_PERIODS: u32 = 156;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup() -> (Env, StakingContractClient<'static>, Address, u64) {
    let env = Env::default();
    env.mock_all_auths();

    let liquidity = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let start_date = 1_000u64;
    client.initialize(
        &owner,
        &liquidity.address(),
        &reward.address(),
        &start_date,
        &REWARD_PERIODS,
    );

    (env, client, liquidity.address(), start_date)
}

fn funded_staker(
    env: &Env,
    client: &StakingContractClient,
    token: &Address,
    amount: i128,
) -> Address {
    let staker = Address::generate(env);
    StellarAssetClient::new(env, token).mint(&staker, &amount);
    TokenClient::new(env, token).approve(&staker, &client.address, &amount, &10_000);
    staker
}

fn go_to_epoch(env: &Env, start_date: u64, epoch: u32) {
    env.ledger().set_timestamp(start_date + epoch as u64 * ONE_WEEK);
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Staking `amount` for `weeks` from `origin` credits exactly
    /// `[origin, origin + weeks)`.
    #[test]
    fn prop_range_accrual(
        origin in 0u32..100u32,
        weeks in 1u32..=56u32,
        amount in 1i128..1_000_000_000_000i128,
    ) {
        let (env, client, token, start_date) = setup();
        let staker = funded_staker(&env, &client, &token, amount);

        go_to_epoch(&env, start_date, origin);
        client.stake(&staker, &amount, &weeks);

        let score = compute_score(amount, weeks).unwrap();
        let end = origin + weeks;
        for epoch in 0..=REWARD_PERIODS {
            let expected = if epoch >= origin && epoch < end { score } else { 0 };
            prop_assert_eq!(client.user_scores_per_period(&staker, &epoch), expected);
            prop_assert_eq!(client.total_scores(&epoch), expected);
        }
        prop_assert_eq!(client.user_available_tokens(&staker, &end), amount);
    }

    /// Two stakes that end on the same epoch pool their principal there, no
    /// matter how their durations differ.
    #[test]
    fn prop_unlock_accounting(
        unlock in 2u32..=REWARD_PERIODS,
        first_origin_seed in 0u32..1_000u32,
        second_origin_seed in 0u32..1_000u32,
        a1 in 1i128..1_000_000i128,
        a2 in 1i128..1_000_000i128,
    ) {
        let (env, client, token, start_date) = setup();
        let staker = funded_staker(&env, &client, &token, a1 + a2);

        let mut origins = [first_origin_seed % unlock, second_origin_seed % unlock];
        origins.sort();

        go_to_epoch(&env, start_date, origins[0]);
        client.stake(&staker, &a1, &(unlock - origins[0]));
        go_to_epoch(&env, start_date, origins[1]);
        client.stake(&staker, &a2, &(unlock - origins[1]));

        prop_assert_eq!(client.user_available_tokens(&staker, &unlock), a1 + a2);
        prop_assert_eq!(client.user_available_tokens(&staker, &(unlock - 1)), 0);
        prop_assert_eq!(client.user_available_tokens(&staker, &(unlock + 1)), 0);
    }
}
