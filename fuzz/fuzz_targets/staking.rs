#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, BytesN, Env,
};
use staking::{StakingContract, StakingContractClient};

const REWARD_PERIODS: u32 = 156;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { amount: u64, weeks: u16 },
    Advance { seconds: u32 },
    Approve { amount: u64 },
    ProposeOwner { target: u8 },
    AcceptOwner,
    Upgrade { byte: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let liquidity = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let reward = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let contract_id = env.register(StakingContract, ());
    let client = StakingContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let start_date = 10u64;
    client.initialize(
        &owner,
        &liquidity.address(),
        &reward.address(),
        &start_date,
        &REWARD_PERIODS,
    );

    let mut users = vec![owner.clone()];
    for _ in 0..4 {
        users.push(Address::generate(&env));
    }
    for user in &users {
        StellarAssetClient::new(&env, &liquidity.address()).mint(user, &(u64::MAX as i128));
    }

    // Look for overflow panics and for any sequence that breaks
    // total == Σ users.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Stake { amount, weeks } => {
                let _ = client.try_stake(caller, &(amount as i128), &(weeks as u32));
            }
            FuzzAction::Advance { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
            FuzzAction::Approve { amount } => {
                TokenClient::new(&env, &liquidity.address()).approve(
                    caller,
                    &contract_id,
                    &(amount as i128),
                    &10_000,
                );
            }
            FuzzAction::ProposeOwner { target } => {
                let target = &users[target as usize % users.len()];
                let _ = client.try_propose_owner(caller, target);
            }
            FuzzAction::AcceptOwner => {
                let _ = client.try_accept_owner(caller);
            }
            FuzzAction::Upgrade { byte } => {
                let _ = client.try_upgrade(caller, &BytesN::from_array(&env, &[byte; 32]));
            }
        }
    }

    for epoch in 0..=REWARD_PERIODS {
        let sum: i128 = users
            .iter()
            .map(|user| client.user_scores_per_period(user, &epoch))
            .sum();
        assert_eq!(client.total_scores(&epoch), sum);
    }
});
