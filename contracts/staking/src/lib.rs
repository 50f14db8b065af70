#![no_std]

pub mod epoch;
pub mod events;
pub mod ledger;
pub mod score;

use common::ownership::{self, OwnershipError};
use common::ttl;
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, BytesN, Env, Symbol,
};

use ledger::StakeLedger;

// ── Storage key constants ────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

// ── Contract errors ──────────────────────────────────────────────────────────

/// Error codes returned by every contract entry point.
///
/// # Code ranges
/// | Range   | Purpose                         |
/// |---------|---------------------------------|
/// | 1 – 9   | Lifecycle / initialisation      |
/// | 10 – 19 | Authorisation                   |
/// | 30 – 39 | Validation / input              |
/// | 40 – 49 | Contract state                  |
/// | 50 – 59 | Token custody                   |
/// | 60 – 69 | Arithmetic                      |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,

    Unauthorized = 10,

    /// A token address is the staking contract itself.
    InvalidAddress = 30,
    InvalidRewardPeriods = 31,
    /// `start_date` is not strictly after the current ledger time.
    InvalidStartDate = 32,
    InvalidAmount = 33,
    InvalidDuration = 34,

    /// The ledger time is still before `start_date`.
    StakingNotStarted = 40,
    StakingEnded = 41,
    DurationExceedsRewardWindow = 42,
    NoPendingOwner = 43,

    InsufficientAllowance = 50,
    TransferFailed = 51,

    ArithmeticOverflow = 60,
}

impl From<OwnershipError> for ContractError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotOwner | OwnershipError::NotPendingOwner => {
                ContractError::Unauthorized
            }
            OwnershipError::NoPendingOwner => ContractError::NoPendingOwner,
        }
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Immutable parameters fixed by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Token users lock.
    pub liquidity_token: Address,
    /// Token later distributed as rewards.
    pub reward_token: Address,
    /// Ledger timestamp at which epoch 0 begins.
    pub start_date: u64,
    /// Number of weekly epochs in the reward window.
    pub reward_periods: u32,
    /// `start_date + reward_periods` weeks.
    pub end_date: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingContract;

#[contractimpl]
impl StakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract. `owner` is recorded as the only address allowed
    /// to upgrade the contract code.
    ///
    /// * `liquidity_token` – SAC address of the token users stake.
    /// * `reward_token`    – SAC address of the token used for rewards.
    /// * `start_date`      – timestamp at which epoch 0 begins; must lie in the future.
    /// * `reward_periods`  – number of weekly epochs in the reward window,
    ///   between 1 and [`epoch::MAX_REWARD_PERIODS`].
    pub fn initialize(
        env: Env,
        owner: Address,
        liquidity_token: Address,
        reward_token: Address,
        start_date: u64,
        reward_periods: u32,
    ) -> Result<(), ContractError> {
        if ownership::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        let this = env.current_contract_address();
        if liquidity_token == this || reward_token == this {
            return Err(ContractError::InvalidAddress);
        }
        if reward_periods == 0 || reward_periods > epoch::MAX_REWARD_PERIODS {
            return Err(ContractError::InvalidRewardPeriods);
        }
        if start_date <= env.ledger().timestamp() {
            return Err(ContractError::InvalidStartDate);
        }
        let end_date =
            epoch::end_date(start_date, reward_periods).ok_or(ContractError::ArithmeticOverflow)?;

        if !ownership::initialize(&env, &owner) {
            return Err(ContractError::AlreadyInitialized);
        }
        let config = StakingConfig {
            liquidity_token: liquidity_token.clone(),
            reward_token: reward_token.clone(),
            start_date,
            reward_periods,
            end_date,
        };
        env.storage().instance().set(&CONFIG, &config);
        ttl::extend_instance(&env);

        log!(&env, "staking initialized", start_date, reward_periods);
        events::publish_initialized(
            &env,
            owner,
            liquidity_token,
            reward_token,
            start_date,
            end_date,
            reward_periods,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Lock `amount` liquidity tokens for `weeks` epochs starting with the
    /// current one.
    ///
    /// The staker must have approved the contract for at least `amount`
    /// beforehand. The stake's score is credited to every epoch it covers and
    /// the principal is booked against the epoch in which it unlocks.
    pub fn stake(env: Env, staker: Address, amount: i128, weeks: u32) -> Result<(), ContractError> {
        let config = Self::load_config(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let this = env.current_contract_address();
        let liquidity = token::Client::new(&env, &config.liquidity_token);
        if liquidity.allowance(&staker, &this) < amount {
            return Err(ContractError::InsufficientAllowance);
        }

        if weeks == 0 {
            return Err(ContractError::InvalidDuration);
        }

        let current = epoch::epoch_at(config.start_date, env.ledger().timestamp())
            .ok_or(ContractError::StakingNotStarted)?;
        if current >= config.reward_periods as u64 {
            return Err(ContractError::StakingEnded);
        }
        if current + weeks as u64 > config.reward_periods as u64 {
            return Err(ContractError::DurationExceedsRewardWindow);
        }
        let current = u32::try_from(current).map_err(|_| ContractError::StakingEnded)?;

        // 1. Credit the score range and the unlock balance.
        let score =
            score::compute_score(amount, weeks).ok_or(ContractError::ArithmeticOverflow)?;
        let unlock_epoch =
            StakeLedger::new(&env).apply_stake(&staker, amount, score, current, weeks)?;

        // 2. Pull the principal. Returning an error here discards step 1.
        match liquidity.try_transfer_from(&this, &staker, &this, &amount) {
            Ok(Ok(())) => {}
            _ => {
                log!(&env, "principal transfer failed", staker, amount);
                return Err(ContractError::TransferFailed);
            }
        }

        ttl::extend_instance(&env);
        events::publish_staked(&env, staker, amount, weeks, current, unlock_epoch, score);

        Ok(())
    }

    // ── Upgrade ─────────────────────────────────────────────────────────────

    /// Replace the contract code with the already-uploaded `new_wasm_hash`.
    /// Storage and the contract address are preserved. Owner only.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.deployer().update_current_contract_wasm(new_wasm_hash.clone());

        events::publish_upgraded(&env, caller, new_wasm_hash);

        Ok(())
    }

    // ── Owner transfer (two-step) ──────────────────────────────────────────

    /// Propose a new owner. Only the current owner can call this.
    /// The proposed owner must call `accept_owner` to complete the transfer.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();

        ownership::propose_owner(&env, &current_owner, &new_owner)?;

        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    /// Accept the pending owner transfer. Only the proposed owner can call this.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let old_owner = ownership::accept_owner(&env, &new_owner)?;

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Cancel a pending owner transfer. Only the current owner can call this.
    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();

        let pending = ownership::cancel_owner_transfer(&env, &current_owner)?;

        events::publish_owner_transfer_cancelled(&env, current_owner, pending);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn liquidity_token(env: Env) -> Result<Address, ContractError> {
        Ok(Self::load_config(&env)?.liquidity_token)
    }

    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        Ok(Self::load_config(&env)?.reward_token)
    }

    pub fn start_date(env: Env) -> Result<u64, ContractError> {
        Ok(Self::load_config(&env)?.start_date)
    }

    pub fn end_date(env: Env) -> Result<u64, ContractError> {
        Ok(Self::load_config(&env)?.end_date)
    }

    pub fn reward_periods(env: Env) -> Result<u32, ContractError> {
        Ok(Self::load_config(&env)?.reward_periods)
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        Self::load_config(&env)
    }

    /// Epoch containing the current ledger time.
    pub fn current_epoch(env: Env) -> Result<u32, ContractError> {
        let config = Self::load_config(&env)?;
        let current = epoch::epoch_at(config.start_date, env.ledger().timestamp())
            .ok_or(ContractError::StakingNotStarted)?;
        u32::try_from(current).map_err(|_| ContractError::ArithmeticOverflow)
    }

    /// Score that `amount` locked for `weeks` would earn in each covered epoch.
    pub fn get_score(_env: Env, amount: i128, weeks: u32) -> Result<i128, ContractError> {
        if weeks == 0 {
            return Err(ContractError::InvalidDuration);
        }
        score::compute_score(amount, weeks).ok_or(ContractError::ArithmeticOverflow)
    }

    /// Principal of `user` that unlocks at `epoch`.
    pub fn user_available_tokens(env: Env, user: Address, epoch: u32) -> i128 {
        StakeLedger::new(&env).user_available_tokens(&user, epoch)
    }

    /// Score of `user` during `epoch`.
    pub fn user_scores_per_period(env: Env, user: Address, epoch: u32) -> i128 {
        StakeLedger::new(&env).user_score(&user, epoch)
    }

    /// Sum of all users' scores during `epoch`.
    pub fn total_scores(env: Env, epoch: u32) -> i128 {
        StakeLedger::new(&env).total_score(epoch)
    }

    pub fn is_initialized(env: Env) -> bool {
        ownership::is_initialized(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        ownership::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        ownership::get_pending_owner(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !ownership::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the recorded owner.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !ownership::is_owner(env, caller) {
            log!(env, "owner check failed", caller.clone());
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
