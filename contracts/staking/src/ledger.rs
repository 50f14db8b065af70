//! Per-user and global score bookkeeping.
//!
//! Each user owns two persistent maps keyed by epoch: the score earned in that
//! epoch and the principal that unlocks at that epoch. A single global map
//! holds the per-epoch score total across all users. A stake is applied as one
//! batch: every new value is computed first, then the three maps are written.

use soroban_sdk::{symbol_short, Address, Env, IntoVal, Map, Symbol, Val};

use common::ttl;

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const USER_SCORES: Symbol = symbol_short!("USR_SCR");
const USER_UNLOCKS: Symbol = symbol_short!("USR_UNLK");
const TOTAL_SCORES: Symbol = symbol_short!("TOT_SCR");

/// View over the staking ledger for the duration of one contract call.
pub struct StakeLedger<'a> {
    env: &'a Env,
}

impl<'a> StakeLedger<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    /// Records a stake of `amount` (already scored as `score`) that starts at
    /// `origin` and lasts `weeks` epochs.
    ///
    /// `score` is added to the user's and the global total for every epoch in
    /// `[origin, origin + weeks)`, and `amount` is added to the user's
    /// unlock balance at `origin + weeks`.
    pub fn apply_stake(
        &self,
        user: &Address,
        amount: i128,
        score: i128,
        origin: u32,
        weeks: u32,
    ) -> Result<u32, ContractError> {
        let unlock_epoch = origin
            .checked_add(weeks)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let mut user_scores = self.user_scores(user);
        let mut total_scores = self.total_scores();
        for epoch in origin..unlock_epoch {
            accumulate(&mut user_scores, epoch, score)?;
            accumulate(&mut total_scores, epoch, score)?;
        }

        let mut unlocks = self.user_unlocks(user);
        accumulate(&mut unlocks, unlock_epoch, amount)?;

        self.store(&(USER_SCORES, user.clone()), &user_scores);
        self.store(&TOTAL_SCORES, &total_scores);
        self.store(&(USER_UNLOCKS, user.clone()), &unlocks);

        Ok(unlock_epoch)
    }

    /// Principal of `user` that unlocks at `epoch`.
    pub fn user_available_tokens(&self, user: &Address, epoch: u32) -> i128 {
        self.user_unlocks(user).get(epoch).unwrap_or(0)
    }

    /// Score of `user` during `epoch`.
    pub fn user_score(&self, user: &Address, epoch: u32) -> i128 {
        self.user_scores(user).get(epoch).unwrap_or(0)
    }

    /// Sum of every user's score during `epoch`.
    pub fn total_score(&self, epoch: u32) -> i128 {
        self.total_scores().get(epoch).unwrap_or(0)
    }

    // ── Storage helpers ─────────────────────────────────────────────────────

    fn user_scores(&self, user: &Address) -> Map<u32, i128> {
        self.load(&(USER_SCORES, user.clone()))
    }

    fn user_unlocks(&self, user: &Address) -> Map<u32, i128> {
        self.load(&(USER_UNLOCKS, user.clone()))
    }

    fn total_scores(&self) -> Map<u32, i128> {
        self.load(&TOTAL_SCORES)
    }

    fn load<K>(&self, key: &K) -> Map<u32, i128>
    where
        K: IntoVal<Env, Val>,
    {
        self.env
            .storage()
            .persistent()
            .get(key)
            .unwrap_or_else(|| Map::new(self.env))
    }

    fn store<K>(&self, key: &K, map: &Map<u32, i128>)
    where
        K: IntoVal<Env, Val>,
    {
        self.env.storage().persistent().set(key, map);
        ttl::extend_persistent(self.env, key);
    }
}

fn accumulate(map: &mut Map<u32, i128>, epoch: u32, delta: i128) -> Result<(), ContractError> {
    let next = map
        .get(epoch)
        .unwrap_or(0)
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    map.set(epoch, next);
    Ok(())
}
