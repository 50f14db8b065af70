//! One-shot initialization and single-owner access control.
//!
//! A contract moves from *uninitialized* to *initialized* exactly once and
//! records its owner at that moment. Ownership can later move to another
//! address through a two-step propose / accept handshake.
//!
//! These helpers never call `require_auth()`; the calling contract must
//! authenticate the relevant address before invoking them.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// ── Errors ───────────────────────────────────────────────────────────────────

/// Errors specific to ownership transfer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OwnershipError {
    /// The caller is not the current owner.
    NotOwner,
    /// The caller is not the proposed owner.
    NotPendingOwner,
    /// No transfer is in flight.
    NoPendingOwner,
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

/// Performs the `Uninitialized → Initialized` transition and records `owner`.
///
/// Returns `false` (and writes nothing) if the contract was already
/// initialized. There is no reverse transition.
pub fn initialize(env: &Env, owner: &Address) -> bool {
    if is_initialized(env) {
        return false;
    }
    env.storage().instance().set(&OWNER, owner);
    env.storage().instance().set(&INITIALIZED, &true);
    true
}

// ── Owner gate ───────────────────────────────────────────────────────────────

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns `true` only when `caller` is the recorded owner.
pub fn is_owner(env: &Env, caller: &Address) -> bool {
    match get_owner(env) {
        Some(owner) => owner == *caller,
        None => false,
    }
}

// ── Two-step transfer ────────────────────────────────────────────────────────

pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

/// Records `new_owner` as the pending owner. Replaces any earlier proposal.
///
/// # Errors
/// - `NotOwner` if `caller` is not the current owner.
pub fn propose_owner(
    env: &Env,
    caller: &Address,
    new_owner: &Address,
) -> Result<(), OwnershipError> {
    if !is_owner(env, caller) {
        return Err(OwnershipError::NotOwner);
    }
    env.storage().instance().set(&PENDING_OWNER, new_owner);
    Ok(())
}

/// Completes a transfer and returns the previous owner.
///
/// # Errors
/// - `NoPendingOwner` if nothing was proposed.
/// - `NotPendingOwner` if `caller` is not the proposed address.
pub fn accept_owner(env: &Env, caller: &Address) -> Result<Address, OwnershipError> {
    let pending = get_pending_owner(env).ok_or(OwnershipError::NoPendingOwner)?;
    if pending != *caller {
        return Err(OwnershipError::NotPendingOwner);
    }
    let previous = get_owner(env).ok_or(OwnershipError::NotOwner)?;

    env.storage().instance().set(&OWNER, caller);
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(previous)
}

/// Drops the in-flight proposal and returns the address that was pending.
///
/// # Errors
/// - `NotOwner` if `caller` is not the current owner.
/// - `NoPendingOwner` if nothing was proposed.
pub fn cancel_owner_transfer(env: &Env, caller: &Address) -> Result<Address, OwnershipError> {
    if !is_owner(env, caller) {
        return Err(OwnershipError::NotOwner);
    }
    let pending = get_pending_owner(env).ok_or(OwnershipError::NoPendingOwner)?;
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(pending)
}
