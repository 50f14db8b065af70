use soroban_sdk::{Env, IntoVal, Val};

// ~30 days of ledgers at 5s close time.
pub const TTL_THRESHOLD: u32 = 518_400;
// ~60 days of ledgers.
pub const TTL_EXTEND_TO: u32 = 1_036_800;

/// Extends the time-to-live of the contract instance (and with it every
/// instance-storage key).
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live of a persistent entry.
///
/// The key must exist; callers invoke this right after writing it.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
