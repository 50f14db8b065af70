//! Shared helpers for the staking contract suite.
//!
//! This crate provides:
//! - [`ownership`] — one-shot initialization, the owner gate, and two-step
//!   owner transfer.
//! - [`ttl`] — storage time-to-live upkeep.
//!
//! Helpers here report failure through `bool`, `Option`, or small local error
//! enums; each contract maps them onto its own `#[contracterror]` codes.

#![no_std]

pub mod ownership;
pub mod ttl;

pub use ownership::OwnershipError;
