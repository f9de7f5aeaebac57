// SPDX-License-Identifier: Apache-2.0
//! Component F: capsule lifecycle (§4.F) — create, list (delegated to
//! `memoryd-overlay`), fetch, revoke, and the TTL expiry sweeper.
mod create;
mod error;
mod get;
mod list;
mod revoke;
mod sweeper;

pub use create::{create_capsule, CreateCapsuleInput, MIN_TTL_DAYS};
pub use error::{CapsuleError, CapsuleResult};
pub use get::get_capsule;
pub use list::list_capsules;
pub use revoke::revoke_capsule;
pub use sweeper::{run_periodic_sweep, sweep_expired_capsules, DEFAULT_SWEEP_INTERVAL_SECS};
