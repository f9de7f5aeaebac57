// SPDX-License-Identifier: Apache-2.0
//! Component G: mode & invariant detection (§4.G).
//!
//! Pure classification (`mode`, `confidence`, `invariants`, `budgets`) plus
//! the one stateful piece the guardrail needs — a per-mode sliding-window
//! error-rate tracker (`guardrail::ErrorRateTracker`). `detect` is the
//! single entry point `memoryd-acb` calls per request.
mod breach;
mod budgets;
mod confidence;
mod detect;
mod guardrail;
mod invariants;
mod mode;

pub use breach::{detect_breach, BreachEvent, DEFAULT_MIN_PRIORITY};
pub use budgets::{budgets_for, ModeBudgets};
pub use confidence::confidence;
pub use detect::{detect, DetectionResult};
pub use guardrail::{apply_guardrail, ErrorRateTracker, GuardrailResult};
pub use invariants::{extract_invariants, InvariantType};
pub use mode::{detect_mode, Mode};
