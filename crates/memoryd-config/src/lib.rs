// SPDX-License-Identifier: Apache-2.0
//! Layered configuration for memoryd: built-in defaults, an optional YAML
//! file, and `MEMORYD_`-prefixed environment overrides, merged in that
//! priority order (§1.3).
mod loader;
mod schema;

pub use loader::load;
pub use schema::*;
