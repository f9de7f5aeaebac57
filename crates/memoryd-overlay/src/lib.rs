// SPDX-License-Identifier: Apache-2.0
//! The edit overlay (§4.E): read-time folding of approved `MemoryEdit`s over
//! stored chunks/decisions, and the derived read primitives built on top of
//! it — `search_chunks`, `get_timeline`, `get_active_decisions`,
//! `get_available_capsules`. Originals in `memoryd-store` are never mutated;
//! every function here is a pure read over the current approved-edit set.
mod capsules;
mod decisions;
mod edits;
mod effective;
mod error;
mod search;
mod timeline;
mod tsquery;

pub use capsules::get_available_capsules;
pub use decisions::get_active_decisions;
pub use edits::{create_edit, CreateEditInput};
pub use effective::{fold_chunk, EffectiveChunk};
pub use error::{OverlayError, OverlayResult};
pub use search::{search_chunks, SearchFilters};
pub use timeline::{get_timeline, TimelineEntry};
pub use tsquery::build_tsquery;
