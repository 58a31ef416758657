//! Drafting: runeforges, the center pool and the in-flight selection.
//!
//! ## Key Types
//!
//! - `Runeforge` / `CenterPool`: the drafting pools
//! - `DraftBoard`: pools plus the single in-flight selection
//! - `DraftSource`: origin snapshot used to cancel a selection
//! - `SourceId`: which pool a draft targets

mod engine;
mod pools;

pub use engine::{
    can_draft_from_center, cancel_selection, commit_selection, draft_from_source, DraftBoard,
    DraftResult, DraftSource, SourceId,
};
pub use pools::{deal_runes, partition_by_type, CenterPool, Runeforge};
