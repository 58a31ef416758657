//! Run progression: games, rounds, overload, deck building.
//!
//! ## Key Types
//!
//! - `RunStatus`: lifecycle of a run
//! - `RoundEnd`: outcome of a round-boundary check
//! - `DeckDraftOffer`: runes offered after a victory
//!
//! All transitions take `&mut GameState` and validate before mutating.

mod deck_draft;
mod overload;
mod run;

pub use deck_draft::{
    advance_to_next_game, disenchant, generate_offer, pick_draft_runes, DeckDraftOffer,
    BASE_DRAFT_PICKS, DRAFT_OFFER_SIZE,
};
pub use overload::{apply_solo_overload_damage, overload_damage_for_game, OVERLOAD_DAMAGE_PROGRESSION};
pub use run::{
    apply_overload, apply_segment, cancel, check_defeat, complete_line, draft, end_round_if_done,
    next_game, place_in_floor, place_on_line, start_run, DefeatReason, LineResolution,
    OverloadReport, PlacementReport, RoundEnd, RunStatus,
};
