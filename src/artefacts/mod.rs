//! Artefacts: persistent purchasable modifiers and their numeric pipeline.
//!
//! Artefacts are owned and selected through the profile (see
//! `persistence`). During a run the selected set is read-only input to the
//! pure modifier functions in `modifiers`.

mod artefact;
pub mod modifiers;

pub use artefact::{ActiveArtefacts, ArtefactId, MAX_SELECTED_ARTEFACTS};
pub use modifiers::{
    apply_incoming_modifiers, apply_outgoing_modifiers, draft_picks, draft_rarity_chances,
    IncomingDamage, MAX_DRAFT_PICKS,
};
