//! External stage-structure conversion for bracket layout.
//!
//! The upstream API delivers stages as nested stage-item/round/match
//! payloads. This crate canonicalizes them into the flat match-and-edge
//! graph the layout engines consume, composing the ids their group
//! classification depends on.

pub mod convert;
pub mod stage;

pub use convert::{
    convert_stage, ConvertError, Participant, StageMeta, StageSettings, Standings, ViewerData,
};
pub use stage::{EdgeDto, MatchDto, RoundDto, SlotDto, StageId, StageItem, StageStructure};
