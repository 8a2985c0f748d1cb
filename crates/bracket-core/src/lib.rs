//! Core domain types for tournament bracket layout.
//!
//! This crate provides the shared vocabulary of the layout pipeline:
//! - Matches, opponents, and Swiss annotations
//! - Progression edges between matches
//! - Bracket group classification and stage kinds
//! - Layout configuration and output geometry

pub mod config;
pub mod edge;
pub mod geometry;
pub mod group;
pub mod kind;
pub mod matches;

pub use config::{BracketAlignment, LayoutConfig, SwissConfig};
pub use edge::{Edge, FromRank, ToSlot};
pub use geometry::{
    BracketLayout, ConnectorLine, ConnectorType, MatchPosition, Point, RoundHeader,
    SwissPanelPosition, SwissZone,
};
pub use group::BracketGroup;
pub use kind::BracketKind;
pub use matches::{parse_round_number, Match, MatchStatus, Opponent, OpponentResult, SwissMeta};
