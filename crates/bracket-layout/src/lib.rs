//! Layout algorithms for tournament brackets.
//!
//! This crate turns a match-and-edge graph into canvas geometry:
//! - Elimination layout: columns per round, feeder-centered lanes,
//!   Z-polyline connectors
//! - Swiss layout: record-bucket column panels, no connectors
//! - Double-elimination format profiles for known tournament sizes
//! - A content-keyed layout cache

pub mod cache;
pub mod elimination;
pub mod profiles;
pub mod swiss;

pub use cache::{compute_layout_cached, CacheStats, LayoutCache};
pub use elimination::compute_layout;
pub use profiles::{detect_profile, profile_for_size, FormatProfile};
pub use swiss::compute_swiss_layout;
