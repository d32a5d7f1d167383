//! Single-elimination bracket engine.
//!
//! This module provides the in-memory bracket logic:
//! - Seed-ordered rosters
//! - Round/match topology and first-round placement
//! - Result recording with one-round winner propagation
//! - Round and bracket completion tracking
//! - Participant lookup for display
//!
//! Everything here is synchronous and performs no I/O. Callers serialize
//! mutations on a given [`Bracket`]; `&mut` access enforces this within a
//! single owner, and [`crate::tournament`] does it across requests.
//!
//! ## Example
//!
//! ```
//! use bracket_engine::bracket::{self, Participant};
//!
//! let mut b = bracket::build(vec![
//!     Participant::new("a", "Alice", 1),
//!     Participant::new("b", "Bob", 2),
//! ])?;
//!
//! let outcome = bracket::update_match(&mut b, 0, 0, 3.0, 1.0)?;
//! assert_eq!(outcome.winner_id.as_deref(), Some("a"));
//! assert!(bracket::is_complete(&b));
//! # Ok::<(), bracket_engine::bracket::BracketError>(())
//! ```

pub mod builder;
pub mod errors;
pub mod events;
pub mod lookup;
pub mod models;
pub mod progress;
pub mod recorder;
pub mod roster;

pub use builder::{build, build_from_roster, round_count_for};
pub use errors::{BracketError, BracketResult};
pub use events::BracketEvent;
pub use lookup::find_participant;
pub use models::{Bracket, Match, Participant, ParticipantId, Round, Slot, SlotPosition};
pub use progress::{ProgressSummary, is_complete, progress_summary, round_progress};
pub use recorder::{Advancement, MatchOutcome, advance_target, update_match};
pub use roster::Roster;
