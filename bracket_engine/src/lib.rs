//! # Bracket Engine
//!
//! A single-elimination bracket engine with a per-tournament actor service.
//!
//! The core turns a seeded participant list into a round/match tree and
//! advances it as results arrive. It is synchronous, performs no I/O and
//! mutates a [`bracket::Bracket`] owned by the caller:
//!
//! - **Roster**: seed-ordered participants (unseeded last)
//! - **Builder**: `ceil(log2(n))` rounds, seeded first-round placement
//! - **Recorder**: scores, winner decision, one-round propagation
//! - **Progress**: per-round percentage and whole-bracket completion
//! - **Lookup**: participant id to record
//!
//! ## Core Modules
//!
//! - [`bracket`]: Engine types and operations
//! - [`view`]: Display projection with resolved participant names
//! - [`store`]: Bracket document persistence (memory, PostgreSQL)
//! - [`tournament`]: Actor-per-tournament service over the engine and store
//!
//! ## Example
//!
//! ```
//! use bracket_engine::bracket::{self, Participant};
//!
//! let participants = vec![
//!     Participant::new("a", "A", 1),
//!     Participant::new("b", "B", 2),
//!     Participant::new("c", "C", 3),
//!     Participant::new("d", "D", 4),
//!     Participant::new("e", "E", 5),
//! ];
//!
//! let b = bracket::build(participants).unwrap();
//! assert_eq!(b.round_count(), 3);
//! assert_eq!(b.total_slots(), 8);
//! ```

/// Bracket engine: roster, builder, recorder, progress and lookup.
pub mod bracket;
pub use bracket::{
    Bracket, BracketError, BracketEvent, BracketResult, Match, MatchOutcome, Participant,
    ParticipantId, Roster, Round, Slot, SlotPosition,
};

/// Display projection of a bracket.
pub mod view;

/// Bracket document persistence.
pub mod store;

/// Tournament actors and manager.
pub mod tournament;
