//! Tournament service serializing bracket operations per tournament.
//!
//! This module provides:
//! - One actor task per tournament owning its roster and bracket
//! - Generate, report-result, read and reset operations
//! - Persistence of the bracket document after every mutation
//! - Event subscription in place of polling for changes
//!
//! ## Example
//!
//! ```no_run
//! use bracket_engine::bracket::Participant;
//! use bracket_engine::store::MemoryBracketStore;
//! use bracket_engine::tournament::{ManagerSettings, TournamentManager};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manager = TournamentManager::new(
//!         Arc::new(MemoryBracketStore::new()),
//!         ManagerSettings::default(),
//!     );
//!
//!     manager
//!         .generate(
//!             "spring-cup",
//!             vec![
//!                 Participant::new("u1", "Ada", 1),
//!                 Participant::new("u2", "Grace", 2),
//!             ],
//!         )
//!         .await?;
//!
//!     let report = manager.report_result("spring-cup", 0, 0, 2.0, 1.0).await?;
//!     println!("Champion: {:?}", report.state.progress.champion);
//!
//!     Ok(())
//! }
//! ```

pub mod actor;
pub mod errors;
pub mod manager;
pub mod messages;
pub mod models;

pub use actor::{TournamentActor, TournamentHandle};
pub use errors::{TournamentError, TournamentResult};
pub use manager::{ManagerSettings, TournamentManager};
pub use messages::{ResultReport, SubscriberId, TournamentMessage};
pub use models::{BracketDocument, TournamentId, TournamentState, TournamentStatus};
