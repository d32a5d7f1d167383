//! Tournament actor owning one tournament's bracket.
//!
//! Messages are processed one at a time in arrival order, so at most one
//! generate/report/reset is ever in flight per tournament.

use super::{
    errors::{TournamentError, TournamentResult},
    messages::{ResultReport, SubscriberId, TournamentMessage},
    models::{BracketDocument, TournamentId, TournamentState, TournamentStatus},
};
use crate::{
    bracket::{self, Bracket, BracketEvent, Participant, Roster},
    store::BracketStore,
    view::BracketView,
};
use chrono::Utc;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{mpsc, oneshot};

/// Tournament actor handle for sending messages
#[derive(Clone)]
pub struct TournamentHandle {
    sender: mpsc::Sender<TournamentMessage>,
    tournament_id: TournamentId,
}

impl TournamentHandle {
    pub fn new(sender: mpsc::Sender<TournamentMessage>, tournament_id: TournamentId) -> Self {
        Self {
            sender,
            tournament_id,
        }
    }

    pub fn tournament_id(&self) -> &str {
        &self.tournament_id
    }

    /// Whether the actor has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Send a message without waiting for a reply
    pub async fn send(&self, message: TournamentMessage) -> TournamentResult<()> {
        self.sender
            .send(message)
            .await
            .map_err(|_| TournamentError::ActorUnavailable(self.tournament_id.clone()))
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> TournamentMessage,
    ) -> TournamentResult<T> {
        let (response, reply) = oneshot::channel();
        self.send(message(response)).await?;
        reply
            .await
            .map_err(|_| TournamentError::ActorUnavailable(self.tournament_id.clone()))
    }

    pub async fn generate(&self, participants: Vec<Participant>) -> TournamentResult<TournamentState> {
        self.request(|response| TournamentMessage::Generate {
            participants,
            response,
        })
        .await?
    }

    pub async fn report_result(
        &self,
        round_index: usize,
        match_index: usize,
        score1: f64,
        score2: f64,
    ) -> TournamentResult<ResultReport> {
        self.request(|response| TournamentMessage::ReportResult {
            round_index,
            match_index,
            score1,
            score2,
            response,
        })
        .await?
    }

    pub async fn get_state(&self) -> TournamentResult<TournamentState> {
        self.request(|response| TournamentMessage::GetState { response })
            .await
    }

    pub async fn get_view(&self) -> TournamentResult<BracketView> {
        self.request(|response| TournamentMessage::GetView { response })
            .await?
    }

    pub async fn reset(&self) -> TournamentResult<()> {
        self.request(|response| TournamentMessage::Reset { response })
            .await?
    }

    pub async fn close(&self) -> TournamentResult<()> {
        self.request(|response| TournamentMessage::Close { response })
            .await
    }
}

/// Actor managing a single tournament's bracket document
pub struct TournamentActor {
    id: TournamentId,

    /// Current document (authoritative copy)
    document: BracketDocument,

    /// Minimum participants accepted by generate
    min_participants: usize,

    inbox: mpsc::Receiver<TournamentMessage>,

    store: Arc<dyn BracketStore>,

    /// Subscribers for bracket events
    subscribers: HashMap<SubscriberId, mpsc::Sender<BracketEvent>>,

    /// Stop after this long without messages, unless someone is subscribed
    idle_timeout: Option<Duration>,

    is_closed: bool,
}

impl TournamentActor {
    /// Create a new tournament actor
    ///
    /// # Arguments
    ///
    /// * `document` - Loaded document, or a pending one for a new tournament
    /// * `store` - Store that receives the document after each mutation
    /// * `min_participants` - Smallest roster accepted by generate
    /// * `inbox_capacity` - Message queue size
    /// * `idle_timeout` - Quiet period after which the actor stops
    ///
    /// # Returns
    ///
    /// * `(TournamentActor, TournamentHandle)` - Actor and handle for sending messages
    pub fn new(
        document: BracketDocument,
        store: Arc<dyn BracketStore>,
        min_participants: usize,
        inbox_capacity: usize,
        idle_timeout: Option<Duration>,
    ) -> (Self, TournamentHandle) {
        let (sender, inbox) = mpsc::channel(inbox_capacity.max(1));
        let id = document.tournament_id.clone();

        let actor = Self {
            id: id.clone(),
            document,
            min_participants,
            inbox,
            store,
            subscribers: HashMap::new(),
            idle_timeout,
            is_closed: false,
        };

        (actor, TournamentHandle::new(sender, id))
    }

    /// Run the actor until closed, idle, or every handle is dropped
    pub async fn run(mut self) {
        log::info!("Tournament {} actor starting", self.id);

        while let Some(message) = self.next_message().await {
            self.handle_message(message).await;
            if self.is_closed {
                break;
            }
        }

        log::info!("Tournament {} actor stopped", self.id);
    }

    /// Wait for the next message, returning `None` once the actor should stop.
    ///
    /// On idle timeout the inbox is closed first, so messages already queued
    /// are still answered and later sends fail fast.
    async fn next_message(&mut self) -> Option<TournamentMessage> {
        let Some(idle_timeout) = self.idle_timeout else {
            return self.inbox.recv().await;
        };

        loop {
            match tokio::time::timeout(idle_timeout, self.inbox.recv()).await {
                Ok(message) => return message,
                Err(_) => {
                    self.subscribers.retain(|_, sender| !sender.is_closed());
                    if self.subscribers.is_empty() {
                        log::debug!("Tournament {} idle, stopping actor", self.id);
                        self.inbox.close();
                        self.idle_timeout = None;
                        return self.inbox.recv().await;
                    }
                }
            }
        }
    }

    async fn handle_message(&mut self, message: TournamentMessage) {
        match message {
            TournamentMessage::Generate {
                participants,
                response,
            } => {
                let result = self.handle_generate(participants).await;
                let _ = response.send(result);
            }

            TournamentMessage::ReportResult {
                round_index,
                match_index,
                score1,
                score2,
                response,
            } => {
                let result = self
                    .handle_report(round_index, match_index, score1, score2)
                    .await;
                let _ = response.send(result);
            }

            TournamentMessage::GetState { response } => {
                let _ = response.send(TournamentState::from(self.document.clone()));
            }

            TournamentMessage::GetView { response } => {
                let result = if self.document.status == TournamentStatus::Pending {
                    Err(TournamentError::NotGenerated(self.id.clone()))
                } else {
                    Ok(BracketView::new(
                        &self.document.bracket,
                        &self.document.roster,
                    ))
                };
                let _ = response.send(result);
            }

            TournamentMessage::Reset { response } => {
                let result = self.handle_reset().await;
                let _ = response.send(result);
            }

            TournamentMessage::Subscribe {
                subscriber_id,
                sender,
            } => {
                self.subscribers.insert(subscriber_id, sender);
                log::debug!(
                    "Subscriber {} subscribed to tournament {}",
                    subscriber_id,
                    self.id
                );
            }

            TournamentMessage::Unsubscribe { subscriber_id } => {
                self.subscribers.remove(&subscriber_id);
                log::debug!(
                    "Subscriber {} unsubscribed from tournament {}",
                    subscriber_id,
                    self.id
                );
            }

            TournamentMessage::Close { response } => {
                self.is_closed = true;
                let _ = response.send(());
            }
        }
    }

    /// Persist a candidate document, then make it current
    async fn commit(&mut self, mut document: BracketDocument) -> TournamentResult<()> {
        document.updated_at = Utc::now();
        self.store.save(&document).await?;
        self.document = document;
        Ok(())
    }

    async fn handle_generate(
        &mut self,
        participants: Vec<Participant>,
    ) -> TournamentResult<TournamentState> {
        if participants.len() < self.min_participants {
            return Err(TournamentError::InsufficientParticipants {
                needed: self.min_participants,
                current: participants.len(),
            });
        }

        let roster = Roster::new(participants)?;
        let bracket = bracket::build_from_roster(&roster);
        let replaced_progress =
            bracket::progress_summary(&self.document.bracket).completed_matches > 0;

        let participant_count = roster.len();
        let round_count = bracket.round_count();
        let status = status_for(&bracket);

        self.commit(BracketDocument {
            tournament_id: self.id.clone(),
            roster,
            bracket,
            status,
            updated_at: Utc::now(),
        })
        .await?;

        if replaced_progress {
            log::warn!(
                "Tournament {}: bracket regenerated, previous results discarded",
                self.id
            );
        }
        log::info!(
            "Tournament {}: generated bracket for {} participants ({} rounds)",
            self.id,
            participant_count,
            round_count
        );

        self.notify(BracketEvent::Generated {
            participant_count,
            round_count,
        });
        if status == TournamentStatus::Completed {
            self.notify(BracketEvent::Completed { champion: None });
        }

        Ok(TournamentState::from(self.document.clone()))
    }

    async fn handle_report(
        &mut self,
        round_index: usize,
        match_index: usize,
        score1: f64,
        score2: f64,
    ) -> TournamentResult<ResultReport> {
        if self.document.status == TournamentStatus::Pending {
            return Err(TournamentError::NotGenerated(self.id.clone()));
        }

        let was_complete = self.document.status == TournamentStatus::Completed;
        let mut document = self.document.clone();
        let outcome = bracket::update_match(
            &mut document.bracket,
            round_index,
            match_index,
            score1,
            score2,
        )?;
        document.status = status_for(&document.bracket);

        self.commit(document).await?;

        log::info!(
            "Tournament {}: round {} match {} recorded {}-{}, winner {:?}",
            self.id,
            round_index,
            match_index,
            score1,
            score2,
            outcome.winner_id
        );

        self.notify(BracketEvent::MatchRecorded(outcome.clone()));

        let state = TournamentState::from(self.document.clone());
        let completed_tournament = !was_complete && state.progress.complete;
        if completed_tournament {
            log::info!(
                "Tournament {} completed, champion {:?}",
                self.id,
                state.progress.champion
            );
            self.notify(BracketEvent::Completed {
                champion: state.progress.champion.clone(),
            });
        }

        Ok(ResultReport {
            outcome,
            state,
            completed_tournament,
        })
    }

    async fn handle_reset(&mut self) -> TournamentResult<()> {
        self.commit(BracketDocument::pending(self.id.clone()))
            .await?;

        log::info!("Tournament {}: bracket reset", self.id);
        self.notify(BracketEvent::Reset);
        Ok(())
    }

    /// Broadcast an event to all subscribers
    fn notify(&mut self, event: BracketEvent) {
        let id = &self.id;
        self.subscribers
            .retain(|subscriber_id, sender| match sender.try_send(event.clone()) {
                Ok(_) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!(
                        "Tournament {}: subscriber {} channel full, dropping event",
                        id,
                        subscriber_id
                    );
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!(
                        "Tournament {}: subscriber {} disconnected, removing",
                        id,
                        subscriber_id
                    );
                    false
                }
            });
    }
}

fn status_for(bracket: &Bracket) -> TournamentStatus {
    if bracket::is_complete(bracket) {
        TournamentStatus::Completed
    } else {
        TournamentStatus::Active
    }
}
