//! Tournament manager for spawning and addressing tournament actors.

use super::{
    actor::{TournamentActor, TournamentHandle},
    errors::{TournamentError, TournamentResult},
    messages::{ResultReport, SubscriberId, TournamentMessage},
    models::{BracketDocument, TournamentId, TournamentState},
};
use crate::{
    bracket::{BracketEvent, Participant},
    store::BracketStore,
    view::BracketView,
};
use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::sync::{RwLock, mpsc};

/// Tournament manager settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerSettings {
    /// Smallest roster accepted by generate
    pub min_participants: usize,
    /// Per-actor message queue size
    pub inbox_capacity: usize,
    /// Per-subscriber event queue size
    pub event_buffer: usize,
    /// Stop an actor after this long without messages (`None` keeps it running)
    pub idle_timeout: Option<Duration>,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            min_participants: 2,
            inbox_capacity: 100,
            event_buffer: 32,
            idle_timeout: Some(Duration::from_secs(300)),
        }
    }
}

/// Tournament manager routing every operation through the tournament's actor
pub struct TournamentManager {
    store: Arc<dyn BracketStore>,

    settings: ManagerSettings,

    /// Running actor handles
    tournaments: Arc<RwLock<HashMap<TournamentId, TournamentHandle>>>,

    next_subscriber_id: AtomicU64,
}

impl TournamentManager {
    /// Create a new tournament manager
    ///
    /// # Arguments
    ///
    /// * `store` - Document store for bracket documents
    /// * `settings` - Manager settings
    pub fn new(store: Arc<dyn BracketStore>, settings: ManagerSettings) -> Self {
        Self {
            store,
            settings,
            tournaments: Arc::new(RwLock::new(HashMap::new())),
            next_subscriber_id: AtomicU64::new(1),
        }
    }

    pub fn settings(&self) -> &ManagerSettings {
        &self.settings
    }

    /// Get the actor for a tournament, spawning it on first use.
    ///
    /// An actor is spawned from the stored document when one exists. With
    /// `create` set, a tournament with no document gets a pending one;
    /// otherwise `NotFound` is returned.
    async fn handle(&self, tournament_id: &str, create: bool) -> TournamentResult<TournamentHandle> {
        {
            let tournaments = self.tournaments.read().await;
            if let Some(handle) = tournaments.get(tournament_id) {
                if !handle.is_closed() {
                    return Ok(handle.clone());
                }
            }
        }

        let mut tournaments = self.tournaments.write().await;
        if let Some(handle) = tournaments.get(tournament_id) {
            if !handle.is_closed() {
                return Ok(handle.clone());
            }
        }

        let document = match self.store.load(tournament_id).await? {
            Some(document) => document,
            None if create => BracketDocument::pending(tournament_id.to_string()),
            None => return Err(TournamentError::NotFound(tournament_id.to_string())),
        };

        let (actor, handle) = TournamentActor::new(
            document,
            self.store.clone(),
            self.settings.min_participants,
            self.settings.inbox_capacity,
            self.settings.idle_timeout,
        );
        tournaments.insert(tournament_id.to_string(), handle.clone());
        drop(tournaments);

        let registry = Arc::clone(&self.tournaments);
        let id = tournament_id.to_string();
        tokio::spawn(async move {
            actor.run().await;

            // Forget the stopped actor unless a new one already replaced it
            let mut tournaments = registry.write().await;
            if tournaments.get(&id).is_some_and(TournamentHandle::is_closed) {
                tournaments.remove(&id);
            }
        });

        log::info!("Spawned actor for tournament {}", tournament_id);

        Ok(handle)
    }

    /// Run an operation against the tournament's actor.
    ///
    /// An actor that stopped between lookup and send (idle shutdown) never
    /// saw the message, so the operation is retried once on a fresh actor.
    async fn dispatch<T, F, Fut>(
        &self,
        tournament_id: &str,
        create: bool,
        op: F,
    ) -> TournamentResult<T>
    where
        F: Fn(TournamentHandle) -> Fut,
        Fut: Future<Output = TournamentResult<T>>,
    {
        let handle = self.handle(tournament_id, create).await?;
        match op(handle.clone()).await {
            Err(TournamentError::ActorUnavailable(_)) if handle.is_closed() => {
                log::debug!(
                    "Tournament {} actor stopped before answering, retrying",
                    tournament_id
                );
                op(self.handle(tournament_id, create).await?).await
            }
            result => result,
        }
    }

    /// Generate a bracket, replacing any existing one and its results
    pub async fn generate(
        &self,
        tournament_id: &str,
        participants: Vec<Participant>,
    ) -> TournamentResult<TournamentState> {
        self.dispatch(tournament_id, true, |handle| {
            let participants = participants.clone();
            async move { handle.generate(participants).await }
        })
        .await
    }

    /// Report a match result
    pub async fn report_result(
        &self,
        tournament_id: &str,
        round_index: usize,
        match_index: usize,
        score1: f64,
        score2: f64,
    ) -> TournamentResult<ResultReport> {
        self.dispatch(tournament_id, false, |handle| async move {
            handle
                .report_result(round_index, match_index, score1, score2)
                .await
        })
        .await
    }

    /// Read the current bracket and progress
    pub async fn get_state(&self, tournament_id: &str) -> TournamentResult<TournamentState> {
        self.dispatch(tournament_id, false, |handle| async move { handle.get_state().await })
            .await
    }

    /// Read the display projection
    pub async fn get_view(&self, tournament_id: &str) -> TournamentResult<BracketView> {
        self.dispatch(tournament_id, false, |handle| async move { handle.get_view().await })
            .await
    }

    /// Discard a tournament's bracket
    pub async fn reset(&self, tournament_id: &str) -> TournamentResult<()> {
        self.dispatch(tournament_id, false, |handle| async move { handle.reset().await })
            .await
    }

    /// Stop a tournament's actor and delete its document
    pub async fn remove(&self, tournament_id: &str) -> TournamentResult<()> {
        // Held until the document is gone so no request can respawn the actor
        let mut tournaments = self.tournaments.write().await;
        if let Some(handle) = tournaments.remove(tournament_id) {
            // The actor may already be gone; the document is deleted regardless
            let _ = handle.close().await;
        }

        let deleted = self.store.delete(tournament_id).await?;
        drop(tournaments);

        if !deleted {
            return Err(TournamentError::NotFound(tournament_id.to_string()));
        }

        log::info!("Removed tournament {}", tournament_id);
        Ok(())
    }

    /// Subscribe to a tournament's bracket events
    ///
    /// # Returns
    ///
    /// * `(SubscriberId, mpsc::Receiver<BracketEvent>)` - ID for unsubscribing and the event stream
    pub async fn subscribe(
        &self,
        tournament_id: &str,
    ) -> TournamentResult<(SubscriberId, mpsc::Receiver<BracketEvent>)> {
        let subscriber_id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(self.settings.event_buffer.max(1));

        self.dispatch(tournament_id, false, |handle| {
            let sender = sender.clone();
            async move {
                handle
                    .send(TournamentMessage::Subscribe {
                        subscriber_id,
                        sender,
                    })
                    .await
            }
        })
        .await?;

        Ok((subscriber_id, receiver))
    }

    pub async fn unsubscribe(
        &self,
        tournament_id: &str,
        subscriber_id: SubscriberId,
    ) -> TournamentResult<()> {
        let handle = self.tournaments.read().await.get(tournament_id).cloned();
        match handle {
            Some(handle) => {
                handle
                    .send(TournamentMessage::Unsubscribe { subscriber_id })
                    .await
            }
            None => Ok(()),
        }
    }

    /// IDs of every stored tournament, running or not
    pub async fn list_ids(&self) -> TournamentResult<Vec<TournamentId>> {
        Ok(self.store.list_ids().await?)
    }

    /// Number of running tournament actors
    pub async fn active_count(&self) -> usize {
        self.tournaments
            .read()
            .await
            .values()
            .filter(|h| !h.is_closed())
            .count()
    }

    /// Stop every actor
    pub async fn close_all(&self) {
        let handles: Vec<_> = self.tournaments.write().await.drain().collect();
        for (tournament_id, handle) in handles {
            if let Err(e) = handle.close().await {
                log::warn!("Failed to close tournament {}: {}", tournament_id, e);
            }
        }
    }
}
