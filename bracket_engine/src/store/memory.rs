//! In-memory bracket store.

use super::{BracketStore, StoreResult};
use crate::tournament::models::{BracketDocument, TournamentId};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Bracket store backed by a shared map. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryBracketStore {
    documents: Arc<RwLock<HashMap<TournamentId, BracketDocument>>>,
}

impl MemoryBracketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }
}

#[async_trait]
impl BracketStore for MemoryBracketStore {
    async fn load(&self, tournament_id: &str) -> StoreResult<Option<BracketDocument>> {
        Ok(self.documents.read().await.get(tournament_id).cloned())
    }

    async fn save(&self, document: &BracketDocument) -> StoreResult<()> {
        self.documents
            .write()
            .await
            .insert(document.tournament_id.clone(), document.clone());
        Ok(())
    }

    async fn delete(&self, tournament_id: &str) -> StoreResult<bool> {
        Ok(self.documents.write().await.remove(tournament_id).is_some())
    }

    async fn list_ids(&self) -> StoreResult<Vec<TournamentId>> {
        let mut ids: Vec<_> = self.documents.read().await.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
