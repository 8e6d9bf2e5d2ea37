use crate::db::degradable_read;
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};
use crate::repos::knowledge::{self, KnowledgeEntry, KnowledgeQuery};
use crate::state::app_state::AppState;

pub async fn search(
    state: &AppState,
    query: &KnowledgeQuery,
    req: PageRequest,
) -> Result<Page<KnowledgeEntry>, AppError> {
    match degradable_read(state.db(), |conn| knowledge::search(conn, query, req)).await? {
        Some(page) => Ok(page),
        None => {
            let hits = query.apply(state.fallback.knowledge_entries());
            Ok(Page::from_items(hits, req).mark_degraded())
        }
    }
}

pub async fn get(state: &AppState, id: &str) -> Result<KnowledgeEntry, AppError> {
    if let Some(entry) = degradable_read(state.db(), |conn| knowledge::find(conn, id)).await? {
        return Ok(entry);
    }
    state
        .fallback
        .knowledge_entries()
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::store_unavailable("knowledge base unavailable"))
}
