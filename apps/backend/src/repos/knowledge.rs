//! Knowledge base search.
//!
//! A query is a list of lower-case terms plus an optional category. An entry
//! matches when every term occurs in its topic, content or keywords. Case is
//! ignored for ASCII letters only; other characters match exactly, which is
//! the one folding rule every backend can evaluate. The store evaluates this
//! with LIKE; [`KnowledgeQuery::matches`] evaluates the same predicate in memory.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::knowledge_sea as knowledge_adapter;
pub use crate::adapters::knowledge_sea::EntryCreate;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::pagination::{Page, PageRequest};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: String,
    pub topic: String,
    pub content: String,
    pub keywords: String,
    pub category: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnowledgeQuery {
    pub terms: Vec<String>,
    pub category: Option<String>,
}

impl KnowledgeQuery {
    pub fn parse(q: Option<&str>, category: Option<&str>) -> Self {
        let terms = q
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_ascii_lowercase)
            .collect();
        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Self { terms, category }
    }

    pub fn matches(&self, entry: &KnowledgeEntry) -> bool {
        let topic = entry.topic.to_ascii_lowercase();
        let content = entry.content.to_ascii_lowercase();
        let keywords = entry.keywords.to_ascii_lowercase();

        let terms_ok = self.terms.iter().all(|t| {
            let t = t.as_str();
            topic.contains(t) || content.contains(t) || keywords.contains(t)
        });
        let category_ok = match &self.category {
            None => true,
            Some(want) => entry
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(want)),
        };
        terms_ok && category_ok
    }

    /// Filter and order in-memory entries the way the store does.
    pub fn apply(&self, entries: Vec<KnowledgeEntry>) -> Vec<KnowledgeEntry> {
        let mut hits: Vec<_> = entries.into_iter().filter(|e| self.matches(e)).collect();
        hits.sort_by(|a, b| a.topic.cmp(&b.topic).then_with(|| a.id.cmp(&b.id)));
        hits
    }
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    query: &KnowledgeQuery,
    req: PageRequest,
) -> Result<Page<KnowledgeEntry>, DomainError> {
    let (rows, total) = knowledge_adapter::search(
        conn,
        &query.terms,
        query.category.as_deref(),
        req.index(),
        req.limit,
    )
    .await?;
    Ok(Page::new(
        rows.into_iter().map(KnowledgeEntry::from).collect(),
        total,
        req,
    ))
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: &str) -> Result<KnowledgeEntry, DomainError> {
    knowledge_adapter::find_by_id(conn, id)
        .await?
        .map(KnowledgeEntry::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::KnowledgeEntry, "Knowledge entry not found")
        })
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    dto: EntryCreate,
) -> Result<KnowledgeEntry, DomainError> {
    Ok(KnowledgeEntry::from(knowledge_adapter::insert(conn, dto).await?))
}

impl From<crate::entities::knowledge_base::Model> for KnowledgeEntry {
    fn from(m: crate::entities::knowledge_base::Model) -> Self {
        Self {
            id: m.id,
            topic: m.topic,
            content: m.content,
            keywords: m.keywords,
            category: m.category,
            created_at: m.created_at,
        }
    }
}
