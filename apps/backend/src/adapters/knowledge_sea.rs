//! SeaORM adapter for the knowledge base.

use sea_orm::sea_query::{Alias, Condition, Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseBackend, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::knowledge_base;

#[derive(Debug, Clone)]
pub struct EntryCreate {
    pub topic: String,
    pub content: String,
    pub keywords: String,
    pub category: Option<String>,
}

/// Escape LIKE wildcards so a term only ever matches literally.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Lower-case ASCII letters only, leaving every other character as stored.
/// SQLite's `lower()` already behaves this way; Postgres folds Unicode, so
/// it gets an explicit `translate()`.
fn ascii_lower(backend: DatabaseBackend, col: knowledge_base::Column) -> SimpleExpr {
    match backend {
        DatabaseBackend::Postgres => Func::cust(Alias::new("translate"))
            .arg(Expr::col(col))
            .arg("ABCDEFGHIJKLMNOPQRSTUVWXYZ")
            .arg("abcdefghijklmnopqrstuvwxyz")
            .into(),
        _ => Func::lower(Expr::col(col)).into(),
    }
}

fn contains(backend: DatabaseBackend, col: knowledge_base::Column, term: &str) -> SimpleExpr {
    let pattern = LikeExpr::new(format!("%{}%", escape_like(term))).escape('\\');
    Expr::expr(ascii_lower(backend, col)).like(pattern)
}

/// Every term (already ASCII lower-case) must appear in topic, content or keywords.
fn search_condition(
    backend: DatabaseBackend,
    terms: &[String],
    category: Option<&str>,
) -> Condition {
    let mut cond = Condition::all();
    for term in terms {
        cond = cond.add(
            Condition::any()
                .add(contains(backend, knowledge_base::Column::Topic, term))
                .add(contains(backend, knowledge_base::Column::Content, term))
                .add(contains(backend, knowledge_base::Column::Keywords, term)),
        );
    }
    if let Some(category) = category {
        let column = ascii_lower(backend, knowledge_base::Column::Category);
        cond = cond.add(Expr::expr(column).eq(category.to_ascii_lowercase()));
    }
    cond
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    terms: &[String],
    category: Option<&str>,
    page_index: u64,
    limit: u64,
) -> Result<(Vec<knowledge_base::Model>, u64), DbErr> {
    let paginator = knowledge_base::Entity::find()
        .filter(search_condition(conn.get_database_backend(), terms, category))
        .order_by_asc(knowledge_base::Column::Topic)
        .order_by_asc(knowledge_base::Column::Id)
        .paginate(conn, limit);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: &str,
) -> Result<Option<knowledge_base::Model>, DbErr> {
    knowledge_base::Entity::find_by_id(id.to_owned()).one(conn).await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    dto: EntryCreate,
) -> Result<knowledge_base::Model, DbErr> {
    knowledge_base::ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        topic: Set(dto.topic),
        content: Set(dto.content),
        keywords: Set(dto.keywords),
        category: Set(dto.category),
        created_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}
