//! 1-based pagination shared by every list endpoint.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Raw `page` / `limit` query parameters. Signed so that negative input
/// reaches validation instead of failing deserialization.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn validate(self) -> Result<PageRequest, AppError> {
        PageRequest::new(self.page, self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, AppError> {
        let page = match page {
            None => DEFAULT_PAGE,
            Some(p) if p >= 1 => p as u64,
            Some(p) => {
                return Err(AppError::invalid(
                    ErrorCode::InvalidPagination,
                    format!("page must be at least 1, got {p}"),
                ))
            }
        };
        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(l) if (1..=MAX_LIMIT as i64).contains(&l) => l as u64,
            Some(l) => {
                return Err(AppError::invalid(
                    ErrorCode::InvalidPagination,
                    format!("limit must be between 1 and {MAX_LIMIT}, got {l}"),
                ))
            }
        };
        Ok(Self { page, limit })
    }

    /// Zero-based page index as sea-orm's paginator expects.
    pub fn index(&self) -> u64 {
        self.page - 1
    }

    pub fn offset(&self) -> u64 {
        self.index().saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub limit: u64,
}

impl Pagination {
    pub fn new(total: u64, req: PageRequest) -> Self {
        Self {
            total,
            total_pages: total.div_ceil(req.limit),
            current_page: req.page,
            limit: req.limit,
        }
    }
}

/// One page of results. `degraded` marks data served without the store.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub degraded: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, req: PageRequest) -> Self {
        Self {
            items,
            pagination: Pagination::new(total, req),
            degraded: false,
        }
    }

    /// Slice an in-memory collection.
    pub fn from_items(all: Vec<T>, req: PageRequest) -> Self {
        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(req.offset() as usize)
            .take(req.limit as usize)
            .collect();
        Self::new(items, total, req)
    }

    pub fn empty(req: PageRequest) -> Self {
        Self::new(Vec::new(), 0, req)
    }

    pub fn mark_degraded(mut self) -> Self {
        self.degraded = true;
        self
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
            degraded: self.degraded,
        }
    }
}
