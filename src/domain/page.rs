// src/domain/page.rs
use serde::{Deserialize, Serialize};

use crate::constants::FIRST_PAGE;

/// Paging arguments after normalization.
///
/// Callers hand in whatever the binding layer received; non-positive values
/// fall back to the first page and the configured default page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn normalize(page: i64, page_size: i64, default_page_size: i64) -> Self {
        Self {
            page: if page < FIRST_PAGE { FIRST_PAGE } else { page },
            page_size: if page_size < 1 {
                default_page_size.max(1)
            } else {
                page_size
            },
        }
    }

    /// Number of rows to skip, saturating instead of overflowing on absurd pages.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of a filtered listing together with the totals the UI needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
    pub data: Vec<T>,
}

impl<T> Paged<T> {
    pub fn new(total: i64, request: PageRequest, data: Vec<T>) -> Self {
        Self {
            total,
            total_pages: total_pages(total, request.page_size),
            current_page: request.page,
            page_size: request.page_size,
            data,
        }
    }
}

/// `ceil(total / page_size)`, zero for an empty set. Never overflows.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    total / page_size + i64::from(total % page_size != 0)
}
