//! Pagination and sorting for list endpoints.
//!
//! A [`Filters`] value is built from the query string, checked with
//! [`validate_filters`], and only then turned into `ORDER BY` / `LIMIT` /
//! `OFFSET` terms. [`calculate_metadata`] summarises a page for the client.

use axum_helpers::validation::{Validator, permitted_value};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upper bound for `page`.
pub const MAX_PAGE: i64 = 10_000_000;

/// Upper bound for `page_size`.
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    /// Column name, `-` prefixed for descending order
    pub sort: String,
    /// Accepted values for `sort`, supplied by the handler
    pub sort_safe_list: &'static [&'static str],
}

impl Filters {
    /// `sort` without its `-` prefix.
    ///
    /// # Panics
    ///
    /// Panics if `sort` is not in `sort_safe_list`; callers run
    /// [`validate_filters`] first.
    pub fn sort_column(&self) -> &str {
        if !permitted_value(&self.sort.as_str(), self.sort_safe_list) {
            panic!("unsafe sort parameter: {}", self.sort);
        }
        self.sort.strip_prefix('-').unwrap_or(&self.sort)
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// Page bounds and sort membership.
pub fn validate_filters(v: &mut Validator, f: &Filters) {
    v.check(f.page > 0, "page", "must be greater than zero");
    v.check(f.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
    v.check(f.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        f.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted_value(&f.sort.as_str(), f.sort_safe_list),
        "sort",
        "invalid sort value",
    );
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Pagination summary returned next to a page of results.
///
/// An empty result serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub current_page: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub page_size: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub first_page: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_page: i64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub total_records: i64,
}

pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records <= 0 || page_size <= 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}
