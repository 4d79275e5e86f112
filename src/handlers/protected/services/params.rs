use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::filter::{contains_pattern, FilterData, FilterOrderInfo, SortDirection};
use crate::state::ListLimits;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 10;
const DEFAULT_SORT_ORDER: i64 = 1;

/// Raw list query parameters, kept as text so parse failures get our own messages.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    CreatedAt,
}

impl SortField {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(SortField::Name),
            "created_at" => Some(SortField::CreatedAt),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CreatedAt => "created_at",
        }
    }
}

/// Validated list parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub page: i64,
    pub page_size: i64,
    pub sort_field: SortField,
    pub sort_order: SortDirection,
    pub search: String,
}

impl ListParams {
    pub fn parse(query: ListQuery, limits: ListLimits) -> Result<Self, ApiError> {
        let page = parse_int(query.page.as_deref(), DEFAULT_PAGE)
            .filter(|p| *p >= 1)
            .ok_or_else(|| ApiError::bad_request("Invalid page number"))?;

        let page_size = parse_int(query.page_size.as_deref(), DEFAULT_PAGE_SIZE)
            .filter(|s| *s >= 1)
            .ok_or_else(|| ApiError::bad_request("Invalid page size"))?;
        if let Some(max) = limits.max_page_size {
            if page_size > max {
                return Err(ApiError::bad_request(format!("Invalid page size: must not exceed {}", max)));
            }
        }

        let sort_order = parse_int(query.sort_order.as_deref(), DEFAULT_SORT_ORDER)
            .and_then(SortDirection::from_order)
            .ok_or_else(|| ApiError::bad_request("Invalid sort order"))?;

        let sort_field = match query.sort_field.as_deref() {
            None => SortField::CreatedAt,
            Some(value) => SortField::parse(value).ok_or_else(|| ApiError::bad_request("Invalid sort field"))?,
        };

        Ok(Self {
            page,
            page_size,
            sort_field,
            sort_order,
            search: query.search.unwrap_or_default(),
        })
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Filter document shared by the page query and the total count.
    pub fn filter(&self) -> Option<Value> {
        if self.search.is_empty() {
            return None;
        }
        let pattern = contains_pattern(&self.search);
        Some(json!({
            "$or": [
                { "name": { "$ilike": pattern } },
                { "description": { "$ilike": pattern } }
            ]
        }))
    }

    pub fn to_filter_data(&self) -> FilterData {
        FilterData {
            where_clause: self.filter(),
            order: vec![
                FilterOrderInfo::new(self.sort_field.column(), self.sort_order),
                // tiebreak so equal sort keys page deterministically
                FilterOrderInfo::new("id", SortDirection::Asc),
            ],
            limit: Some(self.page_size),
            offset: Some(self.skip()),
        }
    }
}

fn parse_int(raw: Option<&str>, default: i64) -> Option<i64> {
    match raw {
        None => Some(default),
        Some(s) => s.parse().ok(),
    }
}
