use std::cmp::Ordering;

use super::error::FilterError;
use super::types::{validate_identifier, FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    pub fn validate(infos: &[FilterOrderInfo]) -> Result<(), FilterError> {
        for info in infos {
            if !validate_identifier(&info.column) {
                return Err(FilterError::InvalidColumn(info.column.clone()));
            }
        }
        Ok(())
    }

    /// Columns listed in `text_columns` sort by byte order (`COLLATE "C"`),
    /// not by the database locale.
    pub fn generate(infos: &[FilterOrderInfo], text_columns: &[String]) -> Result<String, FilterError> {
        if infos.is_empty() { return Ok(String::new()); }
        Self::validate(infos)?;
        let parts: Vec<String> = infos
            .iter()
            .map(|i| {
                if text_columns.contains(&i.column) {
                    format!("\"{}\" COLLATE \"C\" {}", i.column, i.sort.to_sql())
                } else {
                    format!("\"{}\" {}", i.column, i.sort.to_sql())
                }
            })
            .collect();
        Ok(format!("ORDER BY {}", parts.join(", ")))
    }

    /// Lexicographic comparison over the sort list; `key` yields the per-column ordering.
    pub fn compare<T, F>(infos: &[FilterOrderInfo], a: &T, b: &T, mut key: F) -> Ordering
    where
        F: FnMut(&str, &T, &T) -> Ordering,
    {
        for info in infos {
            let ordering = match info.sort {
                SortDirection::Asc => key(&info.column, a, b),
                SortDirection::Desc => key(&info.column, a, b).reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}
