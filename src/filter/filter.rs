use serde_json::Value;

use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{validate_identifier, FilterData, FilterOrderInfo, SqlResult};

pub struct Filter {
    namespace: String,
    table_name: String,
    select_columns: Vec<String>,
    where_data: Option<Value>,
    order_data: Vec<FilterOrderInfo>,
    text_columns: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(namespace: impl Into<String>, table_name: impl Into<String>) -> Result<Self, FilterError> {
        let namespace = namespace.into();
        let table_name = table_name.into();
        for name in [&namespace, &table_name] {
            if !validate_identifier(name) {
                return Err(FilterError::InvalidTableName(format!("Invalid table name format: {}", name)));
            }
        }
        Ok(Self {
            namespace,
            table_name,
            select_columns: vec![],
            where_data: None,
            order_data: vec![],
            text_columns: vec![],
            limit: None,
            offset: None,
        })
    }

    pub fn assign(&mut self, data: FilterData) -> Result<&mut Self, FilterError> {
        if let Some(where_clause) = data.where_clause { self.where_clause(where_clause)?; }
        if !data.order.is_empty() { self.order(data.order)?; }
        if let Some(limit) = data.limit { self.limit(limit, data.offset)?; }
        else if let Some(offset) = data.offset { self.offset(offset)?; }
        Ok(self)
    }

    pub fn select(&mut self, columns: &[&str]) -> Result<&mut Self, FilterError> {
        for column in columns {
            if !validate_identifier(column) {
                return Err(FilterError::InvalidColumn(format!("Invalid column name format: {}", column)));
            }
        }
        self.select_columns = columns.iter().map(|c| c.to_string()).collect();
        Ok(self)
    }

    /// Marks columns whose ordering compares bytes rather than locale.
    pub fn text_columns(&mut self, columns: &[&str]) -> Result<&mut Self, FilterError> {
        for column in columns {
            if !validate_identifier(column) {
                return Err(FilterError::InvalidColumn(format!("Invalid column name format: {}", column)));
            }
        }
        self.text_columns = columns.iter().map(|c| c.to_string()).collect();
        Ok(self)
    }

    pub fn where_clause(&mut self, conditions: Value) -> Result<&mut Self, FilterError> {
        FilterWhere::validate(&conditions)?;
        self.where_data = Some(conditions);
        Ok(self)
    }

    pub fn order(&mut self, order: Vec<FilterOrderInfo>) -> Result<&mut Self, FilterError> {
        FilterOrder::validate(&order)?;
        self.order_data = order;
        Ok(self)
    }

    pub fn limit(&mut self, limit: i64, offset: Option<i64>) -> Result<&mut Self, FilterError> {
        if limit < 0 { return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string())); }
        self.limit = Some(limit);
        if let Some(off) = offset { self.offset(off)?; }
        Ok(self)
    }

    pub fn offset(&mut self, offset: i64) -> Result<&mut Self, FilterError> {
        if offset < 0 { return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string())); }
        self.offset = Some(offset);
        Ok(self)
    }

    pub fn qualified_table(&self) -> String {
        format!("\"{}\".\"{}\"", self.namespace, self.table_name)
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let select_clause = self.build_select_clause();
        let where_result = self.to_where_sql()?;
        let order_clause = FilterOrder::generate(&self.order_data, &self.text_columns)?;
        let limit_clause = self.build_limit_clause();

        let query = [
            format!("SELECT {}", select_clause),
            format!("FROM {}", self.qualified_table()),
            if where_result.query.is_empty() { String::new() } else { format!("WHERE {}", where_result.query) },
            order_clause,
            limit_clause,
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        Ok(SqlResult { query, params: where_result.params })
    }

    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        let (query, params) = match self.where_data {
            Some(ref where_data) => FilterWhere::generate(where_data, 0)?,
            None => (String::new(), vec![]),
        };
        Ok(SqlResult { query, params })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql()?;
        let query = if where_result.query.is_empty() {
            format!("SELECT COUNT(*) AS count FROM {}", self.qualified_table())
        } else {
            format!("SELECT COUNT(*) AS count FROM {} WHERE {}", self.qualified_table(), where_result.query)
        };
        Ok(SqlResult { query, params: where_result.params })
    }

    fn build_select_clause(&self) -> String {
        if self.select_columns.is_empty() {
            "*".to_string()
        } else {
            self.select_columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ")
        }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            (None, Some(o)) => format!("OFFSET {}", o),
            (None, None) => String::new(),
        }
    }
}
