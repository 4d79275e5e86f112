use serde_json::{Map, Value};

use super::error::FilterError;
use super::types::{validate_identifier, FilterOp, FilterWhereInfo};

/// Renders a filter document into a parameterised SQL predicate, or evaluates
/// it directly against a JSON document.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LikeToken {
    Char(char),
    One,
    Many,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Returns the predicate (empty when the filter matches everything) and its bind values.
    pub fn generate(where_data: &Value, starting_param_index: usize) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        let sql = filter_where.build(where_data)?;
        Ok((sql, filter_where.param_values))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        match where_data {
            Value::Null | Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        }
    }

    /// Evaluates the filter document against `document` with the same semantics as the SQL form.
    pub fn matches(where_data: &Value, document: &Value) -> Result<bool, FilterError> {
        let obj = match where_data {
            Value::Null => return Ok(true),
            Value::Object(obj) => obj,
            _ => return Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        };

        for (key, value) in obj {
            let matched = if key.starts_with('$') {
                let (op, clauses) = Self::logical_clauses(key, value)?;
                let mut results = Vec::with_capacity(clauses.len());
                for clause in clauses {
                    results.push(Self::matches(clause, document)?);
                }
                match op {
                    "$and" => results.iter().all(|m| *m),
                    _ => results.iter().any(|m| *m),
                }
            } else {
                let field_value = document.get(key).unwrap_or(&Value::Null);
                let mut all = true;
                for condition in Self::parse_field_condition(key, value)? {
                    all &= Self::condition_matches(&condition, field_value)?;
                }
                all
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn build(&mut self, where_data: &Value) -> Result<String, FilterError> {
        let obj: &Map<String, Value> = match where_data {
            Value::Null => return Ok(String::new()),
            Value::Object(obj) => obj,
            _ => return Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        };

        let mut sql_conditions = vec![];
        for (key, value) in obj {
            if key.starts_with('$') {
                sql_conditions.push(self.build_logical_operator(key, value)?);
            } else {
                for condition in Self::parse_field_condition(key, value)? {
                    sql_conditions.push(self.build_sql_condition(&condition)?);
                }
            }
        }
        Ok(sql_conditions.join(" AND "))
    }

    fn logical_clauses<'a>(op: &'a str, value: &'a Value) -> Result<(&'a str, &'a Vec<Value>), FilterError> {
        if op != "$and" && op != "$or" {
            return Err(FilterError::UnsupportedOperator(op.to_string()));
        }
        let arr = value
            .as_array()
            .ok_or_else(|| FilterError::InvalidOperatorData(format!("{} requires array", op)))?;
        if arr.is_empty() {
            return Err(FilterError::InvalidOperatorData(format!("{} requires a non-empty array", op)));
        }
        Ok((op, arr))
    }

    fn build_logical_operator(&mut self, op: &str, value: &Value) -> Result<String, FilterError> {
        let (op, clauses) = Self::logical_clauses(op, value)?;
        let mut sql_parts = Vec::with_capacity(clauses.len());
        for clause in clauses {
            let sql = self.build(clause)?;
            sql_parts.push(if sql.is_empty() { "TRUE".to_string() } else { format!("({})", sql) });
        }
        let joiner = if op == "$and" { " AND " } else { " OR " };
        Ok(format!("({})", sql_parts.join(joiner)))
    }

    fn parse_field_condition(field: &str, value: &Value) -> Result<Vec<FilterWhereInfo>, FilterError> {
        if !validate_identifier(field) {
            return Err(FilterError::InvalidColumn(field.to_string()));
        }
        match value {
            Value::Object(obj) => obj
                .iter()
                .map(|(op_key, op_val)| {
                    let operator = FilterOp::from_key(op_key)
                        .ok_or_else(|| FilterError::UnsupportedOperator(op_key.clone()))?;
                    if operator == FilterOp::ILike && !op_val.is_string() {
                        return Err(FilterError::InvalidOperatorData("$ilike requires a string pattern".to_string()));
                    }
                    Ok(FilterWhereInfo { column: field.to_string(), operator, data: op_val.clone() })
                })
                .collect(),
            // Implicit equality: { field: value }
            _ => Ok(vec![FilterWhereInfo { column: field.to_string(), operator: FilterOp::Eq, data: value.clone() }]),
        }
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        let quoted_column = format!("\"{}\"", condition.column);
        match condition.operator {
            FilterOp::Eq => {
                if condition.data.is_null() {
                    Ok(format!("{} IS NULL", quoted_column))
                } else {
                    Ok(format!("{} = {}", quoted_column, self.param(condition.data.clone())))
                }
            }
            FilterOp::ILike => Ok(format!("{} ILIKE {}", quoted_column, self.param(condition.data.clone()))),
        }
    }

    fn condition_matches(condition: &FilterWhereInfo, field_value: &Value) -> Result<bool, FilterError> {
        match condition.operator {
            FilterOp::Eq => Ok(field_value == &condition.data),
            FilterOp::ILike => {
                let pattern = condition
                    .data
                    .as_str()
                    .ok_or_else(|| FilterError::InvalidOperatorData("$ilike requires a string pattern".to_string()))?;
                Ok(field_value.as_str().is_some_and(|text| ilike(pattern, text)))
            }
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Case-insensitive `LIKE` with `%`, `_` and backslash escapes.
fn ilike(pattern: &str, text: &str) -> bool {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().flat_map(char::to_lowercase);
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '\\' => LikeToken::Char(chars.next().unwrap_or('\\')),
            '%' => LikeToken::Many,
            '_' => LikeToken::One,
            other => LikeToken::Char(other),
        });
    }
    let text: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();

    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        match tokens.get(p) {
            Some(LikeToken::Many) => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(LikeToken::One) => {
                p += 1;
                t += 1;
            }
            Some(LikeToken::Char(c)) if *c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((bp, bt)) => {
                    p = bp + 1;
                    t = bt + 1;
                    backtrack = Some((bp, bt + 1));
                }
                None => return false,
            },
        }
    }
    tokens[p..].iter().all(|tok| *tok == LikeToken::Many)
}
