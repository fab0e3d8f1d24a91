use chrono::NaiveDateTime;
use sqlx::{
    self,
    postgres::{PgArguments, PgRow},
    query::{Query, QueryAs},
    FromRow, Postgres,
};

/// A typed value ready to be bound as a query parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            SqlValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Query text with its positional parameters ($1, $2, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}

impl SqlResult {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), params: vec![] }
    }

    /// Adds a parameter and returns its placeholder
    pub fn push_param(&mut self, value: SqlValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    pub fn to_query(&self) -> Query<'_, Postgres, PgArguments> {
        self.params.iter().fold(sqlx::query(&self.query), |q, p| bind_param_query(q, p))
    }

    pub fn to_query_as<O>(&self) -> QueryAs<'_, Postgres, O, PgArguments>
    where
        O: for<'r> FromRow<'r, PgRow>,
    {
        self.params
            .iter()
            .fold(sqlx::query_as::<_, O>(&self.query), |q, p| bind_param_query_as(q, p))
    }
}

fn bind_param_query<'q>(
    q: Query<'q, Postgres, PgArguments>,
    v: &'q SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match v {
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Text(s) => q.bind(s.as_str()),
        SqlValue::Timestamp(ts) => q.bind(*ts),
    }
}

fn bind_param_query_as<'q, O>(
    q: QueryAs<'q, Postgres, O, PgArguments>,
    v: &'q SqlValue,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Text(s) => q.bind(s.as_str()),
        SqlValue::Timestamp(ts) => q.bind(*ts),
    }
}
