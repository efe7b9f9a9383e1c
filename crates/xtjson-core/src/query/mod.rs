//! Module: query
//! Responsibility: XTQL query and query-tail builders and their JSON forms.
//! Does not own: encoding (see `encode`) or query validation.
//! Boundary: user-facing builder layer.

mod tail;


use crate::{
    domain::{DomainValue, Query, QueryTail, ToJson},
    value::{Value, ValueMap},
};
use std::sync::Arc;

pub use tail::{
    Limit, NullsOrder, Offset, OrderBy, OrderDirection, OrderSpec, Return, Where, With, Without,
};

///
/// Binding
///
/// Column binding used by `from`, `return` and `with`.
/// Renders as the bare column name when no expression is attached.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub column: String,
    pub expr: Option<Value>,
}

impl Binding {
    /// Bind a column to the logic variable of the same name.
    pub fn column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            expr: None,
        }
    }

    /// Bind a column to an explicit expression.
    pub fn expr(column: impl Into<String>, expr: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            expr: Some(expr.into()),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match &self.expr {
            None => Value::Text(self.column.clone()),
            Some(expr) => Value::Map(ValueMap::new().with(self.column.clone(), expr.clone())),
        }
    }
}

impl From<&str> for Binding {
    fn from(column: &str) -> Self {
        Self::column(column)
    }
}

pub(crate) fn bindings_value(bindings: &[Binding]) -> Value {
    Value::List(bindings.iter().map(Binding::to_value).collect())
}

///
/// FromTable
///
/// Source operator reading rows of one table.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FromTable {
    pub table: String,
    pub bind: Vec<Binding>,
}

impl FromTable {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            bind: Vec::new(),
        }
    }

    /// Append bindings to the source.
    #[must_use]
    pub fn bind<I, B>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        self.bind.extend(bindings.into_iter().map(Into::into));
        self
    }
}

impl ToJson for FromTable {
    fn to_json(&self) -> Value {
        Value::Map(
            ValueMap::new()
                .with("from", self.table.as_str())
                .with("bind", bindings_value(&self.bind)),
        )
    }
}

impl Query for FromTable {}

///
/// Pipeline
///
/// A head query followed by an ordered list of tails.
///

#[derive(Clone, Debug)]
pub struct Pipeline {
    head: Arc<dyn Query>,
    tails: Vec<Arc<dyn QueryTail>>,
}

impl Pipeline {
    pub fn new(head: impl Query + 'static) -> Self {
        Self {
            head: Arc::new(head),
            tails: Vec::new(),
        }
    }

    /// Append one tail to the pipeline.
    #[must_use]
    pub fn then(mut self, tail: impl QueryTail + 'static) -> Self {
        self.tails.push(Arc::new(tail));
        self
    }
}

impl ToJson for Pipeline {
    fn to_json(&self) -> Value {
        let mut items = Vec::with_capacity(self.tails.len() + 1);
        items.push(Value::Domain(DomainValue::Query(Arc::clone(&self.head))));
        items.extend(
            self.tails
                .iter()
                .map(|tail| Value::Domain(DomainValue::QueryTail(Arc::clone(tail)))),
        );

        Value::List(items)
    }
}

impl Query for Pipeline {}

///
/// UnionAll
///

#[derive(Clone, Debug, Default)]
pub struct UnionAll {
    queries: Vec<Arc<dyn Query>>,
}

impl UnionAll {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with(mut self, query: impl Query + 'static) -> Self {
        self.queries.push(Arc::new(query));
        self
    }
}

impl ToJson for UnionAll {
    fn to_json(&self) -> Value {
        let queries = self
            .queries
            .iter()
            .map(|query| Value::Domain(DomainValue::Query(Arc::clone(query))))
            .collect();

        Value::Map(ValueMap::new().with("union_all", Value::List(queries)))
    }
}

impl Query for UnionAll {}

//
// Value conversions for the builders above.
//

macro_rules! impl_into_value {
    ( $ctor:ident => $( $ty:ty ),* ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$ctor(value)
                }
            }
        )*
    };
}

impl_into_value!(query => FromTable, Pipeline, UnionAll);
impl_into_value!(query_tail => Where, Limit, Offset, OrderBy, Without, Return, With);
