use crate::{
    domain::{QueryTail, ToJson},
    query::{Binding, bindings_value},
    value::{Value, ValueMap},
};

// Single-key object, the shape shared by every tail.
fn tail_object(key: &str, body: impl Into<Value>) -> Value {
    Value::Map(ValueMap::new().with(key, body))
}

///
/// Where
///
/// Filters rows by a conjunction of predicate expressions.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Where {
    pub predicates: Vec<Value>,
}

impl Where {
    pub fn new<I, V>(predicates: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            predicates: predicates.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToJson for Where {
    fn to_json(&self) -> Value {
        tail_object("where", self.predicates.clone())
    }
}

impl QueryTail for Where {}

///
/// Limit
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limit(pub u64);

impl ToJson for Limit {
    fn to_json(&self) -> Value {
        tail_object("limit", self.0)
    }
}

impl QueryTail for Limit {}

///
/// Offset
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Offset(pub u64);

impl ToJson for Offset {
    fn to_json(&self) -> Value {
        tail_object("offset", self.0)
    }
}

impl QueryTail for Offset {}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

///
/// NullsOrder
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NullsOrder {
    First,
    Last,
}

impl NullsOrder {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
        }
    }
}

///
/// OrderSpec
///
/// One ordering key. `nulls` is omitted from the JSON form when unset.
///

#[derive(Clone, Debug, PartialEq)]
pub struct OrderSpec {
    pub val: Value,
    pub dir: OrderDirection,
    pub nulls: Option<NullsOrder>,
}

impl OrderSpec {
    pub fn asc(val: impl Into<Value>) -> Self {
        Self {
            val: val.into(),
            dir: OrderDirection::Asc,
            nulls: None,
        }
    }

    pub fn desc(val: impl Into<Value>) -> Self {
        Self {
            val: val.into(),
            dir: OrderDirection::Desc,
            nulls: None,
        }
    }

    #[must_use]
    pub fn nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }

    fn to_value(&self) -> Value {
        let mut spec = ValueMap::new()
            .with("val", self.val.clone())
            .with("dir", self.dir.label());
        spec.insert_opt("nulls", self.nulls.map(NullsOrder::label));

        Value::Map(spec)
    }
}

///
/// OrderBy
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderBy {
    pub specs: Vec<OrderSpec>,
}

impl OrderBy {
    #[must_use]
    pub fn new(specs: Vec<OrderSpec>) -> Self {
        Self { specs }
    }
}

impl ToJson for OrderBy {
    fn to_json(&self) -> Value {
        let specs: Vec<Value> = self.specs.iter().map(OrderSpec::to_value).collect();
        tail_object("order_by", specs)
    }
}

impl QueryTail for OrderBy {}

///
/// Without
///
/// Drops the named columns from the relation.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Without {
    pub columns: Vec<String>,
}

impl Without {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToJson for Without {
    fn to_json(&self) -> Value {
        tail_object("without", self.columns.clone())
    }
}

impl QueryTail for Without {}

///
/// Return
///
/// Projects the relation onto the given bindings.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Return {
    pub bindings: Vec<Binding>,
}

impl Return {
    pub fn new<I, B>(bindings: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        Self {
            bindings: bindings.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToJson for Return {
    fn to_json(&self) -> Value {
        tail_object("return", bindings_value(&self.bindings))
    }
}

impl QueryTail for Return {}

///
/// With
///
/// Adds computed columns, keeping the existing ones.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct With {
    pub bindings: Vec<Binding>,
}

impl With {
    pub fn new<I, B>(bindings: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Binding>,
    {
        Self {
            bindings: bindings.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToJson for With {
    fn to_json(&self) -> Value {
        tail_object("with", bindings_value(&self.bindings))
    }
}

impl QueryTail for With {}
