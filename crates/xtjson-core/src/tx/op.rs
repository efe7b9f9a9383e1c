use crate::{
    domain::{ToJson, TxOp},
    value::{Value, ValueMap},
};

///
/// Put
///
/// Upsert one document into a table, optionally over a valid-time range.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Put {
    pub table: String,
    pub doc: ValueMap,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
}

impl Put {
    pub fn new(table: impl Into<String>, doc: ValueMap) -> Self {
        Self {
            table: table.into(),
            doc,
            valid_from: None,
            valid_to: None,
        }
    }

    #[must_use]
    pub fn starting_from(mut self, valid_from: impl Into<String>) -> Self {
        self.valid_from = Some(valid_from.into());
        self
    }

    #[must_use]
    pub fn until(mut self, valid_to: impl Into<String>) -> Self {
        self.valid_to = Some(valid_to.into());
        self
    }
}

impl ToJson for Put {
    fn to_json(&self) -> Value {
        let mut body = ValueMap::new()
            .with("put", self.table.as_str())
            .with("doc", self.doc.clone());
        body.insert_opt("valid_from", self.valid_from.clone());
        body.insert_opt("valid_to", self.valid_to.clone());

        Value::Map(body)
    }
}

impl TxOp for Put {}

///
/// Delete
///
/// Delete one entity by id, optionally over a valid-time range.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Delete {
    pub table: String,
    pub id: Value,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
}

impl Delete {
    pub fn new(table: impl Into<String>, id: impl Into<Value>) -> Self {
        Self {
            table: table.into(),
            id: id.into(),
            valid_from: None,
            valid_to: None,
        }
    }

    #[must_use]
    pub fn starting_from(mut self, valid_from: impl Into<String>) -> Self {
        self.valid_from = Some(valid_from.into());
        self
    }

    #[must_use]
    pub fn until(mut self, valid_to: impl Into<String>) -> Self {
        self.valid_to = Some(valid_to.into());
        self
    }
}

impl ToJson for Delete {
    fn to_json(&self) -> Value {
        let mut body = ValueMap::new()
            .with("delete", self.table.as_str())
            .with("id", self.id.clone());
        body.insert_opt("valid_from", self.valid_from.clone());
        body.insert_opt("valid_to", self.valid_to.clone());

        Value::Map(body)
    }
}

impl TxOp for Delete {}

///
/// Erase
///
/// Remove every version of an entity, across all of time.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Erase {
    pub table: String,
    pub id: Value,
}

impl Erase {
    pub fn new(table: impl Into<String>, id: impl Into<Value>) -> Self {
        Self {
            table: table.into(),
            id: id.into(),
        }
    }
}

impl ToJson for Erase {
    fn to_json(&self) -> Value {
        Value::Map(
            ValueMap::new()
                .with("erase", self.table.as_str())
                .with("id", self.id.clone()),
        )
    }
}

impl TxOp for Erase {}

///
/// Sql
///
/// SQL DML statement, executed once per argument row when rows are given.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Sql {
    pub sql: String,
    pub arg_rows: Option<Vec<Vec<Value>>>,
}

impl Sql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            arg_rows: None,
        }
    }

    #[must_use]
    pub fn with_arg_rows(mut self, arg_rows: Vec<Vec<Value>>) -> Self {
        self.arg_rows = Some(arg_rows);
        self
    }
}

impl ToJson for Sql {
    fn to_json(&self) -> Value {
        let mut body = ValueMap::new().with("sql", self.sql.as_str());
        body.insert_opt("arg_rows", self.arg_rows.clone());

        Value::Map(body)
    }
}

impl TxOp for Sql {}

///
/// Xtql
///
/// XTQL DML operation. The query is usually an embedded domain value
/// but may also be its already-converted JSON form.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Xtql {
    query: Value,
    args: Option<Vec<ValueMap>>,
}

impl Xtql {
    pub fn new(query: impl Into<Value>) -> Self {
        Self {
            query: query.into(),
            args: None,
        }
    }

    #[must_use]
    pub const fn query(&self) -> &Value {
        &self.query
    }

    #[must_use]
    pub fn args(&self) -> Option<&[ValueMap]> {
        self.args.as_deref()
    }

    /// Return a copy of this operation bound to the given argument maps.
    #[must_use]
    pub fn with_args(&self, args: Vec<ValueMap>) -> Self {
        Self {
            query: self.query.clone(),
            args: Some(args),
        }
    }
}

impl ToJson for Xtql {
    fn to_json(&self) -> Value {
        let mut body = ValueMap::new().with("xtql", self.query.clone());
        body.insert_opt("args", self.args.clone());

        Value::Map(body)
    }
}

impl TxOp for Xtql {}

///
/// Call
///
/// Invoke a stored transaction function.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub fn_id: String,
    pub args: Vec<Value>,
}

impl Call {
    pub fn new<I, V>(fn_id: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            fn_id: fn_id.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl ToJson for Call {
    fn to_json(&self) -> Value {
        Value::Map(
            ValueMap::new()
                .with("call", self.fn_id.as_str())
                .with("args", self.args.clone()),
        )
    }
}

impl TxOp for Call {}
