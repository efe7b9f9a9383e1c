//! Module: decode
//! Responsibility: parse transaction bodies, `without` clauses and result
//! rows received as JSON.
//! Does not own: the encode direction (see `encode`).

mod key_fn;


use crate::{
    error::Error,
    query::Without,
    tx::{Call, Delete, Erase, Put, Sql, Tx, TxOperation, TxOptions, Xtql},
    value::{Value, ValueMap},
};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error as ThisError;

pub use key_fn::KeyFn;

/// One decoded result row, keys already denormalized.
pub type Row = Map<String, JsonValue>;

///
/// DecodeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(String),

    #[error("malformed transaction: {reason}")]
    MalformedTx { reason: String },

    #[error("malformed transaction operation at index {index}: {reason}")]
    MalformedTxOp { index: usize, reason: String },

    #[error("{reason}")]
    MalformedWithout { reason: String, json: String },

    #[error("malformed result: {reason}")]
    MalformedRows { reason: String },
}

impl DecodeError {
    /// Stable, namespaced error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Json(_) => "xtql/invalid-json",
            Self::MalformedTx { .. } => "xtql/malformed-tx",
            Self::MalformedTxOp { .. } => "xtql/malformed-tx-op",
            Self::MalformedWithout { .. } => "xtql/malformed-without",
            Self::MalformedRows { .. } => "xtql/malformed-result",
        }
    }
}

fn parse(text: &str) -> Result<JsonValue, DecodeError> {
    serde_json::from_str(text).map_err(|err| DecodeError::Json(err.to_string()))
}

//
// Transactions
//

/// Operation keys, in dispatch order.
const TX_OP_KEYS: [&str; 6] = ["put", "delete", "erase", "sql", "xtql", "call"];

/// Decode a transaction body: `{"tx_ops": [...], "opts": {...}}`.
pub fn decode_tx(text: &str) -> Result<Tx, Error> {
    let tx = tx_from_json(&parse(text)?)?;
    tracing::debug!(ops = tx.ops.len(), "decoded transaction");

    Ok(tx)
}

fn malformed_tx(reason: impl Into<String>) -> DecodeError {
    DecodeError::MalformedTx {
        reason: reason.into(),
    }
}

pub(crate) fn tx_from_json(json: &JsonValue) -> Result<Tx, DecodeError> {
    let JsonValue::Object(body) = json else {
        return Err(malformed_tx("transaction body must be an object"));
    };

    let ops = match body.get("tx_ops") {
        Some(JsonValue::Array(ops)) => ops,
        Some(_) => return Err(malformed_tx("tx_ops must be a list")),
        None => return Err(malformed_tx("missing tx_ops")),
    };

    let ops = ops
        .iter()
        .enumerate()
        .map(|(index, op)| {
            tx_op_from_json(op).map_err(|reason| DecodeError::MalformedTxOp { index, reason })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let opts = match body.get("opts") {
        None | Some(JsonValue::Null) => TxOptions::default(),
        Some(JsonValue::Object(opts)) => TxOptions {
            system_time: optional_str(opts, "system_time").map_err(malformed_tx)?,
            default_tz: optional_str(opts, "default_tz").map_err(malformed_tx)?,
        },
        Some(_) => return Err(malformed_tx("opts must be an object")),
    };

    Ok(Tx { ops, opts })
}

fn tx_op_from_json(op: &JsonValue) -> Result<TxOperation, String> {
    let JsonValue::Object(fields) = op else {
        return Err("operation must be an object".to_string());
    };

    let mut keys = TX_OP_KEYS.into_iter().filter(|key| fields.contains_key(*key));
    let Some(key) = keys.next() else {
        return Err(format!(
            "unknown operation, expected one of: {}",
            TX_OP_KEYS.join(", ")
        ));
    };
    if keys.next().is_some() {
        return Err("ambiguous operation".to_string());
    }

    let op = match key {
        "put" => TxOperation::Put(Put {
            table: required_str(fields, "put")?,
            doc: match fields.get("doc") {
                Some(JsonValue::Object(doc)) => map_from_json(doc),
                Some(_) => return Err("doc must be an object".to_string()),
                None => return Err("missing doc".to_string()),
            },
            valid_from: optional_str(fields, "valid_from")?,
            valid_to: optional_str(fields, "valid_to")?,
        }),
        "delete" => TxOperation::Delete(Delete {
            table: required_str(fields, "delete")?,
            id: required(fields, "id")?,
            valid_from: optional_str(fields, "valid_from")?,
            valid_to: optional_str(fields, "valid_to")?,
        }),
        "erase" => TxOperation::Erase(Erase {
            table: required_str(fields, "erase")?,
            id: required(fields, "id")?,
        }),
        "sql" => {
            let mut sql = Sql::new(required_str(fields, "sql")?);
            if let Some(rows) = optional_list(fields, "arg_rows")? {
                let rows = rows
                    .iter()
                    .map(|row| match row {
                        JsonValue::Array(args) => {
                            Ok(args.iter().cloned().map(Value::from).collect::<Vec<_>>())
                        }
                        _ => Err("arg_rows must be a list of lists".to_string()),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                sql = sql.with_arg_rows(rows);
            }

            TxOperation::Sql(sql)
        }
        "xtql" => {
            let xtql = Xtql::new(required(fields, "xtql")?);
            match optional_list(fields, "args")? {
                Some(args) => {
                    let args = args
                        .iter()
                        .map(|arg| match arg {
                            JsonValue::Object(arg) => Ok(map_from_json(arg)),
                            _ => Err("args must be a list of objects".to_string()),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    TxOperation::Xtql(xtql.with_args(args))
                }
                None => TxOperation::Xtql(xtql),
            }
        }
        _ => {
            let args: Vec<Value> = optional_list(fields, "args")?
                .map(|args| args.iter().cloned().map(Value::from).collect())
                .unwrap_or_default();

            TxOperation::Call(Call {
                fn_id: required_str(fields, "call")?,
                args,
            })
        }
    };

    Ok(op)
}

fn map_from_json(entries: &Map<String, JsonValue>) -> ValueMap {
    entries
        .iter()
        .map(|(key, value)| (key.clone(), Value::from(value.clone())))
        .collect()
}

fn required(fields: &Map<String, JsonValue>, key: &str) -> Result<Value, String> {
    fields
        .get(key)
        .map(|value| Value::from(value.clone()))
        .ok_or_else(|| format!("missing {key}"))
}

fn required_str(fields: &Map<String, JsonValue>, key: &str) -> Result<String, String> {
    match fields.get(key) {
        Some(JsonValue::String(text)) => Ok(text.clone()),
        Some(_) => Err(format!("{key} must be a string")),
        None => Err(format!("missing {key}")),
    }
}

fn optional_str(fields: &Map<String, JsonValue>, key: &str) -> Result<Option<String>, String> {
    match fields.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

fn optional_list<'a>(
    fields: &'a Map<String, JsonValue>,
    key: &str,
) -> Result<Option<&'a [JsonValue]>, String> {
    match fields.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Array(items)) => Ok(Some(items.as_slice())),
        Some(_) => Err(format!("{key} must be a list")),
    }
}

//
// Without
//

/// Decode a `{"without": ["col", ...]}` query tail.
pub fn decode_without(text: &str) -> Result<Without, Error> {
    Ok(without_from_json(&parse(text)?)?)
}

pub(crate) fn without_from_json(json: &JsonValue) -> Result<Without, DecodeError> {
    let malformed = |reason: &str| DecodeError::MalformedWithout {
        reason: reason.to_string(),
        json: serde_json::to_string_pretty(json).unwrap_or_default(),
    };

    let Some(without) = json.get("without") else {
        return Err(malformed("malformed without clause"));
    };

    let JsonValue::Array(columns) = without else {
        return Err(malformed("Without should be a list of strings"));
    };

    let columns = columns
        .iter()
        .map(|column| match column {
            JsonValue::String(column) => Ok(column.clone()),
            _ => Err(malformed("All items in Without clause must be strings")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Without { columns })
}

//
// Result rows
//

/// Decode a result body and denormalize every key with `key_fn`.
///
/// Accepts a JSON array of objects or JSON Lines (one object per line,
/// blank lines ignored).
pub fn decode_rows(text: &str, key_fn: KeyFn) -> Result<Vec<Row>, Error> {
    let rows = if text.trim_start().starts_with('[') {
        match parse(text)? {
            JsonValue::Array(items) => items,
            _ => {
                return Err(DecodeError::MalformedRows {
                    reason: "result must be a list".to_string(),
                }
                .into());
            }
        }
    } else {
        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(parse)
            .collect::<Result<Vec<_>, _>>()?
    };

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            JsonValue::Object(entries) => Ok(key_fn.denormalize_object(entries)),
            _ => Err(DecodeError::MalformedRows {
                reason: format!("row {index} is not an object"),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rows = rows.len(), ?key_fn, "decoded result rows");

    Ok(rows)
}
