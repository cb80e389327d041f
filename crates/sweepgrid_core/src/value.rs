//! Hyperparameter values as they appear in sweep trials.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// A single hyperparameter setting.
///
/// Sweep settings are categorical: counts, rates, kernel names, layer shapes.
/// Equality is exact, with one allowance: an integer and a float denote the
/// same setting when they are numerically equal (`1 == 1.0`), since JSON
/// producers are not consistent about writing a fractional part.
///
/// On the wire a value is plain JSON (`5`, `0.2`, `"rbf"`, `[50, 50]`, `null`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Explicitly unset (`null`), e.g. an unbounded tree depth.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer setting (estimator counts, depths, neighbours).
    Int(i64),
    /// Floating point setting (regularization strength, learning rate).
    Float(f64),
    /// Named option (kernel, activation function).
    Categorical(String),
    /// Tuple-valued setting such as hidden layer sizes.
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Convert a JSON value into a parameter value.
    ///
    /// Objects have no meaning as sweep coordinates and are rejected.
    pub fn from_json(name: &str, value: &serde_json::Value) -> Result<Self> {
        use serde_json::Value;

        Ok(match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ParamValue::Int(i),
                None => ParamValue::Float(n.as_f64().ok_or_else(|| CoreError::UnsupportedValue {
                    name: name.to_string(),
                    got: n.to_string(),
                })?),
            },
            Value::String(s) => ParamValue::Categorical(s.clone()),
            Value::Array(items) => ParamValue::List(
                items
                    .iter()
                    .map(|item| Self::from_json(name, item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(_) => {
                return Err(CoreError::UnsupportedValue {
                    name: name.to_string(),
                    got: value.to_string(),
                })
            }
        })
    }

    /// Get the value as a float, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Int(v) => Some(*v as f64),
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get the value as a categorical string, if it is one.
    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            ParamValue::Categorical(v) => Some(v),
            _ => None,
        }
    }

    /// Check if the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        use ParamValue::*;

        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => *a as f64 == *b,
            (Categorical(a), Categorical(b)) => a == b,
            (List(a), List(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Null => write!(f, "null"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            // Debug keeps the fractional part: 1000.0 rather than 1000
            ParamValue::Float(v) => write!(f, "{v:?}"),
            ParamValue::Categorical(v) => write!(f, "{v}"),
            ParamValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Categorical(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Categorical(v)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(v: Vec<T>) -> Self {
        ParamValue::List(v.into_iter().map(Into::into).collect())
    }
}
