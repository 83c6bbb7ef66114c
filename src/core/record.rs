use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Identifier of one input record.
///
/// Hosts feed either numeric or textual ids; both are kept distinct, so
/// `Number(1)` and `Text("1")` never collide as reconciliation keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LeafId {
    Number(i64),
    Text(String),
}

impl LeafId {
    /// Key stored on rendered elements for keyed joins.
    #[must_use]
    pub fn join_key(&self) -> String {
        match self {
            Self::Number(value) => format!("n:{value}"),
            Self::Text(value) => format!("s:{value}"),
        }
    }
}

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for LeafId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for LeafId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for LeafId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for LeafId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One weighted input unit rendered as a bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafRecord {
    pub id: LeafId,
    pub label: String,
    pub value: f64,
}

impl LeafRecord {
    #[must_use]
    pub fn new(id: impl Into<LeafId>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.value.is_finite() {
            return Err(ChartError::InvalidRecord(format!(
                "record `{}` value must be finite",
                self.id
            )));
        }
        if self.value < 0.0 {
            return Err(ChartError::InvalidRecord(format!(
                "record `{}` value must be >= 0",
                self.id
            )));
        }
        Ok(())
    }

    /// Parses a JSON array of records.
    ///
    /// Records carrying `name` instead of `label` are rejected: `label` is the
    /// only supported field.
    pub fn list_from_json_str(input: &str) -> ChartResult<Vec<Self>> {
        let raw: Vec<RawLeafRecord> = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidRecord(format!("failed to parse record list json: {e}"))
        })?;
        raw.into_iter().map(RawLeafRecord::into_record).collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawLeafRecord {
    id: LeafId,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    name: Option<String>,
    value: serde_json::Value,
}

impl RawLeafRecord {
    fn into_record(self) -> ChartResult<LeafRecord> {
        let label = match (self.label, self.name) {
            (Some(label), _) => label,
            (None, Some(_)) => {
                return Err(ChartError::InvalidRecord(format!(
                    "record `{}` uses `name`; expected `label`",
                    self.id
                )));
            }
            (None, None) => {
                return Err(ChartError::InvalidRecord(format!(
                    "record `{}` is missing `label`",
                    self.id
                )));
            }
        };
        let value = self.value.as_f64().ok_or_else(|| {
            ChartError::InvalidRecord(format!("record `{}` value must be numeric", self.id))
        })?;
        let record = LeafRecord {
            id: self.id,
            label,
            value,
        };
        record.validate()?;
        Ok(record)
    }
}
