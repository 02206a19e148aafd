//! Column type inference over materialized rows.
//!
//! Each column keeps a capped bitset of the raw classifications observed in
//! its sniffing window, plus width/null counters fed by every row. The
//! unified type falls out of a small merge rule; a configurable null-
//! tolerance gate decides how columns with many empty values are treated.

use std::{fs, path::Path};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::data::{FieldKind, Value, classify_field};

pub const DEFAULT_NULL_THRESHOLD_PCT: f64 = 40.0;
pub const DEFAULT_SNIFF_ROW_LIMIT: usize = 1_000_000;

/// Unified type classification for a whole column.
///
/// `Number` is the generalization of a column mixing integers and floats;
/// individual fields never classify as `Number`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Number,
    Date,
    DateTime,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::DateTime => "datetime",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["string", "integer", "float", "number", "date", "datetime"]
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ColumnType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "string" => Ok(ColumnType::String),
            "integer" | "int" => Ok(ColumnType::Integer),
            "float" | "double" => Ok(ColumnType::Float),
            "number" | "numeric" => Ok(ColumnType::Number),
            "date" => Ok(ColumnType::Date),
            "datetime" | "timestamp" => Ok(ColumnType::DateTime),
            _ => Err(anyhow::anyhow!(
                "Unknown column type '{value}'. Supported types: {}",
                ColumnType::variants().join(", ")
            )),
        }
    }
}

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        token
            .parse()
            .map_err(|err: anyhow::Error| de::Error::custom(err.to_string()))
    }
}

/// How the null-tolerance gate interacts with the merge rule when a column's
/// empty-value percentage exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullGate {
    /// Exceeding the threshold demotes the column to `string` outright.
    #[default]
    ForceString,
    /// Exceeding the threshold leaves the merge-rule result in place.
    MergeOnly,
}

/// Inference configuration, validated eagerly before any row is touched.
#[derive(Debug, Clone, Copy)]
pub struct InferenceOptions {
    /// Tolerated percentage of empty values per column, in `[0, 100]`.
    pub null_threshold_pct: f64,
    /// Leading row count used for type sniffing; must be positive.
    pub sniff_row_limit: usize,
    pub null_gate: NullGate,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            null_threshold_pct: DEFAULT_NULL_THRESHOLD_PCT,
            sniff_row_limit: DEFAULT_SNIFF_ROW_LIMIT,
            null_gate: NullGate::default(),
        }
    }
}

impl InferenceOptions {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.null_threshold_pct.is_finite()
                && (0.0..=100.0).contains(&self.null_threshold_pct),
            "null-threshold must be between 0 and 100 (got {})",
            self.null_threshold_pct
        );
        ensure!(
            self.sniff_row_limit > 0,
            "sniff-rows must be positive (got 0)"
        );
        Ok(())
    }
}

/// Per-column inference result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub datatype: ColumnType,
    /// Maximum raw character length of the original field text across all
    /// rows, sampled or not.
    pub max_width: usize,
    pub null_count: usize,
}

const BIT_INTEGER: u8 = 1;
const BIT_FLOAT: u8 = 1 << 1;
const BIT_DATE: u8 = 1 << 2;
const BIT_DATETIME: u8 = 1 << 3;
const BIT_STRING: u8 = 1 << 4;

/// Capped set of non-null classifications seen in a column's window.
#[derive(Debug, Clone, Copy, Default)]
struct TypeTally(u8);

impl TypeTally {
    fn record(&mut self, kind: FieldKind) {
        self.0 |= match kind {
            FieldKind::Null => 0,
            FieldKind::Integer => BIT_INTEGER,
            FieldKind::Float => BIT_FLOAT,
            FieldKind::Date => BIT_DATE,
            FieldKind::DateTime => BIT_DATETIME,
            FieldKind::String => BIT_STRING,
        };
    }

    fn unify(self) -> ColumnType {
        match self.0 {
            0 => ColumnType::String,
            BIT_INTEGER => ColumnType::Integer,
            BIT_FLOAT => ColumnType::Float,
            BIT_DATE => ColumnType::Date,
            BIT_DATETIME => ColumnType::DateTime,
            BIT_STRING => ColumnType::String,
            b if b == BIT_INTEGER | BIT_FLOAT => ColumnType::Number,
            b if b == BIT_DATE | BIT_DATETIME => ColumnType::DateTime,
            _ => ColumnType::String,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ColumnObserver {
    tally: TypeTally,
    string_seen: bool,
    max_width: usize,
    null_count: usize,
}

impl ColumnObserver {
    fn finish(self, total_rows: usize, options: &InferenceOptions) -> ColumnProfile {
        let unified = self.tally.unify();
        let pct_null = if total_rows == 0 {
            0.0
        } else {
            self.null_count as f64 * 100.0 / total_rows as f64
        };
        let datatype = if unified != ColumnType::String
            && pct_null > options.null_threshold_pct
            && options.null_gate == NullGate::ForceString
        {
            ColumnType::String
        } else {
            unified
        };
        ColumnProfile {
            datatype,
            max_width: self.max_width,
            null_count: self.null_count,
        }
    }
}

/// Infers a unified type per column and decodes every field.
///
/// When `has_header` is true the first row is never inferred or decoded: it
/// passes through as literal text. Rows past `sniff_row_limit` are decoded
/// as literal strings and excluded from the type decision, but still feed
/// `max_width` and `null_count`. Within the window, `string` is absorbing:
/// once observed in a column, every later windowed field of that column is
/// forced to string.
pub fn infer_column_types(
    has_header: bool,
    rows: &[Vec<String>],
    options: &InferenceOptions,
) -> Result<(Vec<ColumnProfile>, Vec<Vec<Value>>)> {
    options.validate()?;

    let (header, data) = match (has_header, rows) {
        (true, [first, rest @ ..]) => (Some(first), rest),
        _ => (None, rows),
    };

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut observers = vec![ColumnObserver::default(); width];
    let mut decoded = Vec::with_capacity(rows.len());

    if let Some(names) = header {
        decoded.push(
            names
                .iter()
                .map(|name| Value::String(name.clone()))
                .collect(),
        );
    }

    for (row_index, row) in data.iter().enumerate() {
        let in_window = row_index < options.sniff_row_limit;
        let mut decoded_row = Vec::with_capacity(row.len());
        for (column, text) in row.iter().enumerate() {
            let observer = &mut observers[column];
            observer.max_width = observer.max_width.max(text.chars().count());
            let force = !in_window || observer.string_seen;
            let (kind, value) = classify_field(text, force);
            if kind == FieldKind::Null {
                observer.null_count += 1;
            } else if in_window {
                observer.tally.record(kind);
                if kind == FieldKind::String {
                    observer.string_seen = true;
                }
            }
            decoded_row.push(value);
        }
        decoded.push(decoded_row);
    }

    let total_rows = data.len();
    let profiles = observers
        .into_iter()
        .map(|observer| observer.finish(total_rows, options))
        .collect();
    Ok((profiles, decoded))
}

/// Synthetic names for headerless inputs.
pub fn generate_field_names(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("field_{idx}")).collect()
}

/// Named column profiles as written to and read from a `.meta` YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub columns: Vec<ColumnReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnReport {
    pub name: String,
    pub datatype: ColumnType,
    pub max_width: usize,
    pub null_count: usize,
}

impl ProfileReport {
    pub fn from_parts(names: &[String], profiles: &[ColumnProfile]) -> Self {
        let columns = profiles
            .iter()
            .enumerate()
            .map(|(idx, profile)| ColumnReport {
                name: names
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("field_{idx}")),
                datatype: profile.datatype,
                max_width: profile.max_width,
                null_count: profile.null_count,
            })
            .collect();
        Self { columns }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let rendered = serde_yaml::to_string(self)
            .with_context(|| format!("Serializing profile report for {path:?}"))?;
        fs::write(path, rendered).with_context(|| format!("Writing profile report to {path:?}"))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw =
            fs::read_to_string(path).with_context(|| format!("Reading profile report {path:?}"))?;
        serde_yaml::from_str(&raw).with_context(|| format!("Parsing profile report {path:?}"))
    }
}
