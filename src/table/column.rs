use crate::table::Header;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

/// Data kinds inferred for preview columns.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColumnKind {
    /// Boolean values (true/false)
    Boolean,
    /// 64-bit signed integers
    BigInt,
    /// Double-precision floating point numbers
    Double,
    /// Date without time component
    Date,
    /// Time without date component
    Time,
    /// Date and time
    Timestamp,
    /// Variable-length strings
    Varchar,
}

/// A preview column: header name plus the kind inferred from sampled rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnKind {
    /// Returns the string representation of the column kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Double => "double",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Varchar => "varchar",
        }
    }

    /// Classifies a single field value. Empty values carry no evidence and
    /// return None.
    pub(crate) fn of_value(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
            Some(Self::Boolean)
        } else if value.parse::<i64>().is_ok() {
            Some(Self::BigInt)
        } else if value.parse::<f64>().is_ok() {
            Some(Self::Double)
        } else if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok() {
            Some(Self::Date)
        } else if NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok() {
            Some(Self::Time)
        } else if NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").is_ok()
            || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        {
            Some(Self::Timestamp)
        } else {
            Some(Self::Varchar)
        }
    }

    /// Detects the most specific common kind from per-value candidates.
    /// Falls back to VARCHAR when the evidence is mixed or absent.
    pub(crate) fn detect(kinds: Vec<Option<ColumnKind>>) -> ColumnKind {
        let kinds: Vec<ColumnKind> = kinds.into_iter().flatten().collect();
        if kinds.is_empty() {
            ColumnKind::Varchar
        } else if kinds.iter().all(|kind| kind.is_boolean()) {
            ColumnKind::Boolean
        } else if kinds.iter().all(|kind| kind.is_int()) {
            ColumnKind::BigInt
        } else if kinds.iter().all(|kind| kind.is_float()) {
            ColumnKind::Double
        } else if kinds.iter().all(|kind| kind.is_date()) {
            ColumnKind::Date
        } else if kinds.iter().all(|kind| kind.is_time()) {
            ColumnKind::Time
        } else if kinds.iter().all(|kind| kind.is_datetime()) {
            ColumnKind::Timestamp
        } else {
            ColumnKind::Varchar
        }
    }

    #[inline]
    fn is_boolean(&self) -> bool {
        matches!(self, ColumnKind::Boolean)
    }

    #[inline]
    fn is_int(&self) -> bool {
        matches!(self, ColumnKind::BigInt)
    }

    #[inline]
    fn is_float(&self) -> bool {
        matches!(self, ColumnKind::BigInt | ColumnKind::Double)
    }

    #[inline]
    fn is_date(&self) -> bool {
        matches!(self, ColumnKind::Date)
    }

    #[inline]
    fn is_time(&self) -> bool {
        matches!(self, ColumnKind::Time)
    }

    #[inline]
    fn is_datetime(&self) -> bool {
        matches!(self, ColumnKind::Timestamp | ColumnKind::Date | ColumnKind::Time)
    }
}

/// Infers one column per header entry from the sampled rows. Rows must
/// already be normalized to the header width.
pub(crate) fn infer_columns(header: &Header, rows: &[Vec<String>]) -> Vec<Column> {
    header
        .names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let kinds = rows.iter().map(|row| ColumnKind::of_value(&row[index])).collect();
            Column {
                name: name.to_owned(),
                kind: ColumnKind::detect(kinds),
            }
        })
        .collect()
}
