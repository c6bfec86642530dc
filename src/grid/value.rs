//! Typed cell values produced by column accessors.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

/// Display format for date cells.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The value a column accessor extracts from a row.
///
/// Used both for display and as the sort key. `Empty` is what a missing or
/// unusable field degrades to; it renders as an empty string and always sorts
/// after every other value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl CellValue {
    /// Returns true for the degraded, empty value.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Rank used to order values of different kinds against each other.
    fn kind_rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Date(_) => 2,
            CellValue::Text(_) => 3,
            CellValue::Empty => 4,
        }
    }

    /// Natural ascending order of two values.
    ///
    /// Text compares lexicographically, numbers numerically (integers and floats
    /// against each other too), dates chronologically and `false < true`.
    /// Values of different kinds fall back to a fixed kind order, and `Empty`
    /// is greater than everything else.
    pub fn natural_cmp(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Float(a), CellValue::Float(b)) => a.total_cmp(b),
            (CellValue::Int(a), CellValue::Float(b)) => (*a as f64).total_cmp(b),
            (CellValue::Float(a), CellValue::Int(b)) => a.total_cmp(&(*b as f64)),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(true) => f.write_str("Yes"),
            CellValue::Bool(false) => f.write_str("No"),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value.into())
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_text_orders_lexicographically() {
        let a = CellValue::from("Alpha");
        let b = CellValue::from("beta");
        assert_eq!(a.natural_cmp(&b), Ordering::Less);
        assert_eq!(b.natural_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_numbers_order_numerically() {
        assert_eq!(CellValue::Int(9).natural_cmp(&CellValue::Int(10)), Ordering::Less);
        assert_eq!(CellValue::Float(2.5).natural_cmp(&CellValue::Int(2)), Ordering::Greater);
        assert_eq!(CellValue::Int(3).natural_cmp(&CellValue::Float(3.0)), Ordering::Equal);
    }

    #[test]
    fn test_dates_order_chronologically() {
        assert_eq!(date(2024, 1, 31).natural_cmp(&date(2024, 2, 1)), Ordering::Less);
    }

    #[test]
    fn test_empty_is_greatest() {
        assert_eq!(CellValue::Empty.natural_cmp(&CellValue::from("zzz")), Ordering::Greater);
        assert_eq!(CellValue::Int(i64::MAX).natural_cmp(&CellValue::Empty), Ordering::Less);
        assert_eq!(CellValue::Empty.natural_cmp(&CellValue::Empty), Ordering::Equal);
    }

    #[test]
    fn test_option_none_is_empty() {
        let missing: Option<u32> = None;
        assert!(CellValue::from(missing).is_empty());
        assert_eq!(CellValue::from(Some(4u32)), CellValue::Int(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Bool(true).to_string(), "Yes");
        assert_eq!(CellValue::Float(1.5).to_string(), "1.5");
        assert_eq!(date(2023, 7, 4).to_string(), "2023-07-04");
    }
}
