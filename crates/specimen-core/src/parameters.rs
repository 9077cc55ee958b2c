//! Randomization parameters.
//!
//! Parameters are a plain serde value, loadable from TOML. Every field has a
//! default, so a parameters file only needs the values it changes:
//!
//! ```toml
//! seed = 123
//! charset = "iso-8859-1"
//!
//! [collection_size]
//! min = 2
//! max = 5
//!
//! [date_range]
//! min = "2020-01-01"
//! max = "2020-12-31"
//! ```

use chrono::{Datelike, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Default collection size bounds.
pub const DEFAULT_COLLECTION_SIZE: Range<usize> = Range { min: 1, max: 100 };

/// Default string length bounds.
pub const DEFAULT_STRING_LENGTH: Range<usize> = Range { min: 1, max: 32 };

/// Default number of pooled instances per type.
pub const DEFAULT_OBJECT_POOL_SIZE: usize = 10;

/// Default maximum randomization depth.
pub const DEFAULT_RANDOMIZATION_DEPTH: usize = i32::MAX as usize;

/// Years before and after today covered by the default date range.
pub const DEFAULT_DATE_RANGE_YEARS: i32 = 10;

/// Errors from loading or validating parameters.
#[derive(Debug, Error)]
pub enum ParametersError {
    /// IO error reading the parameters file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A range whose minimum exceeds its maximum
    #[error("invalid {name} range: min {min} is greater than max {max}")]
    InvalidRange {
        name: &'static str,
        min: String,
        max: String,
    },
}

/// Inclusive range over an ordered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range<T> {
    /// Lower bound
    pub min: T,
    /// Upper bound
    pub max: T,
}

impl<T: PartialOrd + fmt::Display> Range<T> {
    /// Create a new range.
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Check that min does not exceed max.
    pub fn validate(&self, name: &'static str) -> Result<(), ParametersError> {
        if self.min > self.max {
            return Err(ParametersError::InvalidRange {
                name,
                min: self.min.to_string(),
                max: self.max.to_string(),
            });
        }
        Ok(())
    }
}

/// Character set used for generated chars and strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Charset {
    /// 7-bit ASCII
    #[default]
    #[serde(rename = "us-ascii", alias = "ascii")]
    UsAscii,
    /// Latin-1
    #[serde(rename = "iso-8859-1", alias = "latin1")]
    Iso8859_1,
    /// Unicode, limited to the Latin blocks
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
}

impl Charset {
    /// Highest code point the charset encodes for generation purposes.
    fn upper_bound(&self) -> u32 {
        match self {
            Self::UsAscii => 0x7F,
            Self::Iso8859_1 => 0xFF,
            Self::Utf8 => 0x024F,
        }
    }

    /// Alphabetic characters the charset can encode, in code point order.
    pub fn alphabet(&self) -> Vec<char> {
        (0..=self.upper_bound())
            .filter_map(char::from_u32)
            .filter(|c| c.is_alphabetic())
            .collect()
    }

    /// Get the charset name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UsAscii => "us-ascii",
            Self::Iso8859_1 => "iso-8859-1",
            Self::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "us-ascii" | "ascii" => Ok(Self::UsAscii),
            "iso-8859-1" | "latin1" => Ok(Self::Iso8859_1),
            "utf-8" | "utf8" => Ok(Self::Utf8),
            other => Err(format!(
                "unknown charset '{other}' (expected us-ascii, iso-8859-1 or utf-8)"
            )),
        }
    }
}

/// Parameters controlling randomization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizationParameters {
    /// Seed for the random generator; a fresh seed is drawn when unset
    pub seed: Option<u64>,

    /// Bounds for array, collection and map sizes
    pub collection_size: Range<usize>,

    /// Bounds for generated string lengths
    pub string_length: Range<usize>,

    /// Instances kept per type for reuse
    pub max_object_pool_size: usize,

    /// Nesting depth past which composites are no longer populated
    pub max_randomization_depth: usize,

    /// Character set for chars and strings
    pub charset: Charset,

    /// Resolve abstract types and interfaces to a concrete subtype
    pub scan_classpath_for_concrete_types: bool,

    /// Populate fields that have a default value
    pub override_default_initialization: bool,

    /// Bounds for generated dates
    pub date_range: Range<NaiveDate>,

    /// Bounds for generated times of day
    pub time_range: Range<NaiveTime>,
}

impl Default for RandomizationParameters {
    fn default() -> Self {
        Self {
            seed: None,
            collection_size: DEFAULT_COLLECTION_SIZE,
            string_length: DEFAULT_STRING_LENGTH,
            max_object_pool_size: DEFAULT_OBJECT_POOL_SIZE,
            max_randomization_depth: DEFAULT_RANDOMIZATION_DEPTH,
            charset: Charset::default(),
            scan_classpath_for_concrete_types: false,
            override_default_initialization: false,
            date_range: default_date_range(),
            time_range: default_time_range(),
        }
    }
}

/// Today, ten years back to ten years ahead.
fn default_date_range() -> Range<NaiveDate> {
    let today = Local::now().date_naive();
    Range {
        min: shift_years(today, -DEFAULT_DATE_RANGE_YEARS),
        max: shift_years(today, DEFAULT_DATE_RANGE_YEARS),
    }
}

/// The whole day, to the second.
fn default_time_range() -> Range<NaiveTime> {
    let midnight = NaiveTime::default();
    Range {
        min: midnight,
        max: NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(midnight),
    }
}

/// Move a date by whole years, clamping Feb 29 to Feb 28.
fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, date.month(), 28))
        .unwrap_or(date)
}

impl RandomizationParameters {
    /// Parse parameters from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ParametersError> {
        let params: Self = toml::from_str(content)?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParametersError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check every range.
    pub fn validate(&self) -> Result<(), ParametersError> {
        self.collection_size.validate("collection size")?;
        self.string_length.validate("string length")?;
        self.date_range.validate("date")?;
        self.time_range.validate("time")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let params = RandomizationParameters::default();
        assert_eq!(params.seed, None);
        assert_eq!(params.collection_size, Range::new(1, 100));
        assert_eq!(params.string_length, Range::new(1, 32));
        assert_eq!(params.max_object_pool_size, 10);
        assert_eq!(params.max_randomization_depth, i32::MAX as usize);
        assert_eq!(params.charset, Charset::UsAscii);
        assert!(!params.scan_classpath_for_concrete_types);
        assert!(!params.override_default_initialization);
        assert_eq!(params.date_range.max.year() - params.date_range.min.year(), 20);
        assert_eq!(
            params.time_range.max,
            NaiveTime::from_hms_opt(23, 59, 59).unwrap()
        );
        params.validate().unwrap();
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
seed = 123
charset = "utf-8"
scan_classpath_for_concrete_types = true

[string_length]
min = 3
max = 3

[date_range]
min = "2020-01-01"
max = "2020-12-31"
"#;
        let params = RandomizationParameters::from_toml_str(toml).unwrap();
        assert_eq!(params.seed, Some(123));
        assert_eq!(params.charset, Charset::Utf8);
        assert!(params.scan_classpath_for_concrete_types);
        assert_eq!(params.string_length, Range::new(3, 3));
        assert_eq!(
            params.date_range.min,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        // Untouched values keep their defaults
        assert_eq!(params.collection_size, DEFAULT_COLLECTION_SIZE);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let toml = r#"
[collection_size]
min = 5
max = 2
"#;
        let err = RandomizationParameters::from_toml_str(toml).unwrap_err();
        assert!(matches!(
            err,
            ParametersError::InvalidRange {
                name: "collection size",
                ..
            }
        ));
        assert!(err.to_string().contains("min 5 is greater than max 2"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_object_pool_size = 3").unwrap();

        let params = RandomizationParameters::from_file(file.path()).unwrap();
        assert_eq!(params.max_object_pool_size, 3);
    }

    #[test]
    fn test_charset_alphabet() {
        let ascii = Charset::UsAscii.alphabet();
        assert_eq!(ascii.len(), 52);
        assert!(ascii.iter().all(|c| c.is_ascii_alphabetic()));

        let latin1 = Charset::Iso8859_1.alphabet();
        assert!(latin1.contains(&'é'));
        assert!(latin1.iter().all(|c| (*c as u32) <= 0xFF));

        let utf8 = Charset::Utf8.alphabet();
        assert!(utf8.contains(&'ł'));
        assert!(utf8.len() > latin1.len());
    }

    #[test]
    fn test_charset_from_str() {
        assert_eq!("UTF-8".parse::<Charset>().unwrap(), Charset::Utf8);
        assert_eq!("latin1".parse::<Charset>().unwrap(), Charset::Iso8859_1);
        assert!("ebcdic".parse::<Charset>().is_err());
    }

    #[test]
    fn test_shift_years_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(
            shift_years(leap, 1),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }
}
