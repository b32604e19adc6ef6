// SPDX-License-Identifier: MPL-2.0
//! Library filtering types for the domain layer.
//!
//! Each filter widget in the library toolbar maps to one variant of
//! [`FilterConfig`], carrying its own typed payload, and targets one
//! [`FilterField`] of a [`MediaItem`].
//!
//! # Available Filter Kinds
//!
//! - `Checkbox`: boolean toggle (favorites only)
//! - `Select`: single choice from a fixed option list
//! - `Text`: case-insensitive substring search
//! - `SearchableSelect`: multi-choice with an option search box
//! - `Range`: inclusive numeric range
//! - `DateRange`: inclusive calendar date range
//!
//! A [`FilterSet`] combines filters with AND logic.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::library::MediaItem;

// =============================================================================
// FilterError
// =============================================================================

/// Invalid filter payloads, reported by [`FilterSet::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The filter kind cannot be applied to the field.
    UnsupportedField {
        field: FilterField,
        kind: &'static str,
    },
    /// A selected value is not one of the offered options.
    UnknownOption(String),
    /// `low > high` or the range leaves its bounds.
    InvalidRange { low: i64, high: i64 },
    /// `start` is after `end`.
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::UnsupportedField { field, kind } => {
                write!(f, "{kind} filter cannot target {field:?}")
            }
            FilterError::UnknownOption(option) => write!(f, "Unknown option: {option}"),
            FilterError::InvalidRange { low, high } => {
                write!(f, "Invalid range: {low}..={high}")
            }
            FilterError::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: {start} to {end}")
            }
        }
    }
}

impl std::error::Error for FilterError {}

// =============================================================================
// FilterField
// =============================================================================

/// Field of a [`MediaItem`] a filter looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Favorite,
    Kind,
    Title,
    Tags,
    Rating,
    CapturedOn,
}

/// Borrowed value of a field, as seen by a filter.
#[derive(Debug, Clone, Copy)]
enum FieldValue<'a> {
    Flag(bool),
    Text(&'a str),
    List(&'a [String]),
    Number(i64),
    Date(Option<NaiveDate>),
}

impl FilterField {
    fn value_of(self, item: &MediaItem) -> FieldValue<'_> {
        match self {
            FilterField::Favorite => FieldValue::Flag(item.favorite),
            FilterField::Kind => FieldValue::Text(item.kind.as_str()),
            FilterField::Title => FieldValue::Text(&item.title),
            FilterField::Tags => FieldValue::List(&item.tags),
            // Unrated items sort as zero stars.
            FilterField::Rating => {
                FieldValue::Number(item.rating.map_or(0, |r| i64::from(r.value())))
            }
            FilterField::CapturedOn => FieldValue::Date(item.captured_on),
        }
    }
}

// =============================================================================
// FilterConfig
// =============================================================================

/// Typed payload of one filter widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterConfig {
    Checkbox {
        checked: bool,
    },
    Select {
        options: Vec<String>,
        #[serde(default)]
        selected: Option<String>,
    },
    Text {
        query: String,
    },
    SearchableSelect {
        options: Vec<String>,
        #[serde(default)]
        search: String,
        #[serde(default)]
        selected: Vec<String>,
    },
    Range {
        min: i64,
        max: i64,
        low: i64,
        high: i64,
    },
    DateRange {
        #[serde(default)]
        start: Option<NaiveDate>,
        #[serde(default)]
        end: Option<NaiveDate>,
    },
}

impl FilterConfig {
    /// Name of the variant, as written in serialized form.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterConfig::Checkbox { .. } => "checkbox",
            FilterConfig::Select { .. } => "select",
            FilterConfig::Text { .. } => "text",
            FilterConfig::SearchableSelect { .. } => "searchable_select",
            FilterConfig::Range { .. } => "range",
            FilterConfig::DateRange { .. } => "date_range",
        }
    }

    /// Full-width range over `[min, max]`, initially inactive.
    #[must_use]
    pub fn range(min: i64, max: i64) -> Self {
        FilterConfig::Range {
            min,
            max,
            low: min,
            high: max,
        }
    }

    /// Returns `true` if this filter currently excludes anything.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            FilterConfig::Checkbox { checked } => *checked,
            FilterConfig::Select { selected, .. } => selected.is_some(),
            FilterConfig::Text { query } => !query.trim().is_empty(),
            FilterConfig::SearchableSelect { selected, .. } => !selected.is_empty(),
            FilterConfig::Range {
                min,
                max,
                low,
                high,
            } => low > min || high < max,
            FilterConfig::DateRange { start, end } => start.is_some() || end.is_some(),
        }
    }

    /// Resets the payload to its inactive state, keeping option lists.
    pub fn clear(&mut self) {
        match self {
            FilterConfig::Checkbox { checked } => *checked = false,
            FilterConfig::Select { selected, .. } => *selected = None,
            FilterConfig::Text { query } => query.clear(),
            FilterConfig::SearchableSelect {
                search, selected, ..
            } => {
                search.clear();
                selected.clear();
            }
            FilterConfig::Range {
                min,
                max,
                low,
                high,
            } => {
                *low = *min;
                *high = *max;
            }
            FilterConfig::DateRange { start, end } => {
                *start = None;
                *end = None;
            }
        }
    }

    /// Options of a searchable select that match its search box.
    /// Other kinds return their full option list (or nothing).
    #[must_use]
    pub fn visible_options(&self) -> Vec<&str> {
        match self {
            FilterConfig::SearchableSelect {
                options, search, ..
            } => {
                let needle = search.trim().to_lowercase();
                options
                    .iter()
                    .filter(|option| needle.is_empty() || option.to_lowercase().contains(&needle))
                    .map(String::as_str)
                    .collect()
            }
            FilterConfig::Select { options, .. } => options.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    fn validate(&self) -> Result<(), FilterError> {
        match self {
            FilterConfig::Select {
                options,
                selected: Some(choice),
            } if !options.contains(choice) => Err(FilterError::UnknownOption(choice.clone())),
            FilterConfig::SearchableSelect {
                options, selected, ..
            } => match selected.iter().find(|choice| !options.contains(choice)) {
                Some(choice) => Err(FilterError::UnknownOption(choice.clone())),
                None => Ok(()),
            },
            FilterConfig::Range {
                min,
                max,
                low,
                high,
            } if low > high || low < min || high > max => Err(FilterError::InvalidRange {
                low: *low,
                high: *high,
            }),
            FilterConfig::DateRange {
                start: Some(start),
                end: Some(end),
            } if start > end => Err(FilterError::InvalidDateRange {
                start: *start,
                end: *end,
            }),
            _ => Ok(()),
        }
    }

    fn supports(&self, field: FilterField) -> bool {
        use FilterField::{CapturedOn, Favorite, Kind, Rating, Tags, Title};

        match self {
            FilterConfig::Checkbox { .. } => matches!(field, Favorite),
            FilterConfig::Select { .. } => matches!(field, Kind | Tags),
            FilterConfig::Text { .. } => matches!(field, Title | Tags),
            FilterConfig::SearchableSelect { .. } => matches!(field, Kind | Tags),
            FilterConfig::Range { .. } => matches!(field, Rating),
            FilterConfig::DateRange { .. } => matches!(field, CapturedOn),
        }
    }

    fn matches_value(&self, value: FieldValue<'_>) -> bool {
        if !self.is_active() {
            return true;
        }

        match (self, value) {
            (FilterConfig::Checkbox { .. }, FieldValue::Flag(flag)) => flag,
            (
                FilterConfig::Select {
                    selected: Some(choice),
                    ..
                },
                FieldValue::Text(text),
            ) => text == choice,
            (
                FilterConfig::Select {
                    selected: Some(choice),
                    ..
                },
                FieldValue::List(list),
            ) => list.contains(choice),
            (FilterConfig::Text { query }, FieldValue::Text(text)) => {
                contains_ignore_case(text, query)
            }
            (FilterConfig::Text { query }, FieldValue::List(list)) => {
                list.iter().any(|entry| contains_ignore_case(entry, query))
            }
            (FilterConfig::SearchableSelect { selected, .. }, FieldValue::Text(text)) => {
                selected.iter().any(|choice| choice == text)
            }
            (FilterConfig::SearchableSelect { selected, .. }, FieldValue::List(list)) => {
                selected.iter().any(|choice| list.contains(choice))
            }
            (FilterConfig::Range { low, high, .. }, FieldValue::Number(n)) => {
                (*low..=*high).contains(&n)
            }
            (FilterConfig::DateRange { start, end }, FieldValue::Date(date)) => {
                date.is_some_and(|d| start.is_none_or(|s| d >= s) && end.is_none_or(|e| d <= e))
            }
            // Unsupported combinations are rejected by validation and
            // never narrow the result set.
            _ => true,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(&needle.trim().to_lowercase())
}

// =============================================================================
// Filter / FilterSet
// =============================================================================

/// One filter widget bound to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: FilterField,
    #[serde(flatten)]
    pub config: FilterConfig,
}

impl Filter {
    #[must_use]
    pub fn new(field: FilterField, config: FilterConfig) -> Self {
        Self { field, config }
    }

    /// Returns `true` if `item` passes this filter.
    #[must_use]
    pub fn matches(&self, item: &MediaItem) -> bool {
        self.config.matches_value(self.field.value_of(item))
    }
}

/// Combined library filter with AND logic.
///
/// When no filters are active, every item matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Creates a filter set with no criteria (matches all items).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: FilterField, config: FilterConfig) -> Self {
        self.filters.push(Filter::new(field, config));
        self
    }

    pub fn push(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Mutable access to the filter bound to `field`, if any.
    pub fn get_mut(&mut self, field: FilterField) -> Option<&mut FilterConfig> {
        self.filters
            .iter_mut()
            .find(|filter| filter.field == field)
            .map(|filter| &mut filter.config)
    }

    /// Returns `true` if any filter is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.filters.iter().any(|filter| filter.config.is_active())
    }

    /// Returns the number of active filters (shown as a badge on the toolbar).
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.filters
            .iter()
            .filter(|filter| filter.config.is_active())
            .count()
    }

    /// Resets all filters to their inactive state.
    pub fn clear(&mut self) {
        for filter in &mut self.filters {
            filter.config.clear();
        }
    }

    /// Checks every payload and field binding.
    ///
    /// # Errors
    ///
    /// Returns the first [`FilterError`] found.
    pub fn validate(&self) -> Result<(), FilterError> {
        for filter in &self.filters {
            if !filter.config.supports(filter.field) {
                return Err(FilterError::UnsupportedField {
                    field: filter.field,
                    kind: filter.config.kind_name(),
                });
            }
            filter.config.validate()?;
        }
        Ok(())
    }

    /// Returns `true` if `item` passes every filter.
    #[must_use]
    pub fn matches(&self, item: &MediaItem) -> bool {
        self.filters.iter().all(|filter| filter.matches(item))
    }
}

// =============================================================================
// Tests
// =============================================================================
