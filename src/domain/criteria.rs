//! Filter criteria for listing and counting ads songs.
//!
//! Criteria arrive as `field.operator=value` query parameters, e.g.
//! `title.contains=jingle&duration.lessThan=30&id.in=1,2,3`. Parameters that do
//! not address a filterable field (paging, sorting) are ignored.

use std::collections::HashMap;
use std::str::FromStr;

use crate::domain::types::TypeConstraintError;

/// Conditions on an ordered column. All set conditions must hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeFilter<T> {
    pub equals: Option<T>,
    pub not_equals: Option<T>,
    pub in_list: Option<Vec<T>>,
    pub greater_than: Option<T>,
    pub less_than: Option<T>,
    pub greater_than_or_equal: Option<T>,
    pub less_than_or_equal: Option<T>,
    pub specified: Option<bool>,
}

/// Conditions on a text column. All set conditions must hold.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StringFilter {
    pub equals: Option<String>,
    pub not_equals: Option<String>,
    pub contains: Option<String>,
    pub does_not_contain: Option<String>,
    pub in_list: Option<Vec<String>>,
    pub specified: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdsSongCriteria {
    pub id: RangeFilter<i64>,
    pub title: StringFilter,
    pub artist: StringFilter,
    pub duration: RangeFilter<i32>,
    pub url: StringFilter,
}

fn invalid(key: &str, value: &str) -> TypeConstraintError {
    TypeConstraintError::InvalidValue(format!("{key}={value}"))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, TypeConstraintError> {
    value.trim().parse::<T>().map_err(|_| invalid(key, value))
}

fn parse_list<T: FromStr>(key: &str, value: &str) -> Result<Vec<T>, TypeConstraintError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_value(key, s))
        .collect()
}

impl<T: FromStr> RangeFilter<T> {
    fn apply(&mut self, key: &str, operator: &str, value: &str) -> Result<(), TypeConstraintError> {
        match operator {
            "equals" => self.equals = Some(parse_value(key, value)?),
            "notEquals" => self.not_equals = Some(parse_value(key, value)?),
            "in" => self.in_list = Some(parse_list(key, value)?),
            "greaterThan" => self.greater_than = Some(parse_value(key, value)?),
            "lessThan" => self.less_than = Some(parse_value(key, value)?),
            "greaterThanOrEqual" => self.greater_than_or_equal = Some(parse_value(key, value)?),
            "lessThanOrEqual" => self.less_than_or_equal = Some(parse_value(key, value)?),
            "specified" => self.specified = Some(parse_value(key, value)?),
            _ => return Err(invalid(key, value)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.in_list.is_none()
            && self.greater_than.is_none()
            && self.less_than.is_none()
            && self.greater_than_or_equal.is_none()
            && self.less_than_or_equal.is_none()
            && self.specified.is_none()
    }
}

impl StringFilter {
    fn apply(&mut self, key: &str, operator: &str, value: &str) -> Result<(), TypeConstraintError> {
        match operator {
            "equals" => self.equals = Some(value.to_string()),
            "notEquals" => self.not_equals = Some(value.to_string()),
            "contains" => self.contains = Some(value.to_string()),
            "doesNotContain" => self.does_not_contain = Some(value.to_string()),
            "in" => self.in_list = Some(parse_list(key, value)?),
            "specified" => self.specified = Some(parse_value(key, value)?),
            _ => return Err(invalid(key, value)),
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.equals.is_none()
            && self.not_equals.is_none()
            && self.contains.is_none()
            && self.does_not_contain.is_none()
            && self.in_list.is_none()
            && self.specified.is_none()
    }
}

impl AdsSongCriteria {
    /// Builds criteria from raw query parameters.
    ///
    /// Keys without a `.` or naming an unknown field are skipped; an unknown
    /// operator on a known field or an unparsable value is an error.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, TypeConstraintError> {
        let mut criteria = Self::default();

        for (key, value) in params {
            let Some((field, operator)) = key.split_once('.') else {
                continue;
            };
            match field {
                "id" => criteria.id.apply(key, operator, value)?,
                "title" => criteria.title.apply(key, operator, value)?,
                "artist" => criteria.artist.apply(key, operator, value)?,
                "duration" => criteria.duration.apply(key, operator, value)?,
                "url" => criteria.url.apply(key, operator, value)?,
                _ => {}
            }
        }

        Ok(criteria)
    }

    /// `true` when no condition is set and every record matches.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.title.is_empty()
            && self.artist.is_empty()
            && self.duration.is_empty()
            && self.url.is_empty()
    }
}
