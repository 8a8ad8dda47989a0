//! Attribute Filter
//!
//! Narrows a list of typed inventories down to the records whose fields equal
//! a set of expected values. Record types opt in by implementing [`Filterable`],
//! which names their fields and hands out a typed [`FieldValue`] per name.
//!
//! Values are compared as strings after normalization:
//!
//! - strings compare as-is
//! - an unset optional string is absent and never matches, not even `""`
//! - integers compare in decimal form, so `"8"` matches `8` but `"08"` does not
//! - booleans compare as `"true"` / `"false"`
//!
//! Any other field type cannot be filtered on.

use std::borrow::Cow;
use std::collections::BTreeMap;
use thiserror::Error;

/// A field value as seen by the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    OptStr(Option<&'a str>),
    Int(i64),
    Bool(bool),
    /// A field whose type the filter cannot compare, with its type name
    Unsupported(&'static str),
}

impl FieldValue<'_> {
    /// Normalize to the string form used for comparison.
    ///
    /// `Ok(None)` means the value is absent.
    fn normalize(&self, key: &str) -> Result<Option<Cow<'_, str>>, FilterError> {
        match *self {
            FieldValue::Str(s) => Ok(Some(Cow::Borrowed(s))),
            FieldValue::OptStr(s) => Ok(s.map(Cow::Borrowed)),
            FieldValue::Int(n) => Ok(Some(Cow::Owned(n.to_string()))),
            FieldValue::Bool(b) => Ok(Some(Cow::Borrowed(if b { "true" } else { "false" }))),
            FieldValue::Unsupported(type_name) => Err(FilterError::UnsupportedFieldType {
                key: key.to_string(),
                type_name,
            }),
        }
    }
}

/// Errors that abort a filter call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("invalid filter key '{key}': no such field")]
    InvalidFilterKey { key: String },
    #[error("filter key '{key}' has unsupported field type {type_name}")]
    UnsupportedFieldType { key: String, type_name: &'static str },
}

/// Record types that can be filtered by field name
pub trait Filterable {
    /// Every field name [`Filterable::field_value`] resolves
    const FIELDS: &'static [&'static str];

    /// Value of the named field, or `None` if the type has no such field
    fn field_value(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Declares the filterable fields of an inventory struct.
///
/// Each entry maps an API field name to a struct field and its kind:
/// `str`, `opt` (optional string), `int`, `bool`, or `other`.
#[macro_export]
macro_rules! filterable {
    (@value $e:expr, str) => { $crate::resource::FieldValue::Str(&$e) };
    (@value $e:expr, opt) => { $crate::resource::FieldValue::OptStr($e.as_deref()) };
    (@value $e:expr, int) => { $crate::resource::FieldValue::Int(i64::from($e)) };
    (@value $e:expr, bool) => { $crate::resource::FieldValue::Bool($e) };
    (@value $e:expr, other) => {
        $crate::resource::FieldValue::Unsupported(std::any::type_name_of_val(&$e))
    };
    ($ty:ty { $($name:literal => $field:ident : $kind:ident),* $(,)? }) => {
        impl $crate::resource::Filterable for $ty {
            const FIELDS: &'static [&'static str] = &[$($name),*];

            fn field_value(&self, name: &str) -> Option<$crate::resource::FieldValue<'_>> {
                match name {
                    $($name => Some($crate::filterable!(@value self.$field, $kind)),)*
                    _ => None,
                }
            }
        }
    };
}

/// Return the records whose fields equal every expected value in `filters`.
///
/// Keys must name a field of `T` exactly. Source order is preserved and an
/// empty filter returns every record. A bad key or an unsupported field type
/// fails the whole call.
pub fn filter_resources<'r, T: Filterable>(
    records: &'r [T],
    filters: &BTreeMap<String, String>,
) -> Result<Vec<&'r T>, FilterError> {
    if let Some(key) = filters
        .keys()
        .find(|k| !T::FIELDS.iter().any(|field| *field == k.as_str()))
    {
        return Err(FilterError::InvalidFilterKey { key: key.clone() });
    }

    let mut matched = Vec::new();
    for record in records {
        if record_matches(record, filters)? {
            matched.push(record);
        }
    }

    tracing::debug!(
        "filter_resources: {} of {} records matched {} constraints",
        matched.len(),
        records.len(),
        filters.len()
    );

    Ok(matched)
}

fn record_matches<T: Filterable>(
    record: &T,
    filters: &BTreeMap<String, String>,
) -> Result<bool, FilterError> {
    // Every constraint is normalized even after a mismatch so that an
    // unsupported field type is reported regardless of the other values.
    let mut matches = true;
    for (key, expected) in filters {
        let value = record
            .field_value(key)
            .ok_or_else(|| FilterError::InvalidFilterKey { key: key.clone() })?;

        if value.normalize(key)?.as_deref() != Some(expected.as_str()) {
            matches = false;
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Offering {
        name: String,
        cpu_num: i32,
        description: Option<String>,
        system: bool,
        tags: Vec<String>,
    }

    crate::filterable!(Offering {
        "name" => name: str,
        "cpuNum" => cpu_num: int,
        "description" => description: opt,
        "system" => system: bool,
        "tags" => tags: other,
    });

    fn offering(name: &str, cpu_num: i32) -> Offering {
        Offering {
            name: name.to_string(),
            cpu_num,
            description: None,
            system: false,
            tags: vec![],
        }
    }

    fn filters(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let records = vec![offering("a", 2), offering("b", 4)];
        let result = filter_resources(&records, &BTreeMap::new()).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_integer_filter_preserves_order() {
        let records = vec![offering("a", 2), offering("b", 4), offering("c", 2)];
        let result = filter_resources(&records, &filters(&[("cpuNum", "2")])).unwrap();
        let names: Vec<&str> = result.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_integer_requires_exact_decimal_form() {
        let records = vec![offering("a", 8)];
        assert_eq!(filter_resources(&records, &filters(&[("cpuNum", "8")])).unwrap().len(), 1);
        assert!(filter_resources(&records, &filters(&[("cpuNum", "08")])).unwrap().is_empty());
        assert!(filter_resources(&records, &filters(&[("cpuNum", "8.0")])).unwrap().is_empty());
    }

    #[test]
    fn test_negative_integer() {
        let records = vec![offering("a", -1)];
        assert_eq!(filter_resources(&records, &filters(&[("cpuNum", "-1")])).unwrap().len(), 1);
    }

    #[test]
    fn test_boolean_is_case_sensitive() {
        let mut on = offering("on", 1);
        on.system = true;
        let records = vec![on, offering("off", 1)];

        let result = filter_resources(&records, &filters(&[("system", "true")])).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "on");

        assert!(filter_resources(&records, &filters(&[("system", "True")])).unwrap().is_empty());
        assert!(filter_resources(&records, &filters(&[("system", "1")])).unwrap().is_empty());
    }

    #[test]
    fn test_optional_string() {
        let mut described = offering("a", 1);
        described.description = Some("small".to_string());
        let records = vec![described, offering("b", 1)];

        let result = filter_resources(&records, &filters(&[("description", "small")])).unwrap();
        assert_eq!(result.len(), 1);

        // Unset is absence, not the empty string
        assert!(filter_resources(&records, &filters(&[("description", "")])).unwrap().is_empty());
    }

    #[test]
    fn test_conjunction_of_constraints() {
        let records = vec![offering("a", 2), offering("b", 2)];
        let result =
            filter_resources(&records, &filters(&[("cpuNum", "2"), ("name", "b")])).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "b");
    }

    #[test]
    fn test_string_match_is_case_sensitive() {
        let records = vec![offering("Small", 1)];
        assert!(filter_resources(&records, &filters(&[("name", "small")])).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_key_fails_whole_call() {
        let records = vec![offering("a", 2)];
        let err = filter_resources(&records, &filters(&[("cpu_num", "2")])).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidFilterKey {
                key: "cpu_num".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_key_fails_on_empty_input() {
        let records: Vec<Offering> = vec![];
        let err = filter_resources(&records, &filters(&[("Name", "a")])).unwrap_err();
        assert!(matches!(err, FilterError::InvalidFilterKey { .. }));
    }

    #[test]
    fn test_unsupported_field_type() {
        let records = vec![offering("a", 2)];
        let err = filter_resources(&records, &filters(&[("tags", "x")])).unwrap_err();
        match err {
            FilterError::UnsupportedFieldType { key, type_name } => {
                assert_eq!(key, "tags");
                assert!(type_name.contains("Vec"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_type_reported_after_mismatch() {
        let records = vec![offering("a", 2)];
        let err =
            filter_resources(&records, &filters(&[("name", "zzz"), ("tags", "x")])).unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedFieldType { .. }));
    }

    #[test]
    fn test_unsupported_type_on_empty_input_is_not_reached() {
        let records: Vec<Offering> = vec![];
        assert!(filter_resources(&records, &filters(&[("tags", "x")])).unwrap().is_empty());
    }
}
