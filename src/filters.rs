//! Filter normalization.
//!
//! Callers build filters with snake_case names; the API wants
//! hyphen/dot-separated names and a single comma-joined `filter` parameter.
//!
//! # Example
//!
//! ```
//! use crossref_client::Filters;
//!
//! let filters = Filters::new()
//!     .set("has_full_text", true)
//!     .set("award_funder", vec!["10.13039/100004440", "10.13039/100000861"]);
//! ```

use std::collections::HashMap;

/// A single filter value: a scalar or an ordered list of scalars.
///
/// A list expands to one `name:value` segment per element, which is how
/// repeated filters (e.g. several funder DOIs) are encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        FilterValue::Int(i64::from(v))
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Str(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Str(v)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        FilterValue::List(v)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(v: Vec<&str>) -> Self {
        FilterValue::List(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(v: [&str; N]) -> Self {
        FilterValue::List(v.iter().map(|s| s.to_string()).collect())
    }
}

/// An ordered set of filters, keyed by snake_case name.
///
/// Setting a name twice replaces the earlier value; to repeat a filter on
/// the wire, pass a list value instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    entries: Vec<(String, FilterValue)>,
}

impl Filters {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter by name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render the whole set as the API's `filter` parameter value.
    ///
    /// Returns `None` for an empty set, so that no `filter` parameter is
    /// sent at all. Unknown names pass through with underscores rewritten
    /// to hyphens; the server rejects truly invalid names with a 4xx.
    pub fn to_wire(&self, renames: &RenameTable) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }
        let mut segments = Vec::new();
        for (name, value) in &self.entries {
            let key = renames.wire_name(name);
            match value {
                FilterValue::Bool(b) => segments.push(format!("{}:{}", key, b)),
                FilterValue::Int(i) => segments.push(format!("{}:{}", key, i)),
                FilterValue::Str(s) => segments.push(format!("{}:{}", key, s)),
                FilterValue::List(items) => {
                    for item in items {
                        segments.push(format!("{}:{}", key, item));
                    }
                }
            }
        }
        Some(segments.join(","))
    }
}

/// Maps snake_case filter names to their dotted wire forms.
///
/// Most filter names only need underscores rewritten to hyphens, but a few
/// (license, full-text, award and relation sub-fields) use a dotted form.
/// The upstream set of dotted names evolves with the API, so the defaults
/// below can be extended at runtime with [`RenameTable::insert`] (see also
/// [`crate::CrossrefClient::with_filter_alias`]).
#[derive(Debug, Clone)]
pub struct RenameTable {
    map: HashMap<String, String>,
}

impl Default for RenameTable {
    fn default() -> Self {
        let mut map = HashMap::new();
        for (name, wire) in [
            ("license_url", "license.url"),
            ("license_version", "license.version"),
            ("license_delay", "license.delay"),
            ("full_text_version", "full-text.version"),
            ("full_text_type", "full-text.type"),
            ("full_text_application", "full-text.application"),
            ("award_number", "award.number"),
            ("award_funder", "award.funder"),
            ("relation_type", "relation.type"),
            ("relation_object", "relation.object"),
            ("relation_object_type", "relation.object-type"),
        ] {
            map.insert(name.to_string(), wire.to_string());
        }
        Self { map }
    }
}

impl RenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an additional snake_case name -> wire form mapping.
    pub fn insert(&mut self, name: impl Into<String>, wire: impl Into<String>) {
        self.map.insert(name.into(), wire.into());
    }

    /// The wire form of a filter name: table lookup first, otherwise
    /// underscores become hyphens.
    pub fn wire_name(&self, name: &str) -> String {
        match self.map.get(name) {
            Some(wire) => wire.clone(),
            None => name.replace('_', "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(filters: &Filters) -> Option<String> {
        filters.to_wire(&RenameTable::default())
    }

    #[test]
    fn test_empty_set_yields_no_parameter() {
        assert_eq!(wire(&Filters::new()), None);
    }

    #[test]
    fn test_bool_lowercased() {
        let f = Filters::new().set("has_full_text", true);
        assert_eq!(wire(&f), Some("has-full-text:true".to_string()));
        let f = Filters::new().set("has_funder", false);
        assert_eq!(wire(&f), Some("has-funder:false".to_string()));
    }

    #[test]
    fn test_dotted_rename() {
        let f = Filters::new().set("license_url", "https://creativecommons.org/licenses/by/4.0/");
        assert_eq!(
            wire(&f),
            Some("license.url:https://creativecommons.org/licenses/by/4.0/".to_string())
        );
    }

    #[test]
    fn test_list_expands_to_repeated_segments() {
        let f = Filters::new().set(
            "award_funder",
            vec!["10.13039/100004440", "10.13039/100000861"],
        );
        assert_eq!(
            wire(&f),
            Some("award.funder:10.13039/100004440,award.funder:10.13039/100000861".to_string())
        );
    }

    #[test]
    fn test_list_segment_count_matches_list_length() {
        let f = Filters::new().set("award_funder", ["A", "B", "C"]);
        let out = wire(&f).unwrap();
        assert_eq!(out.matches("award.funder:").count(), 3);
        assert_eq!(out.split(',').count(), 3);
    }

    #[test]
    fn test_scalar_and_list_combined_in_insertion_order() {
        let f = Filters::new()
            .set("has_funder", true)
            .set("award_number", vec!["CBET-0756451", "0600118"]);
        assert_eq!(
            wire(&f),
            Some("has-funder:true,award.number:CBET-0756451,award.number:0600118".to_string())
        );
    }

    #[test]
    fn test_unknown_name_passes_through_hyphenated() {
        let f = Filters::new().set("from_pub_date", "2020-01-01");
        assert_eq!(wire(&f), Some("from-pub-date:2020-01-01".to_string()));
    }

    #[test]
    fn test_int_value() {
        let f = Filters::new().set("license_delay", 60u32);
        assert_eq!(wire(&f), Some("license.delay:60".to_string()));
    }

    #[test]
    fn test_set_replaces_existing_name() {
        let f = Filters::new().set("type", "journal-article").set("type", "book");
        assert_eq!(wire(&f), Some("type:book".to_string()));
    }

    #[test]
    fn test_rename_table_extension() {
        let mut renames = RenameTable::default();
        renames.insert("archive_location", "archive.location");
        let f = Filters::new().set("archive_location", "CLOCKSS");
        assert_eq!(
            f.to_wire(&renames),
            Some("archive.location:CLOCKSS".to_string())
        );
    }
}
