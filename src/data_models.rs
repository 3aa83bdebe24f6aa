use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 25;

/// Refinement value used by presence toggles (checkbox style attributes).
pub const PRESENCE_VALUE: &str = "true";

/// A top-level query parameter that the codec does not know about.
///
/// Mirrors what a query-string parser produces: a bare `key` is `Null`,
/// the literals `true`/`false` are booleans and repeated keys become a list.
/// Only values of that shape survive an encode/decode round trip: a one-item
/// `List` comes back as its item, `Text("true")` comes back as `Bool(true)`
/// and nested lists are flattened.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Text(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    pub fn from_decoded(value: Option<String>) -> ParamValue {
        match value {
            None => ParamValue::Null,
            Some(text) => match text.as_str() {
                "true" => ParamValue::Bool(true),
                "false" => ParamValue::Bool(false),
                _ => ParamValue::Text(text),
            },
        }
    }

    /// Appends another occurrence of the same key.
    pub fn push(self, next: ParamValue) -> ParamValue {
        match self {
            ParamValue::List(mut items) => {
                items.push(next);
                ParamValue::List(items)
            }
            first => ParamValue::List(vec![first, next]),
        }
    }
}

/// The selection for a single refinement attribute.
///
/// `Multiple` keeps insertion order and never holds duplicates. Equality is
/// set equality, so `Single("a")` equals `Multiple(["a"])` and ordering of
/// multiple values is ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RefinementValue {
    Single(String),
    Multiple(Vec<String>),
}

impl RefinementValue {
    pub fn single(value: impl Into<String>) -> Self {
        RefinementValue::Single(value.into())
    }

    pub fn multiple<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RefinementValue::Multiple(values.into_iter().map(Into::into).collect())
    }

    /// Builds a value from a list, dropping empty strings and duplicates.
    /// Nothing left means no selection and yields `None`; a single value
    /// collapses to `Single`.
    pub fn from_values(values: Vec<String>) -> Option<Self> {
        let mut seen = BTreeSet::new();
        let mut unique: Vec<String> = values
            .into_iter()
            .filter(|v| !v.is_empty() && seen.insert(v.clone()))
            .collect();

        match unique.len() {
            0 => None,
            1 => unique.pop().map(RefinementValue::Single),
            _ => Some(RefinementValue::Multiple(unique)),
        }
    }

    pub fn values(&self) -> &[String] {
        match self {
            RefinementValue::Single(value) => std::slice::from_ref(value),
            RefinementValue::Multiple(values) => values,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values().iter().any(|v| v == value)
    }

    /// True when the value selects nothing. Empty strings are not selections.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }

    /// The same selection with empty strings and duplicates removed.
    pub fn normalized(&self) -> Option<Self> {
        RefinementValue::from_values(self.values().to_vec())
    }
}

impl PartialEq for RefinementValue {
    fn eq(&self, other: &Self) -> bool {
        let lhs: BTreeSet<&String> = self.values().iter().collect();
        let rhs: BTreeSet<&String> = other.values().iter().collect();
        lhs == rhs
    }
}

impl Eq for RefinementValue {}

/// A request to flip one refinement value on or off.
///
/// A missing `value` toggles the attribute's presence instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefinementToggle {
    pub attribute_id: String,
    #[serde(default)]
    pub value: Option<String>,
}

impl RefinementToggle {
    pub fn new(attribute_id: impl Into<String>, value: impl Into<String>) -> Self {
        RefinementToggle {
            attribute_id: attribute_id.into(),
            value: Some(value.into()),
        }
    }

    pub fn presence(attribute_id: impl Into<String>) -> Self {
        RefinementToggle {
            attribute_id: attribute_id.into(),
            value: None,
        }
    }
}

pub type Refinements = BTreeMap<String, RefinementValue>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SearchState {
    pub offset: u32,
    pub limit: u32,
    pub sort: Option<String>,
    pub q: Option<String>,
    pub refine: Refinements,
    /// Top-level keys the codec doesn't interpret, carried through untouched.
    pub extra: BTreeMap<String, ParamValue>,
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState {
            offset: 0,
            limit: DEFAULT_LIMIT,
            sort: None,
            q: None,
            refine: Refinements::new(),
            extra: BTreeMap::new(),
        }
    }
}

impl SearchState {
    /// Returns a copy of this state with `toggle` applied to its refinements.
    pub fn with_toggled(&self, toggle: &RefinementToggle) -> SearchState {
        SearchState {
            refine: toggle_refinement(&self.refine, toggle),
            ..self.clone()
        }
    }

    pub fn is_selected(&self, attribute_id: &str, value: &str) -> bool {
        self.refine
            .get(attribute_id)
            .is_some_and(|current| current.contains(value))
    }
}

/// Symmetric-difference toggle of one value within an attribute's selection.
///
/// The input map is never modified. Removing a value from a multi-valued
/// selection that leaves one value behind collapses it to `Single`; an
/// attribute left with no values is removed from the map.
pub fn toggle_refinement(refine: &Refinements, toggle: &RefinementToggle) -> Refinements {
    let mut next = refine.clone();
    let attribute_id = toggle.attribute_id.as_str();

    let Some(value) = toggle.value.as_deref().filter(|v| !v.is_empty()) else {
        // presence toggle
        if next.remove(attribute_id).is_none() {
            next.insert(
                attribute_id.to_string(),
                RefinementValue::single(PRESENCE_VALUE),
            );
        }
        return next;
    };

    match next.remove(attribute_id) {
        None => {
            next.insert(attribute_id.to_string(), RefinementValue::single(value));
        }
        Some(RefinementValue::Multiple(mut values)) => {
            if values.iter().any(|v| v == value) {
                values.retain(|v| v != value);
            } else {
                values.push(value.to_string());
            }
            if let Some(updated) = RefinementValue::from_values(values) {
                next.insert(attribute_id.to_string(), updated);
            }
        }
        Some(RefinementValue::Single(current)) => {
            if current != value {
                // an empty current value selects nothing and is dropped here
                if let Some(updated) =
                    RefinementValue::from_values(vec![current, value.to_string()])
                {
                    next.insert(attribute_id.to_string(), updated);
                }
            }
        }
    }

    next
}
