use crate::data_models::{
    ParamValue, RefinementToggle, RefinementValue, Refinements, SearchState,
};
use crate::query_string::{
    QueryBuilder, decode_component, escape_fragment_value, parse_pairs, split_pairs,
};

pub const REFINE_KEY: &str = "refine";
const OFFSET_KEY: &str = "offset";
const LIMIT_KEY: &str = "limit";
const SORT_KEY: &str = "sort";
const QUERY_KEY: &str = "q";
const KNOWN_KEYS: [&str; 5] = [OFFSET_KEY, LIMIT_KEY, SORT_KEY, QUERY_KEY, REFINE_KEY];

/// Separates the values of a multi-valued attribute inside a fragment.
const VALUE_SEPARATOR: char = '|';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Prefix the result with the current pathname.
    pub include_path: bool,
    /// Applied to a copy of the state before encoding.
    pub toggle_refinement: Option<RefinementToggle>,
}

impl EncodeOptions {
    pub fn with_path() -> Self {
        EncodeOptions {
            include_path: true,
            toggle_refinement: None,
        }
    }

    pub fn toggling(mut self, toggle: RefinementToggle) -> Self {
        self.toggle_refinement = Some(toggle);
        self
    }
}

/// Decodes a query string into a `SearchState`, starting from the defaults.
///
/// Never fails: malformed pairs and refinement fragments are dropped.
pub fn decode(query: &str) -> SearchState {
    decode_onto(SearchState::default(), query)
}

/// Decodes `query` over `base`; fields absent from the query keep the value
/// they have in `base`.
pub fn decode_onto(base: SearchState, query: &str) -> SearchState {
    let mut state = base;
    let mut fragments: Option<Vec<String>> = None;

    for (key, value) in parse_pairs(query) {
        match key.as_str() {
            OFFSET_KEY => {
                if let Some(offset) = parse_number(&key, value.as_deref()) {
                    state.offset = offset;
                }
            }
            LIMIT_KEY => {
                if let Some(limit) = parse_number(&key, value.as_deref()).filter(|l| *l > 0) {
                    state.limit = limit;
                }
            }
            SORT_KEY => state.sort = value,
            QUERY_KEY => state.q = value,
            REFINE_KEY => {
                let fragments = fragments.get_or_insert_with(Vec::new);
                if let Some(fragment) = value {
                    fragments.push(fragment);
                }
            }
            _ => {
                let value = ParamValue::from_decoded(value);
                let merged = match state.extra.remove(&key) {
                    Some(existing) => existing.push(value),
                    None => value,
                };
                state.extra.insert(key, merged);
            }
        }
    }

    if let Some(fragments) = fragments {
        state.refine = decode_refinements(fragments.iter().map(String::as_str));
    }

    state
}

/// Merges every refinement fragment into a single map. Later fragments win
/// when they name the same attribute.
pub fn decode_refinements<'a, I>(fragments: I) -> Refinements
where
    I: IntoIterator<Item = &'a str>,
{
    let mut refine = Refinements::new();
    for fragment in fragments {
        match parse_fragment(fragment) {
            Some(entries) => refine.extend(entries),
            None => log::debug!("skipping malformed refinement fragment: {fragment:?}"),
        }
    }
    refine
}

/// Parses one `attribute=value` or `attribute=v1|v2` fragment.
///
/// Returns `None` when any part of the fragment is badly percent-encoded.
/// Attributes without a value, or whose values are all empty, are left out.
pub fn parse_fragment(fragment: &str) -> Option<Vec<(String, RefinementValue)>> {
    let mut entries = Vec::new();
    for (raw_key, raw_value) in split_pairs(fragment) {
        let attribute_id = decode_component(raw_key)?;
        let Some(raw_value) = raw_value else {
            continue;
        };

        let mut values = Vec::new();
        for piece in raw_value.split(VALUE_SEPARATOR) {
            let value = decode_component(piece)?;
            if !value.is_empty() {
                values.push(value);
            }
        }

        if attribute_id.is_empty() {
            continue;
        }
        if let Some(value) = RefinementValue::from_values(values) {
            entries.push((attribute_id, value));
        }
    }
    Some(entries)
}

/// Renders one attribute's selection as an unencoded fragment.
pub fn encode_fragment(attribute_id: &str, value: &RefinementValue) -> String {
    let values = value
        .values()
        .iter()
        .map(|v| escape_fragment_value(v))
        .collect::<Vec<_>>()
        .join(&VALUE_SEPARATOR.to_string());
    format!("{}={}", escape_fragment_value(attribute_id), values)
}

/// Encodes `state` as a query string, always starting with `?`.
///
/// `pathname` is only used when `options.include_path` is set.
pub fn encode(state: &SearchState, options: &EncodeOptions, pathname: &str) -> String {
    let refine = match &options.toggle_refinement {
        Some(toggle) => crate::data_models::toggle_refinement(&state.refine, toggle),
        None => state.refine.clone(),
    };

    let mut builder = QueryBuilder::new();
    builder
        .push(OFFSET_KEY, Some(state.offset.to_string()))
        .push(LIMIT_KEY, Some(state.limit.to_string()));
    if let Some(sort) = &state.sort {
        builder.push(SORT_KEY, Some(sort.clone()));
    }
    if let Some(q) = &state.q {
        builder.push(QUERY_KEY, Some(q.clone()));
    }
    for (attribute_id, value) in &refine {
        // empty strings select nothing and are left out of the fragment
        if let Some(value) = value.normalized() {
            builder.push(REFINE_KEY, Some(encode_fragment(attribute_id, &value)));
        }
    }
    for (key, value) in &state.extra {
        if KNOWN_KEYS.contains(&key.as_str()) {
            log::debug!("ignoring extra parameter shadowing a known key: {key}");
            continue;
        }
        builder.push_param(key, value);
    }

    let prefix = if options.include_path { pathname } else { "" };
    format!("{}?{}", prefix, builder.finish())
}

fn parse_number(key: &str, value: Option<&str>) -> Option<u32> {
    let value = value?;
    match value.trim().parse::<u32>() {
        Ok(n) => Some(n),
        Err(e) => {
            log::debug!("ignoring invalid {key}={value:?}: {e}");
            None
        }
    }
}

#[test]
fn test_parse_fragment_multi_value() {
    let entries = parse_fragment("c_size=M|L").unwrap();
    assert_eq!(
        entries,
        vec![("c_size".to_string(), RefinementValue::multiple(["M", "L"]))]
    );
}

#[test]
fn test_parse_fragment_malformed() {
    assert_eq!(parse_fragment("c_size=100%"), None);
    assert_eq!(parse_fragment("c_%zzsize=M"), None);
}

#[test]
fn test_parse_fragment_drops_empty_and_duplicate_values() {
    let entries = parse_fragment("c_size=M||M&c_color=&c_flag").unwrap();
    assert_eq!(entries.len(), 1);
    assert!(matches!(&entries[0].1, RefinementValue::Single(v) if v == "M"));
}

#[test]
fn test_encode_fragment() {
    assert_eq!(
        encode_fragment("c_size", &RefinementValue::multiple(["M", "L"])),
        "c_size=M|L"
    );
    assert_eq!(
        encode_fragment("price", &RefinementValue::single("(0..20)")),
        "price=(0..20)"
    );
    assert_eq!(
        encode_fragment("c_promo", &RefinementValue::single("50%|off")),
        "c_promo=50%25%7Coff"
    );
}
