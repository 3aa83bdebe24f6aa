use crate::data_models::ParamValue;

/// Characters that carry meaning inside a refinement fragment and so still
/// need escaping when the rest of the inner pass is left unencoded.
const FRAGMENT_RESERVED: [char; 7] = ['%', '&', '=', '|', '+', '#', '?'];

/// Splits a raw query string into `(key, value)` pairs without decoding.
///
/// Empty segments are skipped and a segment without `=` yields `None` as its
/// value. A `?` is an ordinary character here; see `parse_pairs`.
pub fn split_pairs(input: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    input
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (segment, None),
        })
}

/// Percent-decodes one query component, treating `+` as a space.
///
/// Returns `None` for malformed input: a `%` that isn't followed by two hex
/// digits, or escapes that don't decode to UTF-8.
pub fn decode_component(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let well_formed = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !well_formed {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

/// Strict component encoding: everything but `A-Z a-z 0-9 - _ . ~` is escaped.
pub fn encode_component(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Escapes only the fragment delimiters, leaving every other character as is.
pub fn escape_fragment_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if FRAGMENT_RESERVED.contains(&c) {
            out.push_str(&format!("%{:02X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses and decodes every pair of a top-level query, skipping pairs that are
/// malformed. A leading `?` is ignored.
pub fn parse_pairs(input: &str) -> Vec<(String, Option<String>)> {
    split_pairs(input.strip_prefix('?').unwrap_or(input))
        .filter_map(|(raw_key, raw_value)| {
            let key = decode_component(raw_key)?;
            let value = match raw_value {
                Some(raw) => Some(decode_component(raw)?),
                None => None,
            };
            if key.is_empty() {
                return None;
            }
            Some((key, value))
        })
        .collect()
}

/// Accumulates `key=value` pairs and renders them in key order.
///
/// Keys are sorted with a stable sort, so repeated keys keep the order they
/// were pushed in.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) -> &mut Self {
        self.pairs.push((key.into(), value));
        self
    }

    pub fn push_param(&mut self, key: &str, value: &ParamValue) -> &mut Self {
        match value {
            ParamValue::Null => self.push(key, None),
            ParamValue::Bool(b) => self.push(key, Some(b.to_string())),
            ParamValue::Text(text) => self.push(key, Some(text.clone())),
            ParamValue::List(items) => {
                for item in items {
                    self.push_param(key, item);
                }
                self
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn finish(mut self) -> String {
        self.pairs.sort_by(|a, b| a.0.cmp(&b.0));
        self.pairs
            .iter()
            .map(|(key, value)| match value {
                Some(value) => format!("{}={}", encode_component(key), encode_component(value)),
                None => encode_component(key),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[test]
fn test_split_pairs() {
    let pairs: Vec<_> = split_pairs("a=1&&b&c=x=y").collect();
    assert_eq!(
        pairs,
        vec![("a", Some("1")), ("b", None), ("c", Some("x=y"))]
    );

    let pairs: Vec<_> = split_pairs("?x=1").collect();
    assert_eq!(pairs, vec![("?x", Some("1"))]);
}

#[test]
fn test_parse_pairs_strips_leading_question_mark() {
    assert_eq!(
        parse_pairs("?q=shoes&flag"),
        vec![("q".to_string(), Some("shoes".to_string())), ("flag".to_string(), None)]
    );
}

#[test]
fn test_decode_component() {
    assert_eq!(decode_component("c_size%3DM%7CL").as_deref(), Some("c_size=M|L"));
    assert_eq!(decode_component("red+shoes").as_deref(), Some("red shoes"));
    assert_eq!(decode_component("caf%C3%A9").as_deref(), Some("café"));
    assert_eq!(decode_component("100%"), None);
    assert_eq!(decode_component("%zz"), None);
    assert_eq!(decode_component("%FF"), None);
}

#[test]
fn test_encode_component_is_strict() {
    assert_eq!(encode_component("a b!'()*"), "a%20b%21%27%28%29%2A");
    assert_eq!(encode_component("M|L"), "M%7CL");
    assert_eq!(encode_component("A-z_0.9~"), "A-z_0.9~");
}

#[test]
fn test_escape_fragment_value() {
    assert_eq!(escape_fragment_value("20-50"), "20-50");
    assert_eq!(escape_fragment_value("a b"), "a b");
    assert_eq!(escape_fragment_value("50%|a=b&c+d#"), "50%25%7Ca%3Db%26c%2Bd%23");
    assert_eq!(escape_fragment_value("?x"), "%3Fx");
}

#[test]
fn test_query_builder_sorts_keys_stably() {
    let mut builder = QueryBuilder::new();
    builder
        .push("sort", Some("price-low-to-high".into()))
        .push("refine", Some("b".into()))
        .push("limit", Some("25".into()))
        .push("refine", Some("a".into()))
        .push("flag", None);
    assert_eq!(
        builder.finish(),
        "flag&limit=25&refine=b&refine=a&sort=price-low-to-high"
    );
}

#[test]
fn test_query_builder_empty_list_emits_nothing() {
    let mut builder = QueryBuilder::new();
    builder.push_param("tags", &ParamValue::List(vec![]));
    assert!(builder.is_empty());
    assert_eq!(builder.finish(), "");
}
