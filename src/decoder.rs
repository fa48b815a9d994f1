//! Response decoder - turns the API's loosely-typed JSON into definitions
//!
//! The Collegiate API answers with one of three shapes:
//! - `[]` when nothing matched,
//! - `["word", ...]` when the term is unknown but close spellings exist,
//! - `[{"def": [...]}, ...]` with one object per headword entry.
//!
//! Entry objects vary a lot, so everything below the root is decoded leniently:
//! a malformed entry is skipped, a sense without text is dropped, and only a
//! malformed root is reported as a [`SchemaError`].

use serde_json::{Map, Value};

use crate::error::{json_kind, EntryError, SchemaError};
use crate::models::{Definitions, Entry, Sense, SenseCategory, Suggestions};

/// What a successfully parsed response turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Definitions(Definitions),
    Suggestions(Suggestions),
}

/// Decode a raw response body
pub fn decode(body: &[u8]) -> Result<Decoded, SchemaError> {
    let root: Value =
        serde_json::from_slice(body).map_err(|e| SchemaError::Json(e.to_string()))?;

    let items = match &root {
        Value::Array(items) => items,
        other => return Err(SchemaError::NotArray(json_kind(other))),
    };

    match items.first() {
        None => Ok(Decoded::Definitions(Definitions::default())),
        Some(Value::String(_)) => decode_suggestions(items).map(Decoded::Suggestions),
        Some(Value::Object(_)) => Ok(Decoded::Definitions(decode_entries(items))),
        Some(other) => Err(SchemaError::UnexpectedElement(json_kind(other))),
    }
}

fn decode_suggestions(items: &[Value]) -> Result<Suggestions, SchemaError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(SchemaError::MixedSuggestions {
                index,
                found: json_kind(other),
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Suggestions)
}

fn decode_entries(items: &[Value]) -> Definitions {
    let mut entries = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match decode_entry(item) {
            Ok(entry) => entries.push(entry),
            Err(e) => tracing::debug!(index, error = %e, "Skipping entry"),
        }
    }

    tracing::trace!(
        received = items.len(),
        kept = entries.len(),
        "Decoded entries"
    );

    Definitions { entries }
}

fn decode_entry(value: &Value) -> Result<Entry, EntryError> {
    let entry = as_object(value, "entry")?;
    let defs = entry.get("def").ok_or(EntryError::MissingField("def"))?;
    let defs = as_array(defs, "def")?;

    let mut senses = Vec::new();
    for block in defs {
        decode_definition_block(block, &mut senses)?;
    }

    tracing::trace!(
        definitions = defs.len(),
        senses = senses.len(),
        "Decoded entry"
    );

    Ok(Entry { senses })
}

fn block_category(block: &Map<String, Value>) -> SenseCategory {
    if block.contains_key("vd") {
        SenseCategory::Verb
    } else if block.contains_key("sls") {
        SenseCategory::Sls
    } else {
        SenseCategory::Plain
    }
}

fn decode_definition_block(value: &Value, senses: &mut Vec<Sense>) -> Result<(), EntryError> {
    let block = as_object(value, "definition block")?;
    let category = block_category(block);

    let sseq = block.get("sseq").ok_or(EntryError::MissingField("sseq"))?;
    for group in as_array(sseq, "sseq")? {
        walk_sequence(as_array(group, "sseq group")?, category, senses)?;
    }

    Ok(())
}

/// Walk a list of `[kind, payload]` tuples, descending into `pseq`
fn walk_sequence(
    items: &[Value],
    category: SenseCategory,
    senses: &mut Vec<Sense>,
) -> Result<(), EntryError> {
    for item in items {
        let (kind, payload) = as_tuple(item, "sequence item")?;
        match kind {
            "sense" => match decode_sense(payload, category) {
                Ok(sense) => senses.push(sense),
                Err(e) => tracing::debug!(error = %e, "Dropping sense"),
            },
            "pseq" => walk_sequence(as_array(payload, "pseq")?, category, senses)?,
            _ => {}
        }
    }

    Ok(())
}

fn decode_sense(value: &Value, category: SenseCategory) -> Result<Sense, EntryError> {
    let sense = as_object(value, "sense")?;

    let label = match sense.get("sn") {
        None => None,
        Some(Value::String(sn)) => Some(sn.clone()),
        Some(other) => {
            return Err(EntryError::WrongType {
                context: "sn",
                expected: "a string",
                found: json_kind(other),
            })
        }
    };

    let dt = sense.get("dt").ok_or(EntryError::MissingField("dt"))?;
    let text = find_text(as_array(dt, "dt")?)?;

    Ok(Sense {
        label,
        text,
        category,
    })
}

/// First `["text", "..."]` item of a `dt` array
fn find_text(items: &[Value]) -> Result<String, EntryError> {
    for item in items {
        let Some([Value::String(kind), payload]) = item.as_array().map(Vec::as_slice) else {
            continue;
        };
        if kind == "text" {
            return match payload {
                Value::String(text) => Ok(text.clone()),
                other => Err(EntryError::WrongType {
                    context: "text",
                    expected: "a string",
                    found: json_kind(other),
                }),
            };
        }
    }

    Err(EntryError::MissingText)
}

fn as_object<'a>(
    value: &'a Value,
    context: &'static str,
) -> Result<&'a Map<String, Value>, EntryError> {
    value.as_object().ok_or(EntryError::WrongType {
        context,
        expected: "an object",
        found: json_kind(value),
    })
}

fn as_array<'a>(value: &'a Value, context: &'static str) -> Result<&'a [Value], EntryError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or(EntryError::WrongType {
            context,
            expected: "an array",
            found: json_kind(value),
        })
}

fn as_tuple<'a>(
    value: &'a Value,
    context: &'static str,
) -> Result<(&'a str, &'a Value), EntryError> {
    match as_array(value, context)? {
        [Value::String(kind), payload] => Ok((kind.as_str(), payload)),
        _ => Err(EntryError::MalformedTuple(context)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definitions(body: &str) -> Definitions {
        match decode(body.as_bytes()).unwrap() {
            Decoded::Definitions(d) => d,
            other => panic!("expected definitions, got {:?}", other),
        }
    }

    fn sense(sn: Option<&str>, text: &str) -> String {
        match sn {
            Some(sn) => format!(r#"["sense",{{"sn":"{}","dt":[["text","{}"]]}}]"#, sn, text),
            None => format!(r#"["sense",{{"dt":[["text","{}"]]}}]"#, text),
        }
    }

    #[test]
    fn test_single_plain_sense() {
        let body = r#"[{"def":[{"sseq":[[["sense",{"sn":"1","dt":[["text","a domestic carnivore"]]}]]]}]}]"#;
        let defs = definitions(body);

        assert_eq!(defs.entries.len(), 1);
        assert_eq!(
            defs.entries[0].senses,
            vec![Sense {
                label: Some("1".to_string()),
                text: "a domestic carnivore".to_string(),
                category: SenseCategory::Plain,
            }]
        );
    }

    #[test]
    fn test_suggestions_keep_order() {
        let decoded = decode(br#"["cta","cat","cot"]"#).unwrap();
        assert_eq!(
            decoded,
            Decoded::Suggestions(Suggestions(vec![
                "cta".to_string(),
                "cat".to_string(),
                "cot".to_string(),
            ]))
        );
    }

    #[test]
    fn test_empty_array_is_empty_definitions() {
        let defs = definitions("[]");
        assert!(defs.is_empty());
    }

    #[test]
    fn test_root_shape_errors() {
        assert!(matches!(decode(b"not json"), Err(SchemaError::Json(_))));
        assert_eq!(
            decode(br#"{"def":[]}"#),
            Err(SchemaError::NotArray("an object"))
        );
        assert_eq!(
            decode(b"[1, 2]"),
            Err(SchemaError::UnexpectedElement("a number"))
        );
        assert_eq!(
            decode(br#"["cat", 3]"#),
            Err(SchemaError::MixedSuggestions {
                index: 1,
                found: "a number"
            })
        );
    }

    #[test]
    fn test_block_categories() {
        let body = format!(
            r#"[{{"def":[
                {{"vd":"transitive verb","sseq":[[{}]]}},
                {{"sls":["chiefly British"],"sseq":[[{}]]}},
                {{"vd":"intransitive verb","sls":["slang"],"sseq":[[{}]]}},
                {{"sseq":[[{}]]}}
            ]}}]"#,
            sense(None, "to strike"),
            sense(None, "a lorry"),
            sense(None, "to vomit"),
            sense(None, "a feline"),
        );
        let defs = definitions(&body);
        let categories: Vec<_> = defs.entries[0].senses.iter().map(|s| s.category).collect();

        assert_eq!(
            categories,
            vec![
                SenseCategory::Verb,
                SenseCategory::Sls,
                SenseCategory::Verb,
                SenseCategory::Plain,
            ]
        );
    }

    #[test]
    fn test_pseq_inherits_category_and_order() {
        let body = format!(
            r#"[{{"def":[{{"vd":"verb","sseq":[
                [{}],
                [["pseq",[["bs",{{"sense":{{"dt":[["text","ignored"]]}}}}],{},{}]]]
            ]}}]}}]"#,
            sense(Some("1"), "first"),
            sense(Some("2 a"), "nested a"),
            sense(Some("b"), "nested b"),
        );
        let senses = &definitions(&body).entries[0].senses;

        let labels: Vec<_> = senses.iter().map(|s| s.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("1"), Some("2 a"), Some("b")]);
        assert!(senses.iter().all(|s| s.category == SenseCategory::Verb));
    }

    #[test]
    fn test_sense_without_text_is_dropped_alone() {
        let body = format!(
            r#"[{{"def":[{{"sseq":[[
                {},
                ["sense",{{"sn":"2","dt":[["vis",[{{"t":"an example"}}]]]}}],
                ["sense",{{"sn":"3"}}],
                {}
            ]]}}]}}]"#,
            sense(Some("1"), "kept"),
            sense(Some("4"), "also kept"),
        );
        let defs = definitions(&body);

        assert_eq!(defs.entries.len(), 1);
        let texts: Vec<_> = defs.entries[0].senses.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["kept", "also kept"]);
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let body = format!(
            r#"[
                {{"meta":{{"id":"cat:1"}},"def":[{{"sseq":[[{}]]}}]}},
                {{"meta":{{"id":"cat:2"}},"cxs":[]}},
                {{"def":"not an array"}},
                42,
                {{"def":[{{"sseq":[[{}]]}}]}}
            ]"#,
            sense(None, "first entry"),
            sense(None, "last entry"),
        );
        let defs = definitions(&body);

        assert_eq!(defs.entries.len(), 2);
        assert_eq!(defs.entries[0].senses[0].text, "first entry");
        assert_eq!(defs.entries[1].senses[0].text, "last entry");
    }

    #[test]
    fn test_text_is_first_text_item() {
        let body = r#"[{"def":[{"sseq":[[["sense",{"dt":[
            ["vis",[{"t":"example"}]],
            ["text","{bc}the first"],
            ["text","the second"]
        ]}]]]}]}]"#;
        let sense = &definitions(body).entries[0].senses[0];

        assert_eq!(sense.text, "{bc}the first");
        assert_eq!(sense.label, None);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let body = format!(
            r#"[{{"def":[{{"sseq":[[{},{}]]}}]}},{{"def":[{{"sls":["law"],"sseq":[[{}]]}}]}}]"#,
            sense(Some("1"), "one"),
            sense(Some("2"), "two"),
            sense(None, "three"),
        );

        let first = decode(body.as_bytes()).unwrap();
        for _ in 0..5 {
            assert_eq!(decode(body.as_bytes()).unwrap(), first);
        }
    }
}
