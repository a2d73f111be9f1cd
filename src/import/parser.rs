use serde_json::Value;

use crate::error::ClientResult;
use crate::types::ContactRecord;

/// Shape of a JSON import payload
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `[{name, number}, ...]`
    Array(Vec<Value>),
    /// `{"contacts": [{name, number}, ...]}`
    Wrapped(Vec<Value>),
    /// Any other JSON value; imports nothing
    Unrecognized,
}

impl Payload {
    pub fn decode(text: &str) -> ClientResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::classify(value))
    }

    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => Payload::Array(items),
            Value::Object(mut map) => match map.remove("contacts") {
                Some(Value::Array(items)) => Payload::Wrapped(items),
                _ => Payload::Unrecognized,
            },
            _ => Payload::Unrecognized,
        }
    }

    pub fn into_candidates(self) -> Vec<ContactRecord> {
        match self {
            Payload::Array(items) | Payload::Wrapped(items) => {
                items.iter().map(json_candidate).collect()
            }
            Payload::Unrecognized => Vec::new(),
        }
    }
}

/// Parse pasted or uploaded text into an import batch.
///
/// Text starting with `[` or `{` is JSON, anything else is comma separated
/// lines with an optional `name,number` header. Rows missing either field are
/// dropped. Fields are split on every comma; quoting is not supported.
pub fn parse(raw: &str) -> ClientResult<Vec<ContactRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let candidates = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        Payload::decode(trimmed)?.into_candidates()
    } else {
        csv_candidates(trimmed)
    };

    Ok(candidates.into_iter().filter(is_complete).collect())
}

/// First `limit` records, or nothing if the text does not parse yet
pub fn preview(raw: &str, limit: usize) -> Vec<ContactRecord> {
    match parse(raw) {
        Ok(mut records) => {
            records.truncate(limit);
            records
        }
        Err(_) => Vec::new(),
    }
}

fn is_complete(record: &ContactRecord) -> bool {
    !record.name.is_empty() && !record.number.is_empty()
}

fn json_candidate(item: &Value) -> ContactRecord {
    let number = match item.get("number") {
        // Spreadsheet exports often turn phone numbers into JSON numbers
        Some(Value::Number(n)) => n.to_string(),
        other => json_text(other),
    };
    ContactRecord::new(json_text(item.get("name")), number)
}

fn json_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

fn csv_candidates(text: &str) -> Vec<ContactRecord> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .collect();

    let Some(first) = lines.first() else {
        return Vec::new();
    };

    let header: Vec<String> = first
        .split(',')
        .map(|field| field.trim().to_lowercase())
        .collect();
    let has_header = header.iter().any(|h| h == "name" || h == "number");

    let (name_index, number_index, data) = if has_header {
        (
            header.iter().position(|h| h == "name"),
            header.iter().position(|h| h == "number"),
            &lines[1..],
        )
    } else {
        (Some(0), Some(1), &lines[..])
    };

    data.iter()
        .map(|line| {
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            let column = |index: Option<usize>| {
                index
                    .and_then(|i| parts.get(i))
                    .map(|s| s.to_string())
                    .unwrap_or_default()
            };
            ContactRecord::new(column(name_index), column(number_index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    fn rec(name: &str, number: &str) -> ContactRecord {
        ContactRecord::new(name, number)
    }

    #[test]
    fn empty_and_whitespace_input_is_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \n\t \r\n ").unwrap().is_empty());
    }

    #[test]
    fn json_array_preserves_order() {
        let got = parse(r#"[{"name":"Bob","number":"456"},{"name":"Alice","number":"123"}]"#).unwrap();
        assert_eq!(got, vec![rec("Bob", "456"), rec("Alice", "123")]);
    }

    #[test]
    fn json_wrapped_contacts_are_filtered() {
        let got = parse(
            r#"{"contacts":[{"name":"Alice","number":"123"},{"name":"  ","number":"9"},{"name":"Carl"}]}"#,
        )
        .unwrap();
        assert_eq!(got, vec![rec("Alice", "123")]);
    }

    #[test]
    fn json_object_without_contacts_array_is_empty() {
        assert!(parse(r#"{"people":[{"name":"A","number":"1"}]}"#).unwrap().is_empty());
        assert!(parse(r#"{"contacts":"Alice,123"}"#).unwrap().is_empty());
    }

    #[test]
    fn json_non_object_items_are_dropped() {
        let got = parse(r#"[1, "x", null, {"name":"Alice","number":5511999}]"#).unwrap();
        assert_eq!(got, vec![rec("Alice", "5511999")]);
    }

    #[test]
    fn json_numeric_name_is_not_a_name() {
        let got = parse(r#"[{"name":42,"number":"123"},{"name":" Bob ","number":456}]"#).unwrap();
        assert_eq!(got, vec![rec("Bob", "456")]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse("{name: Alice"), Err(ClientError::MalformedPayload(_))));
        assert!(matches!(parse("[{\"name\":"), Err(ClientError::MalformedPayload(_))));
    }

    #[test]
    fn csv_with_header() {
        let got = parse("name,number\nAlice,123\nBob,456").unwrap();
        assert_eq!(got, vec![rec("Alice", "123"), rec("Bob", "456")]);
    }

    #[test]
    fn csv_without_header() {
        let got = parse("Alice,123\nBob,456").unwrap();
        assert_eq!(got, vec![rec("Alice", "123"), rec("Bob", "456")]);
    }

    #[test]
    fn csv_header_columns_can_be_reordered() {
        let got = parse("Number , Name, City\r\n123, Alice ,Rio\r\n\r\n456,Bob,SP\r\n").unwrap();
        assert_eq!(got, vec![rec("Alice", "123"), rec("Bob", "456")]);
    }

    #[test]
    fn csv_header_missing_a_column_imports_nothing() {
        assert!(parse("name,phone\nAlice,123").unwrap().is_empty());
    }

    #[test]
    fn csv_incomplete_rows_are_dropped() {
        let got = parse("name,number\nAlice,123\n,999\nCarl,\nDana\nBob,456").unwrap();
        assert_eq!(got, vec![rec("Alice", "123"), rec("Bob", "456")]);
    }

    #[test]
    fn csv_commas_split_naively() {
        let got = parse("name,number\n\"Smith, John\",123").unwrap();
        assert_eq!(got, vec![rec("\"Smith", "John\"")]);
    }

    #[test]
    fn duplicates_are_kept() {
        let got = parse("Alice,123\nAlice,123").unwrap();
        assert_eq!(got.len(), 2);
    }

    #[test]
    fn classify_shapes() {
        assert_eq!(Payload::classify(serde_json::json!([])), Payload::Array(vec![]));
        assert_eq!(
            Payload::classify(serde_json::json!({"contacts": []})),
            Payload::Wrapped(vec![])
        );
        assert_eq!(Payload::classify(serde_json::json!(3)), Payload::Unrecognized);
    }

    #[test]
    fn preview_is_bounded_and_lenient() {
        let got = preview("a,1\nb,2\nc,3\nd,4", 3);
        assert_eq!(got.len(), 3);
        assert!(preview("[oops", 3).is_empty());
    }
}
