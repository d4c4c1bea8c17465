//! Representación canónica de JSON: claves de objeto ordenadas, sin
//! whitespace. El resultado es independiente del orden de inserción de los
//! maps, por lo que sirve como entrada estable de hashing.

use serde_json::Value;

/// Serializa `value` en su forma canónica.
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => match serde_json::to_string(s) {
            Ok(quoted) => out.push_str(&quoted),
            Err(_) => unreachable!("string JSON no serializable"),
        },
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(&Value::String(key.clone()), out);
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_sorted_regardless_of_insertion_order() {
        let a = json!({"b": 1, "a": {"z": true, "m": null}});
        assert_eq!(to_canonical_json(&a), r#"{"a":{"m":null,"z":true},"b":1}"#);
    }

    #[test]
    fn arrays_preserve_order() {
        let v = json!([3, 1, 2]);
        assert_eq!(to_canonical_json(&v), "[3,1,2]");
    }

    #[test]
    fn strings_are_escaped() {
        let v = json!("a\"b");
        assert_eq!(to_canonical_json(&v), r#""a\"b""#);
    }
}
