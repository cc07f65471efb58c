use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
///
/// Scalar fields of the result become a two-column field/value table; array
/// fields holding objects (amortization schedules, eligible offers, per-loan
/// details) each get their own table underneath, headed by the field name.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{}", value);
        return;
    };

    match map.get("result") {
        Some(result) => {
            print_section(result, None);
            print_warnings(map);
            if let Some(Value::String(meth)) = map.get("methodology") {
                println!("\nMethodology: {}", meth);
            }
        }
        None => print_section(value, None),
    }
}

fn print_section(value: &Value, title: Option<&str>) {
    if let Some(title) = title {
        println!("\n{}:", title);
    }

    match value {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            let mut nested: Vec<(&str, &Value)> = Vec::new();

            for (key, val) in map {
                match val {
                    Value::Array(arr) if arr.first().is_some_and(|v| v.is_object()) => {
                        nested.push((key.as_str(), val));
                    }
                    Value::Object(_) => nested.push((key.as_str(), val)),
                    other => builder.push_record([key.as_str(), &scalar(other)]),
                }
            }

            let table = Table::from(builder);
            println!("{}", table);

            for (key, val) in nested {
                if let Value::Array(arr) = val {
                    print_rows(key, arr);
                } else {
                    print_section(val, Some(key));
                }
            }
        }
        Value::Array(arr) => print_rows(title.unwrap_or("rows"), arr),
        other => println!("{}", scalar(other)),
    }
}

fn print_rows(title: &str, arr: &[Value]) {
    println!("\n{}:", title);
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", scalar(item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_warnings(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(scalar).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
