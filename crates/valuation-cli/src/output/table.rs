use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render a result as tables: scalar fields first, then every embedded
/// array-of-records (cash-flow schedule, amortization rows, dividend
/// projection) as its own columnar table.
pub fn print_table(value: &Value) {
    let Value::Object(map) = value else {
        println!("{}", value);
        return;
    };

    // Envelope outputs nest the payload under "result"; the dividend model
    // output is flat.
    let (payload, envelope) = match map.get("result") {
        Some(Value::Object(inner)) => (inner, Some(map)),
        _ => (map, None),
    };

    print_scalars(payload);

    for (key, val) in payload {
        if let Value::Array(rows) = val {
            if matches!(rows.first(), Some(Value::Object(_))) {
                println!("\n{}:", key);
                print_record_table(rows);
            }
        }
    }

    let warnings = envelope
        .and_then(|m| m.get("warnings"))
        .or_else(|| payload.get("warnings"));
    if let Some(Value::Array(warnings)) = warnings {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.and_then(|m| m.get("methodology")) {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column table of the payload's scalar fields.
fn print_scalars(payload: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);

    for (key, val) in payload {
        if val.is_array() || val.is_object() {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }

    let table = Table::from(builder);
    println!("{}", table);
}

/// Columnar table for an array of uniform JSON records.
fn print_record_table(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();

    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    let table = Table::from(builder);
    println!("{}", table);
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
