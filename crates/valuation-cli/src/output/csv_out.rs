use serde_json::Value;
use std::io;

/// Priority order for picking the row set when a result embeds one.
const ROW_FIELDS: [&str; 3] = ["schedule", "cashflows", "projection"];

/// Write output as CSV to stdout. Results that embed a schedule or
/// projection emit it as the row set; scalar-only results fall back to
/// field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let payload = value
        .as_object()
        .map(|m| m.get("result").and_then(Value::as_object).unwrap_or(m));

    let Some(map) = payload else {
        let _ = wtr.write_record([&format_csv_value(value)]);
        let _ = wtr.flush();
        return;
    };

    let rows = ROW_FIELDS
        .iter()
        .find_map(|f| map.get(*f).and_then(Value::as_array));

    if let Some(rows) = rows {
        write_rows_csv(&mut wtr, rows);
    } else {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            if val.is_array() || val.is_object() {
                continue;
            }
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
