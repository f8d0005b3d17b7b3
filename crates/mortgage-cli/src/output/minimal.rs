use serde_json::Value;

/// Key answer fields, in priority order. Snake-case names come from the
/// schedule envelope, labelled names from the summary view.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "Monthly payment (local)",
    "path",
    "total_paid",
    "total_interest",
];

/// Print just the key answer value from the output.
///
/// Looks in the result object, then in a nested `summary` object, then falls
/// back to the first field of the result.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let scopes = [Some(result_obj), result_obj.get("summary")];
    for scope in scopes.into_iter().flatten() {
        if let Value::Object(map) = scope {
            for key in &PRIORITY_KEYS {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
