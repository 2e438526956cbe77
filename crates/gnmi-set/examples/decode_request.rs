//! Simple decoder to inspect encoded SetRequest files.

use std::fs;

use gnmi_set::{decode_set_request, TypedValue, Update};

fn format_value(v: &TypedValue) -> String {
    match v {
        TypedValue::Json(b) | TypedValue::JsonIetf(b) => {
            let text = String::from_utf8_lossy(b);
            let preview: String = text.chars().take(80).collect();
            if text.chars().count() > 80 {
                format!("{}...", preview)
            } else {
                preview
            }
        }
        TypedValue::Ascii(s) | TypedValue::String(s) => format!("\"{}\"", s),
        TypedValue::Bool(b) => format!("{}", b),
        TypedValue::Bytes(b) => format!("BYTES[{}]", b.len()),
        TypedValue::Int(i) => format!("{}", i),
        TypedValue::Uint(u) => format!("{}", u),
        TypedValue::Float(f) => format!("{:.6}", f),
        TypedValue::Decimal(d) => format!("DECIMAL(digits={}, precision={})", d.digits, d.precision),
    }
}

fn print_updates(label: &str, updates: &[Update]) {
    println!("\n=== {} ({}) ===", label, updates.len());
    for u in updates {
        println!("  {} = {} ({})", u.path, format_value(&u.val), u.val.encoding());
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "set_request.pb".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let req = decode_set_request(&data).expect("Failed to decode");

    println!("\n=== Request Info ===");
    match &req.prefix {
        Some(prefix) => {
            println!("Prefix: {}", prefix);
            if !prefix.target.is_empty() {
                println!("Target: {}", prefix.target);
            }
        }
        None => println!("Prefix: (none)"),
    }
    println!("Operations: {}", req.op_count());

    println!("\n=== Deletes ({}) ===", req.delete.len());
    for p in &req.delete {
        println!("  {}", p);
    }
    print_updates("Replaces", &req.replace);
    print_updates("Updates", &req.update);
}
