//! Terminal UI utilities

use colored::Colorize;
use namekit_lib::Event;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a section header
pub fn header(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Print a key-value pair
pub fn key_value(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print a separator line
pub fn separator() {
    println!("{}", "─".repeat(60).dimmed());
}

/// Print one event as `Kind {fields}`
pub fn event(event: &Event) {
    let fields = serde_json::to_value(event)
        .ok()
        .and_then(|mut value| {
            value.as_object_mut().map(|obj| {
                obj.remove("type");
                serde_json::Value::Object(obj.clone())
            })
        })
        .map(|value| value.to_string())
        .unwrap_or_default();
    println!("  {} {}", event.kind().magenta(), fields.dimmed());
}

/// Print JSON prettily
pub fn json(value: &serde_json::Value) {
    if let Ok(pretty) = serde_json::to_string_pretty(value) {
        println!("{}", pretty);
    }
}
