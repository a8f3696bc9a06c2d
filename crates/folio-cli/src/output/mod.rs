use folio_core::{ChatTurn, Role};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => Ok(render_text(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// One transcript line as shown in the terminal.
#[must_use]
pub fn format_turn(turn: &ChatTurn) -> String {
    match (turn.role, turn.is_failure()) {
        (Role::User, _) => format!("you> {}", turn.content),
        (Role::Assistant, false) => format!("folio> {}", turn.content),
        (Role::Assistant, true) => format!("folio! {}", turn.content),
    }
}

fn render_text(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut entries = map.iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
            entries
                .into_iter()
                .map(|(key, value)| format!("{key:<width$}  {}", value_to_cell(value)))
                .collect::<Vec<_>>()
                .join("\n")
        }
        Value::Array(items) if items.is_empty() => String::from("(none)"),
        Value::Array(items) => items
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n\n"),
        scalar => value_to_cell(scalar),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
