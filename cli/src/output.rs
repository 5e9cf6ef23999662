use anyhow::Result;
use illustra_backend_client::ApiError;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{output}");
    Ok(())
}

/// Left-aligned columns separated by two spaces, sized to the widest cell.
pub fn print_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) {
    let mut widths = headers.map(str::len);
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header = headers
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", header.trim_end().bold());

    for row in rows {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    }
}

pub fn or_dash(value: Option<impl ToString>) -> String {
    value
        .map(|value| value.to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "-".to_string())
}

pub fn success(message: impl std::fmt::Display) {
    println!("{} {message}", "✓".bright_green());
}

/// Prints a failed command to stderr. Validation errors list every field
/// message on its own line beneath the summary.
pub fn report_error(err: &anyhow::Error) {
    let api_error = err.chain().find_map(|cause| cause.downcast_ref::<ApiError>());
    match api_error {
        Some(ApiError::Validation(fields)) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            for (field, messages) in fields.iter() {
                for message in messages {
                    eprintln!("  {}: {message}", field.bold());
                }
            }
        }
        Some(ApiError::Unauthorized) => {
            eprintln!("{} {err}", "error:".bright_red().bold());
            eprintln!("  sign in with `illustra auth login` or renew with `illustra auth refresh`");
        }
        _ => {
            eprintln!("{} {err:#}", "error:".bright_red().bold());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dash_for_missing_or_empty_values() {
        assert_eq!(or_dash(None::<String>), "-");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(Some(42)), "42");
    }
}
