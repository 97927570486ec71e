use serde::Serialize;

/// Print `value` as JSON on stdout.
pub fn output_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", rendered);
    Ok(())
}
