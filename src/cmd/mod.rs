pub mod catalog;
pub mod gamble;
pub mod recall;
pub mod simulate;

use psylab::error::PlResult;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes `{id}.json` (and `{id}.csv` when a table is given) under `dir`.
pub fn save_session(
    dir: &str,
    id: &str,
    value: &Value,
    table: Option<&psylab::export::ExportTable>,
) -> PlResult<()> {
    let dir = Path::new(dir);
    fs::create_dir_all(dir)?;

    let json_path = dir.join(format!("{}.json", id));
    fs::write(&json_path, serde_json::to_string_pretty(value)?)?;
    info!("💾 Saved {}", json_path.display());

    if let Some(table) = table {
        let csv_path = dir.join(format!("{}.csv", id));
        table.save(&csv_path)?;
        info!("💾 Saved {}", csv_path.display());
    }
    Ok(())
}
