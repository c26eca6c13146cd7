pub mod check;
pub mod play;
pub mod saves;

use std::path::Path;

use tale_story::Story;

/// Load and parse a story document, mapping failures to CLI errors.
fn load_story(path: &Path) -> Result<Story, String> {
    let document = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Story::from_json(&document).map_err(|e| e.to_string())
}

/// Render an epoch-milliseconds timestamp for display.
fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
