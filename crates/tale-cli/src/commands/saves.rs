use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use tale_save::{FileBackend, SaveStore};

pub fn run(
    game_id: &str,
    saves_dir: &Path,
    delete: Option<&str>,
    clear: bool,
) -> Result<(), String> {
    let mut store = SaveStore::new(game_id, FileBackend::new(saves_dir));

    if clear {
        store.delete_all();
        println!("All saves for \"{game_id}\" deleted.");
        return Ok(());
    }

    if let Some(slot) = delete {
        if store.delete(slot) {
            println!("Deleted slot \"{slot}\".");
            return Ok(());
        }
        return Err(format!("could not delete slot \"{slot}\""));
    }

    let slots = store.list();
    if slots.is_empty() {
        println!("  No saves found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Slot", "Saved", "Scene"]);
    for slot in &slots {
        table.add_row(vec![
            slot.slot_name.clone(),
            super::format_timestamp(slot.saved_at),
            slot.current_scene_id.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} save{}",
        slots.len(),
        if slots.len() == 1 { "" } else { "s" },
    );

    Ok(())
}
