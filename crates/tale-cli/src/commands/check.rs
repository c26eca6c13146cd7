use std::path::Path;

use colored::Colorize;

pub fn run(story_path: &Path) -> Result<(), String> {
    let story = super::load_story(story_path)?;

    let warnings = story.lint();
    if warnings.is_empty() {
        println!(
            "{} {} scene{}, no problems found",
            "ok:".green().bold(),
            story.len(),
            if story.len() == 1 { "" } else { "s" },
        );
        return Ok(());
    }

    for warning in &warnings {
        println!("{} {warning}", "warning:".yellow().bold());
    }
    println!(
        "  {} warning{}",
        warnings.len(),
        if warnings.len() == 1 { "" } else { "s" },
    );

    // Authoring problems are tolerated at runtime; only unparseable
    // documents fail the check.
    Ok(())
}
