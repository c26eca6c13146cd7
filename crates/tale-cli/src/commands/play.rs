use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use colored::Colorize;

use tale_engine::{EngineError, Tick, Typewriter};
use tale_save::FileBackend;
use tale_session::{SessionConfig, StorySession};

/// Per-character delay for the typewriter reveal.
const REVEAL_DELAY: Duration = Duration::from_millis(20);

enum Flow {
    Continue,
    Quit,
}

pub fn run(
    story_path: &Path,
    saves_dir: &Path,
    game_id: Option<&str>,
    typewriter: bool,
) -> Result<(), String> {
    let story = super::load_story(story_path)?;
    let title = story
        .title
        .clone()
        .unwrap_or_else(|| "Untitled Story".to_string());
    let game_id = match game_id {
        Some(id) => id.to_string(),
        None => story_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "story".to_string()),
    };

    let mut session = StorySession::new(
        story,
        FileBackend::new(saves_dir),
        SessionConfig::new(&game_id),
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", title.bold());

    if session.has_auto_save() && offer_resume(&mut lines)? && session.resume() {
        println!("(resumed from auto-save)");
    } else {
        session.start_fresh().map_err(|e| e.to_string())?;
    }
    render(&session, typewriter);

    loop {
        print!("\n> ");
        io::stdout().flush().ok();
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.map_err(|e| e.to_string())?;
        match execute(&mut session, line.trim(), typewriter)? {
            Flow::Continue => {}
            Flow::Quit => break,
        }
    }

    println!("Farewell.");
    Ok(())
}

fn offer_resume(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<bool, String> {
    print!("Resume from auto-save? [y/N] ");
    io::stdout().flush().ok();
    match lines.next() {
        Some(line) => Ok(line
            .map_err(|e| e.to_string())?
            .trim()
            .eq_ignore_ascii_case("y")),
        None => Ok(false),
    }
}

fn execute(
    session: &mut StorySession<FileBackend>,
    input: &str,
    typewriter: bool,
) -> Result<Flow, String> {
    if input.is_empty() {
        return Ok(Flow::Continue);
    }

    if let Ok(number) = input.parse::<usize>() {
        choose(session, number, typewriter);
        return Ok(Flow::Continue);
    }

    let (cmd, rest) = match input.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input, ""),
    };

    match cmd.to_lowercase().as_str() {
        "back" | "undo" => {
            if session.back() {
                render(session, typewriter);
            } else {
                println!("Nothing to undo.");
            }
        }
        "save" => {
            let slot = if rest.is_empty() { "quick" } else { rest };
            if session.save(slot) {
                println!("Saved to \"{slot}\".");
            } else {
                println!("Save failed.");
            }
        }
        "load" => {
            let slot = if rest.is_empty() { "quick" } else { rest };
            if session.load(slot) {
                render(session, typewriter);
            } else {
                println!("No usable save named \"{slot}\".");
            }
        }
        "saves" => print_saves(session),
        "restart" => {
            session.restart().map_err(|e| e.to_string())?;
            render(session, typewriter);
        }
        "help" => print_help(),
        "quit" | "q" | "exit" => return Ok(Flow::Quit),
        _ => println!("Unknown command: {input} (try 'help')"),
    }
    Ok(Flow::Continue)
}

fn choose(session: &mut StorySession<FileBackend>, number: usize, typewriter: bool) {
    if number == 0 {
        println!("Choices are numbered from 1.");
        return;
    }
    match session.choose(number - 1) {
        Ok(()) => render(session, typewriter),
        Err(EngineError::InvalidChoice(_)) => println!("No such choice."),
        Err(EngineError::NoMatchingBranch { .. }) => {
            println!("Nothing comes of it.");
        }
        Err(EngineError::SceneNotFound(id)) => {
            println!("That path leads nowhere (missing scene \"{id}\").");
        }
    }
}

fn render(session: &StorySession<FileBackend>, typewriter: bool) {
    let Some(scene) = session.engine().current_scene() else {
        return;
    };

    println!();
    print_text(&scene.text, typewriter);

    if scene.is_ending {
        let title = scene.ending_title.as_deref().unwrap_or("The End");
        println!();
        println!("{}", format!("— {title} —").yellow().bold());
        if let Some(text) = &scene.ending_text {
            println!("{text}");
        }
    }

    let choices = session.engine().available_choices();
    if choices.is_empty() {
        if scene.is_ending {
            println!("\nType 'restart' to play again, or 'quit' to leave.");
        } else {
            println!("\nThere is no way forward. Try 'back' or 'restart'.");
        }
        return;
    }

    println!();
    for (index, choice) in choices.iter().enumerate() {
        println!("  {} {}", format!("[{}]", index + 1).cyan(), choice.text);
    }
}

fn print_text(text: &str, typewriter: bool) {
    if !typewriter {
        println!("{text}");
        return;
    }
    let mut reveal = Typewriter::new();
    reveal.start(text);
    loop {
        match reveal.tick() {
            Tick::Chunk(chunk) => {
                print!("{chunk}");
                io::stdout().flush().ok();
                thread::sleep(REVEAL_DELAY);
            }
            Tick::Done | Tick::Idle => break,
        }
    }
    println!();
}

fn print_saves(session: &StorySession<FileBackend>) {
    let slots = session.saves();
    if slots.is_empty() {
        println!("No saves yet.");
        return;
    }
    for slot in &slots {
        println!(
            "  {} — {} ({})",
            slot.slot_name,
            slot.current_scene_id,
            super::format_timestamp(slot.saved_at),
        );
    }
}

fn print_help() {
    println!(
        "Commands:\n\
         \x20 <number>      choose the numbered option\n\
         \x20 back          undo the last choice (flags are kept)\n\
         \x20 save [name]   save to a named slot (default: quick)\n\
         \x20 load [name]   load a named slot\n\
         \x20 saves         list save slots\n\
         \x20 restart       start over from the beginning\n\
         \x20 quit          leave the game"
    );
}
