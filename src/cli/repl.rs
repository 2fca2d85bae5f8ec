//! Interactive terminal front end

use std::io::Write;
use std::sync::Arc;

use console::{style, Term};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use super::render::{self, print_info, print_warning};
use crate::core::explain::{GenerationController, Level};

const RULE_WIDTH: usize = 80;

/// What the user typed at the level prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChoice {
    Level(Level),
    /// Unrecognized input; the caller warns and uses the child level
    Invalid,
    Clear,
    Quit,
}

pub fn parse_level_choice(input: &str) -> LevelChoice {
    let input = input.trim();
    if input.is_empty() {
        return LevelChoice::Level(Level::Child);
    }
    match input.to_ascii_lowercase().as_str() {
        "quit" | "exit" => LevelChoice::Quit,
        "clear" => LevelChoice::Clear,
        other => other
            .parse::<Level>()
            .map(LevelChoice::Level)
            .unwrap_or(LevelChoice::Invalid),
    }
}

fn is_exit_command(text: &str) -> bool {
    matches!(text.trim().to_ascii_lowercase().as_str(), "quit" | "exit")
}

/// Collect lines until two consecutive empty lines or EOF.
///
/// Returns `None` only when input ended before anything was read. Single
/// blank lines inside the block are kept as paragraph breaks.
pub async fn read_text_block<R>(lines: &mut Lines<R>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut collected: Vec<String> = Vec::new();
    let mut empty_run = 0;
    let mut saw_input = false;

    while let Some(line) = lines.next_line().await? {
        saw_input = true;
        if line.trim().is_empty() {
            empty_run += 1;
            if empty_run >= 2 {
                break;
            }
            continue;
        }
        if empty_run == 1 && !collected.is_empty() {
            collected.push(String::new());
        }
        empty_run = 0;
        collected.push(line);
    }

    if !saw_input {
        return Ok(None);
    }
    Ok(Some(collected.join("\n").trim().to_string()))
}

fn rule(ch: &str) -> String {
    ch.repeat(RULE_WIDTH)
}

fn prompt(text: &str) -> std::io::Result<()> {
    print!("{}", text);
    std::io::stdout().flush()
}

fn print_banner(controller: &GenerationController) {
    println!("{}", rule("="));
    println!("{}", style("🤖 ExplainThis - Interactive Terminal").bold());
    println!("{}", rule("="));
    println!("\nWelcome! Paste any complex text and I'll explain it simply.");
    println!("\nComplexity Levels:");
    println!("  1 - Explain like I'm 5 years old");
    println!("  2 - Explain like I'm a teenager");
    println!("  3 - Explain like I'm a professional (no jargon)");
    println!("\nCommands:");
    println!("  'quit' or 'exit' - Exit the program");
    println!("  'clear' - Clear screen");
    println!(
        "\n{}",
        style(format!("Model: {}", controller.provider().model())).dim()
    );
    println!("{}", rule("="));
}

fn print_goodbye() {
    println!("\n👋 Goodbye! Thanks for using ExplainThis");
}

/// Run the prompt loop on stdin until quit, EOF or Ctrl-C.
pub async fn run(controller: Arc<GenerationController>, validate: bool) -> std::io::Result<()> {
    print_banner(&controller);

    tokio::select! {
        result = session(&controller, validate) => result,
        _ = tokio::signal::ctrl_c() => {
            print_goodbye();
            Ok(())
        }
    }
}

async fn session(controller: &GenerationController, validate: bool) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt("\n📊 Choose complexity level (1/2/3) [default: 1]: ")?;
        let Some(choice) = lines.next_line().await? else {
            print_goodbye();
            return Ok(());
        };

        let level = match parse_level_choice(&choice) {
            LevelChoice::Quit => {
                print_goodbye();
                return Ok(());
            }
            LevelChoice::Clear => {
                Term::stdout().clear_screen()?;
                continue;
            }
            LevelChoice::Invalid => {
                print_warning("Invalid choice. Using default (1 - 5-year-old)");
                Level::Child
            }
            LevelChoice::Level(level) => level,
        };

        println!("\n📝 Paste your complex text (press Enter twice when done):");
        println!("{}", rule("-"));

        let Some(text) = read_text_block(&mut lines).await? else {
            print_goodbye();
            return Ok(());
        };

        if text.is_empty() {
            print_warning("No text entered. Please try again.");
            continue;
        }
        if is_exit_command(&text) {
            print_goodbye();
            return Ok(());
        }

        let spinner = render::spinner("Processing... (this may take a few seconds)");
        let result = controller
            .explain(&text, level.code(), validate, None)
            .await;
        spinner.finish_and_clear();

        println!();
        render::print_result(&result);
        if result.success && result.attempts > 1 {
            print_info(&format!("took {} attempts", result.attempts));
        }
    }
}
