//! Interactive search loop.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use skycast_ui::SearchController;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Quit,
    Help,
    History,
    ClearHistory,
    /// Zero-based index into the recent searches
    Recent(usize),
    Search(String),
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "quit" | "exit" | "/quit" | "/exit" => return Self::Quit,
            "/help" | "?" => return Self::Help,
            "/history" => return Self::History,
            "/clear" => return Self::ClearHistory,
            _ => {}
        }

        if let Some(number) = trimmed.strip_prefix('#') {
            return match number.trim().parse::<usize>() {
                Ok(n) if n >= 1 => Self::Recent(n - 1),
                _ => Self::Unknown(trimmed.to_string()),
            };
        }

        if trimmed.starts_with('/') {
            return Self::Unknown(trimmed.to_string());
        }

        // Untrimmed, so validation sees exactly what was typed
        Self::Search(line.to_string())
    }
}

fn print_help() {
    println!("{}", "Type a city name and press Enter to search.".bright_black());
    println!("{}", "  #N        search recent entry N again".bright_black());
    println!("{}", "  /history  show recent searches".bright_black());
    println!("{}", "  /clear    clear recent searches".bright_black());
    println!("{}", "  quit      exit".bright_black());
}

pub async fn run(controller: &SearchController) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("{}", "=== SkyCast ===".bright_cyan().bold());
    print_help();
    println!();

    controller.restore_last_session().await;

    loop {
        match rl.readline("search> ") {
            Ok(line) => {
                let command = ReplCommand::parse(&line);
                if matches!(command, ReplCommand::Search(_)) && !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.trim());
                }

                match command {
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Help => print_help(),
                    ReplCommand::History => {
                        if controller.recent_searches().is_empty() {
                            println!("{}", "No recent searches.".bright_black());
                        } else {
                            controller.refresh_recent_searches();
                        }
                    }
                    ReplCommand::ClearHistory => {
                        if controller.clear_history() {
                            println!("{}", "Recent searches cleared.".bright_green());
                        }
                    }
                    ReplCommand::Recent(index) => {
                        if controller.search_recent(index).await.is_none() {
                            println!(
                                "{}",
                                format!("No recent search #{}.", index + 1).yellow()
                            );
                        }
                    }
                    ReplCommand::Search(input) => {
                        // Validation failures are already shown by the controller
                        let _ = controller.submit_search(&input).await;
                    }
                    ReplCommand::Unknown(text) => {
                        println!("{}", format!("Unknown command: {}", text).yellow());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                return Err(err.into());
            }
        }
    }

    Ok(())
}
