// Simple REPL example that echoes what you type with "typed: " prefix
//
// Set LINETERM_LOG (e.g. LINETERM_LOG=lineterm=debug) to log to stderr.

use lineterm::terminals::StdioTerminal;
use lineterm::{EditorConfig, Error, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Ok(filter) = std::env::var("LINETERM_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(std::io::stderr)
            .init();
    }

    println!("Simple REPL - Type something and press Enter");
    println!("Type 'exit' to quit");
    println!("Features: wrapped line editing, history (up/down), word navigation (Ctrl+arrows)");
    println!();

    let mut terminal = StdioTerminal::new();
    let config = EditorConfig::default()
        .with_display_width(terminal.columns().unwrap_or(lineterm::DEFAULT_DISPLAY_WIDTH))
        .with_history_capacity(50);
    let mut session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };

    loop {
        match session.read_line(&mut terminal, "> ") {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "exit" {
                    println!("Goodbye!");
                    break;
                } else if !trimmed.is_empty() {
                    println!("typed: {}", trimmed);
                }
            }
            Err(Error::Interrupted) => continue,
            Err(e) => {
                eprintln!("\nError reading input: {}", e);
                break;
            }
        }
    }
}
