//! Interactive chat application for the Chapka service.
//!
//! This binary provides a REPL over a [`ChatView`]: each line typed is sent to
//! the service and the reply is printed underneath.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a service on localhost:8000
//! chapka-chat
//!
//! # Point at another server and continue session 12
//! chapka-chat --server http://chat.example.com:8000 --session 12
//!
//! # Disable colors (useful for piping output)
//! chapka-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/join <id>` - Continue an existing session
//! - `/reset` - Start a new session
//! - `/sessions` - List sessions on the server
//! - `/history [id]` - Show the server's history for a session
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use chapka::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatView, PlainTextRenderer, Renderer, help_text,
    parse_command,
};
use chapka::{Chapka, SessionId};

/// Main entry point for the chapka-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("chapka-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let client = Chapka::with_options(Some(config.server_url.as_str()), Some(config.timeout))?;
    let mut view = ChatView::new(client);
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    println!("Chapka Chat (server: {})", view.backend().base_url());
    println!("Type /help for commands, /quit to exit\n");
    view.join(&config.session_id.to_string(), &mut renderer);

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Join(id) => {
                            view.set_join_input(id);
                            view.submit_join(&mut renderer);
                        }
                        ChatCommand::Reset => {
                            view.set_join_input("");
                            view.submit_join(&mut renderer);
                        }
                        ChatCommand::Sessions => {
                            print_sessions(&view, &mut renderer).await;
                        }
                        ChatCommand::History(id) => {
                            let id = id.unwrap_or_else(|| view.session_id());
                            print_history(&view, id, &mut renderer).await;
                        }
                        ChatCommand::Status => {
                            print_status(&view);
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                view.set_input(line);
                view.submit_message(&mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt clears the line
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

async fn print_sessions(view: &ChatView<Chapka>, renderer: &mut PlainTextRenderer) {
    match view.backend().sessions().await {
        Ok(sessions) if sessions.is_empty() => renderer.print_info("No sessions on the server."),
        Ok(sessions) => {
            println!("    Sessions:");
            for session in sessions {
                println!("      {:>6}  {}", session.session_id.get(), first_line(&session.prompt));
            }
        }
        Err(err) => renderer.print_error(&format!("Failed to list sessions: {}", err)),
    }
}

async fn print_history(view: &ChatView<Chapka>, id: SessionId, renderer: &mut PlainTextRenderer) {
    if id.is_new() {
        renderer.print_info("No session yet; send a message or /join <id> first.");
        return;
    }
    match view.backend().session_history(id).await {
        Ok(entries) => {
            println!("    History for session {}:", id);
            for entry in entries {
                println!("      {}: {}", entry.role, entry.content);
            }
        }
        Err(err) if err.is_not_found() => {
            renderer.print_info(&format!("Session {} is not known to the server.", id))
        }
        Err(err) => renderer.print_error(&format!("Failed to fetch history: {}", err)),
    }
}

fn print_status(view: &ChatView<Chapka>) {
    println!("    {}", view.session_label());
    println!("      Server: {}", view.backend().base_url());
    println!("      Messages: {}", view.messages().len());
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
