//! Output rendering for the chat application.
//!
//! The chat view pushes every change to its transcript and loading state
//! through a [`Renderer`], so the newest message is always the last thing on
//! screen.  The default implementation writes to stdout with optional ANSI
//! styling.

use std::io::{self, Stdout, Write};

use crate::types::{Message, Role};

/// ANSI escape code for dim text (used for the loading indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for bold text (used for the header).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for blue text (used for user messages).
const ANSI_BLUE: &str = "\x1b[34m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI sequence that erases the current line and returns the cursor.
const ANSI_CLEAR_LINE: &str = "\r\x1b[2K";

/// Text shown while a reply is outstanding.
const LOADING_TEXT: &str = "...";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Show a message that was just appended to the transcript.
    fn print_message(&mut self, message: &Message);

    /// A request went out; show that a reply is pending.
    fn start_loading(&mut self);

    /// The pending request settled; remove the pending indicator.
    fn finish_loading(&mut self);

    /// The session label changed.
    fn print_session(&mut self, label: &str);

    /// The transcript is empty; show the greeting.
    fn print_welcome(&mut self);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a diagnostic.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
    loading: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
            loading: false,
        }
    }

    /// Returns true if ANSI styling is enabled.
    pub fn use_color(&self) -> bool {
        self.use_color
    }

    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }

    fn clear_loading(&mut self) {
        if self.loading {
            if self.use_color {
                print!("{ANSI_CLEAR_LINE}");
            } else {
                println!();
            }
            self.loading = false;
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn print_message(&mut self, message: &Message) {
        self.clear_loading();
        let label = speaker(message.role);
        match (message.role, self.use_color) {
            (Role::User, true) => {
                println!("{ANSI_BLUE}{ANSI_BOLD}{label}:{ANSI_RESET} {}", message.content)
            }
            (Role::Assistant, true) => {
                println!("{ANSI_BOLD}{label}:{ANSI_RESET} {}", message.content)
            }
            (_, false) => println!("{label}: {}", message.content),
        }
        self.flush();
    }

    fn start_loading(&mut self) {
        if self.use_color {
            print!("{ANSI_DIM}{LOADING_TEXT}{ANSI_RESET}");
        } else {
            print!("{LOADING_TEXT}");
        }
        self.loading = true;
        self.flush();
    }

    fn finish_loading(&mut self) {
        self.clear_loading();
        self.flush();
    }

    fn print_session(&mut self, label: &str) {
        self.clear_loading();
        if self.use_color {
            println!("{ANSI_BOLD}[{label}]{ANSI_RESET}");
        } else {
            println!("[{label}]");
        }
        self.flush();
    }

    fn print_welcome(&mut self) {
        self.clear_loading();
        if self.use_color {
            println!("{ANSI_BOLD}Welcome to Chapka{ANSI_RESET}");
        } else {
            println!("Welcome to Chapka");
        }
        println!(
            "Send a message to start a new session, or use /join <id> to continue an existing one."
        );
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        self.clear_loading();
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        // Flush the cleared loading line before writing to stderr.
        self.clear_loading();
        self.flush();
        if self.use_color {
            eprintln!("{ANSI_RED}Error:{ANSI_RESET} {error}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

fn speaker(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Chapka",
    }
}
