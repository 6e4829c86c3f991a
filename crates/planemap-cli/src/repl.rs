//! REPL (Read-Eval-Print Loop) for planemap
//!
//! Typing a formula makes it the current map; `:at` evaluates it.

use anyhow::Result;
use planemap_core::lexer::Lexer;
use planemap_core::{Complex, ParseError, PlaneMap};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor};

use crate::diagnostic;

/// REPL prompt shown at the start of each line
const PROMPT: &str = "w = ";
/// Continuation prompt while parentheses are open
const CONTINUATION_PROMPT: &str = "  ... ";
/// History file name
const HISTORY_FILE: &str = ".planemap_history";

/// Result of processing a REPL command
#[derive(Debug, PartialEq)]
enum CommandResult {
    /// Not a command; treat the input as a formula
    Continue,
    /// Exit the REPL
    Exit,
    /// Input was handled as a command
    Handled,
}

/// The planemap REPL
pub struct Repl {
    map: PlaneMap,
    editor: Editor<(), DefaultHistory>,
}

impl Repl {
    /// Create a new REPL starting from the identity map
    pub fn new() -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if let Some(home) = home_dir() {
            let history_path = home.join(HISTORY_FILE);
            let _ = editor.load_history(&history_path);
        }

        Ok(Self {
            map: PlaneMap::identity(),
            editor,
        })
    }

    /// Run the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!("planemap v{}", planemap_core::VERSION);
        println!("Type :help for help, :quit to exit");
        println!();

        loop {
            match self.read_input() {
                Ok(Some(input)) => match self.handle_command(&input) {
                    CommandResult::Exit => break,
                    CommandResult::Handled => {}
                    CommandResult::Continue => self.set_formula(&input),
                },
                Ok(None) => {}
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error reading input: {err}");
                    break;
                }
            }
        }

        if let Some(home) = home_dir() {
            let history_path = home.join(HISTORY_FILE);
            let _ = self.editor.save_history(&history_path);
        }

        Ok(())
    }

    /// Read one formula or command, joining lines while parentheses are open
    fn read_input(&mut self) -> Result<Option<String>, ReadlineError> {
        let mut input = String::new();
        let mut prompt = PROMPT;

        loop {
            let line = self.editor.readline(prompt)?;

            if input.is_empty() && line.trim().is_empty() {
                return Ok(None);
            }

            if !input.is_empty() {
                input.push(' ');
            }
            input.push_str(&line);

            if is_complete(&input) {
                let _ = self.editor.add_history_entry(&input);
                return Ok(Some(input));
            }

            prompt = CONTINUATION_PROMPT;
        }
    }

    /// Handle REPL commands (starting with :)
    fn handle_command(&mut self, input: &str) -> CommandResult {
        let trimmed = input.trim();

        if !trimmed.starts_with(':') {
            return CommandResult::Continue;
        }

        let cmd = trimmed.trim_start_matches(':').trim();
        let (cmd_name, args) = cmd.split_once(' ').unwrap_or((cmd, ""));

        match cmd_name.to_lowercase().as_str() {
            "quit" | "q" | "exit" => CommandResult::Exit,

            "help" | "h" | "?" => {
                print_help();
                CommandResult::Handled
            }

            "at" => {
                match parse_point_args(args) {
                    Ok(z) => println!("{}", format_complex(self.map.eval(z))),
                    Err(msg) => eprintln!("{msg}"),
                }
                CommandResult::Handled
            }

            "show" => {
                println!("{}", self.map.source());
                println!("{}", self.map.expr());
                CommandResult::Handled
            }

            "tokens" => {
                let source = if args.trim().is_empty() {
                    self.map.source().to_string()
                } else {
                    args.trim().to_string()
                };
                show_tokens(&source);
                CommandResult::Handled
            }

            "reset" => {
                self.map = PlaneMap::identity();
                println!("w = z");
                CommandResult::Handled
            }

            _ => {
                eprintln!("Unknown command: :{cmd_name}");
                eprintln!("Type :help for available commands");
                CommandResult::Handled
            }
        }
    }

    /// Replace the current map; a rejected formula leaves it unchanged
    fn set_formula(&mut self, input: &str) {
        let source = input.trim();
        match PlaneMap::parse(source) {
            Ok(map) => {
                println!("w(0) = {}", format_complex(map.eval(Complex::ZERO)));
                self.map = map;
            }
            Err(err) => eprintln!("{}", diagnostic::render(source, &err)),
        }
    }
}

/// Check whether every '(' has been closed
fn is_complete(input: &str) -> bool {
    let mut depth = 0i32;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    // Extra ')' is complete input; the parser reports it
    depth <= 0
}

/// Parse `:at` arguments: `re im`, `re,im` or a lone real part
fn parse_point_args(args: &str) -> Result<Complex, String> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let number = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| format!("Not a number: {s}"))
    };

    match parts.as_slice() {
        [re] => Ok(Complex::real(number(re)?)),
        [re, im] => Ok(Complex::new(number(re)?, number(im)?)),
        _ => Err("Usage: :at <re> [im]".to_string()),
    }
}

fn format_complex(c: Complex) -> String {
    if c.im < 0.0 || (c.im == 0.0 && c.im.is_sign_negative()) {
        format!("{} - {}i", c.re, -c.im)
    } else {
        format!("{} + {}i", c.re, c.im)
    }
}

fn show_tokens(source: &str) {
    match Lexer::tokenize(source) {
        Ok(tokens) => {
            for token in tokens {
                println!("{:>8}  {:?}", token.span.to_string(), token.kind);
            }
        }
        Err(err) => eprintln!("{}", diagnostic::render(source, &ParseError::from(err))),
    }
}

fn print_help() {
    println!(
        r"planemap REPL Commands:
  :help, :h, :?     Show this help message
  :quit, :q, :exit  Exit the REPL
  :at <re> [im]     Evaluate the current map at a point
  :show             Show the current formula and its expression tree
  :tokens [formula] Show the tokens of a formula (default: current)
  :reset            Go back to the identity map w = z

Anything else is read as a new formula, for example:
  exp(i*z) / (1 + z*z)
  sin(x) * cos(y)

Variables: z, x = Re(z), y = Im(z), and the constant i.
Functions: sin, cos, exp. Operators: + - * / and unary minus.
A line with an open '(' continues on the next line."
    );
}

/// Get the user's home directory
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_complete_balanced() {
        assert!(is_complete(""));
        assert!(is_complete("z + 1"));
        assert!(is_complete("sin(z) * (1 + z)"));
    }

    #[test]
    fn test_is_complete_unbalanced() {
        assert!(!is_complete("(1 + 2"));
        assert!(!is_complete("exp(sin(z)"));
        assert!(is_complete("1 + 2)"));
    }

    #[test]
    fn test_parse_point_args() {
        assert_eq!(parse_point_args("1 2").unwrap(), Complex::new(1.0, 2.0));
        assert_eq!(parse_point_args("1, -2").unwrap(), Complex::new(1.0, -2.0));
        assert_eq!(parse_point_args("0.5").unwrap(), Complex::real(0.5));
        assert!(parse_point_args("").is_err());
        assert!(parse_point_args("1 2 3").is_err());
        assert!(parse_point_args("a b").is_err());
    }

    #[test]
    fn test_format_complex() {
        assert_eq!(format_complex(Complex::new(1.0, 2.0)), "1 + 2i");
        assert_eq!(format_complex(Complex::new(1.5, -0.5)), "1.5 - 0.5i");
        assert_eq!(format_complex(Complex::new(-1.0, -0.0)), "-1 - 0i");
    }
}
