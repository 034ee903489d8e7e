// Fri Oct 16 2026 - Alex

pub mod cli;

pub use cli::{Args, Command, CommandHandler};

use colored::Colorize;

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[!]".red(), message);
}
