//! Counter view

use std::fmt::Write as _;

/// What the user can do from the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Plus,
    Minus,
    Quit,
}

impl Command {
    /// Parse one line of input; unknown input yields `None`
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "+" | "plus" | "p" => Some(Self::Plus),
            "-" | "minus" | "m" => Some(Self::Minus),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub fn counter_view(name: &str, count: i64, route: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "idb name {}", name);
    let _ = writeln!(out, "route    {}", route);
    let _ = writeln!(out);
    let _ = writeln!(out, "Clicked: {} times", count);
    let _ = writeln!(out);
    let _ = writeln!(out, "  [+] Plus");
    let _ = write!(out, "  [-] Minus");
    out
}
