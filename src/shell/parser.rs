//! Line parser for the interactive shell.
//!
//! One command per line, keyword first, case-insensitive. Fields that may contain spaces
//! (starch names, file paths) are separated with `|`:
//!
//! ```text
//! ADD Garlic Knots | 🧄 | ./knots.png
//! EDIT 12 Garlic Knots | 🥖 | -
//! SLOT tuber 3
//! DROP 12 Noodle 16
//! ```

use crate::bracket::SlotRef;
use crate::export::ExportFormat;
use crate::state::Tab;
use log::trace;

/// What to do with a starch's image in ADD/EDIT.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageArg {
    /// Field omitted: no image for ADD, current image kept for EDIT.
    #[default]
    Keep,
    /// `-` or `none`: drop the image.
    Clear,
    /// Load this file as the new image.
    Load(String),
}

/// Starch fields as typed on an ADD/EDIT line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarchArgs {
    pub name: String,
    pub emoji: Option<String>,
    pub image: ImageArg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Tab(Tab),
    Show,
    Pool { query: Option<String> },
    Add(StarchArgs),
    Edit { id: String, fields: StarchArgs },
    Delete { id: String, confirmed: bool },
    Pick(String),
    Slot(SlotRef),
    Drop { id: String, slot: SlotRef },
    /// Place directly, overwriting the slot and moving the starch if already seeded.
    Assign { id: String, slot: SlotRef },
    /// Empty a slot.
    Remove(SlotRef),
    Cancel,
    Auto,
    Shuffle,
    Clear { confirmed: bool },
    Reset { confirmed: bool },
    Name(String),
    Export { format: ExportFormat, path: Option<String> },
    Import(String),
    Status,
    Quit,
    /// Blank line.
    Empty,
    /// Recognized keyword with bad arguments; carries the usage hint.
    Invalid(String),
    Unknown(String),
}

pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, raw: &str) -> ShellCommand {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ShellCommand::Empty;
        }
        let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.trim()),
            None => (trimmed, ""),
        };
        let keyword = keyword.to_ascii_uppercase();
        trace!("Parsing keyword '{}' with args '{}'", keyword, rest);

        match keyword.as_str() {
            "HELP" | "?" => ShellCommand::Help,
            "TAB" => match rest.parse::<Tab>() {
                Ok(tab) => ShellCommand::Tab(tab),
                Err(e) => ShellCommand::Invalid(format!("{}. Usage: TAB <pool|seeding|export>", e)),
            },
            "SHOW" | "LOOK" => ShellCommand::Show,
            "POOL" | "LIST" => ShellCommand::Pool {
                query: non_empty(rest),
            },
            "ADD" => match parse_starch_args(rest) {
                Some(fields) => ShellCommand::Add(fields),
                None => ShellCommand::Invalid("Usage: ADD <name> [| emoji] [| image-path]".into()),
            },
            "EDIT" => {
                let usage = "Usage: EDIT <id> <name> [| emoji] [| image-path or -]";
                let Some((id, tail)) = split_word(rest) else {
                    return ShellCommand::Invalid(usage.into());
                };
                match parse_starch_args(tail) {
                    Some(fields) => ShellCommand::Edit {
                        id: id.to_string(),
                        fields,
                    },
                    None => ShellCommand::Invalid(usage.into()),
                }
            }
            "DELETE" | "DEL" | "RM" => {
                let mut words = rest.split_whitespace();
                match (words.next(), words.next(), words.next()) {
                    (Some(id), confirm, None) if confirm.map_or(true, is_yes) => ShellCommand::Delete {
                        id: id.to_string(),
                        confirmed: confirm.is_some(),
                    },
                    _ => ShellCommand::Invalid("Usage: DELETE <id> [YES]".into()),
                }
            }
            "PICK" | "SELECT" => match single_word(rest) {
                Some(id) => ShellCommand::Pick(id.to_string()),
                None => ShellCommand::Invalid("Usage: PICK <starch-id>".into()),
            },
            "SLOT" => {
                let words: Vec<&str> = rest.split_whitespace().collect();
                match words.as_slice() {
                    [region, seed] => match parse_slot(region, seed) {
                        Ok(slot) => ShellCommand::Slot(slot),
                        Err(e) => ShellCommand::Invalid(e),
                    },
                    _ => ShellCommand::Invalid("Usage: SLOT <region> <seed 1-16>".into()),
                }
            }
            "DROP" => {
                let words: Vec<&str> = rest.split_whitespace().collect();
                match words.as_slice() {
                    [id, region, seed] => match parse_slot(region, seed) {
                        Ok(slot) => ShellCommand::Drop {
                            id: id.to_string(),
                            slot,
                        },
                        Err(e) => ShellCommand::Invalid(e),
                    },
                    _ => ShellCommand::Invalid("Usage: DROP <starch-id> <region> <seed 1-16>".into()),
                }
            }
            "ASSIGN" => {
                let words: Vec<&str> = rest.split_whitespace().collect();
                match words.as_slice() {
                    [id, region, seed] => match parse_slot(region, seed) {
                        Ok(slot) => ShellCommand::Assign {
                            id: id.to_string(),
                            slot,
                        },
                        Err(e) => ShellCommand::Invalid(e),
                    },
                    _ => ShellCommand::Invalid("Usage: ASSIGN <starch-id> <region> <seed 1-16>".into()),
                }
            }
            "REMOVE" => {
                let words: Vec<&str> = rest.split_whitespace().collect();
                match words.as_slice() {
                    [region, seed] => match parse_slot(region, seed) {
                        Ok(slot) => ShellCommand::Remove(slot),
                        Err(e) => ShellCommand::Invalid(e),
                    },
                    _ => ShellCommand::Invalid("Usage: REMOVE <region> <seed 1-16>".into()),
                }
            }
            "CANCEL" => ShellCommand::Cancel,
            "AUTO" => ShellCommand::Auto,
            "SHUFFLE" => ShellCommand::Shuffle,
            "CLEAR" => match confirmation(rest) {
                Some(confirmed) => ShellCommand::Clear { confirmed },
                None => ShellCommand::Invalid("Usage: CLEAR [YES]".into()),
            },
            "RESET" => match confirmation(rest) {
                Some(confirmed) => ShellCommand::Reset { confirmed },
                None => ShellCommand::Invalid("Usage: RESET [YES]".into()),
            },
            "NAME" | "RENAME" => match non_empty(rest) {
                Some(name) => ShellCommand::Name(name),
                None => ShellCommand::Invalid("Usage: NAME <tournament name>".into()),
            },
            "EXPORT" => parse_export(rest),
            "IMPORT" => match non_empty(rest) {
                Some(path) => ShellCommand::Import(path),
                None => ShellCommand::Invalid("Usage: IMPORT <path>".into()),
            },
            "STATUS" => ShellCommand::Status,
            "QUIT" | "EXIT" | "Q" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(keyword),
        }
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn is_yes(word: &str) -> bool {
    word.eq_ignore_ascii_case("YES") || word.eq_ignore_ascii_case("Y")
}

/// `""` → unconfirmed, `YES` → confirmed, anything else is malformed.
fn confirmation(rest: &str) -> Option<bool> {
    match rest.trim() {
        "" => Some(false),
        w if is_yes(w) => Some(true),
        _ => None,
    }
}

fn single_word(rest: &str) -> Option<&str> {
    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some(w), None) => Some(w),
        _ => None,
    }
}

fn split_word(rest: &str) -> Option<(&str, &str)> {
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    Some(match rest.split_once(char::is_whitespace) {
        Some((w, tail)) => (w, tail.trim()),
        None => (rest, ""),
    })
}

fn parse_slot(region: &str, seed: &str) -> Result<SlotRef, String> {
    let seed: usize = seed
        .trim_start_matches('#')
        .parse()
        .map_err(|_| format!("'{}' is not a seed number (1-16)", seed))?;
    SlotRef::parse(region, seed).map_err(|e| e.to_string())
}

fn parse_starch_args(rest: &str) -> Option<StarchArgs> {
    let mut parts = rest.split('|').map(str::trim);
    let name = parts.next().filter(|n| !n.is_empty())?.to_string();
    let emoji = parts.next().and_then(non_empty);
    let image = match parts.next() {
        None | Some("") => ImageArg::Keep,
        Some(p) if p == "-" || p.eq_ignore_ascii_case("none") => ImageArg::Clear,
        Some(p) => ImageArg::Load(p.to_string()),
    };
    if parts.next().is_some() {
        return None;
    }
    Some(StarchArgs { name, emoji, image })
}

fn parse_export(rest: &str) -> ShellCommand {
    let usage = "Usage: EXPORT [full|matchups] [path]";
    let Some((first, tail)) = split_word(rest) else {
        return ShellCommand::Export {
            format: ExportFormat::Full,
            path: None,
        };
    };
    match first.parse::<ExportFormat>() {
        Ok(format) => ShellCommand::Export {
            format,
            path: non_empty(tail),
        },
        // Bare path.
        Err(_) if first.contains(['/', '.']) => ShellCommand::Export {
            format: ExportFormat::Full,
            path: non_empty(rest),
        },
        Err(e) => ShellCommand::Invalid(format!("{}. {}", e, usage)),
    }
}
