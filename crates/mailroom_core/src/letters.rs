//! Thank-you letter templates, rendering and persistence.
//!
//! # Responsibility
//! - Hold the two fixed letter templates.
//! - Substitute `ThankYouFields` into a template.
//! - Persist rendered letters to a per-donor directory.
//!
//! # Invariants
//! - Every `FsLetterWriter::save` call produces a new file; existing letters
//!   are never overwritten.
//! - Write failures are returned to the caller unchanged; no retry or rollback.

use crate::model::display::{format_currency, human_date};
use crate::model::donor::ThankYouFields;
use chrono::Local;
use log::info;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Letter for the most recent single donation.
pub const THANK_YOU_TEMPLATE: &str = "{date}

Dear {first} {last},
Thank you for your support to our organization and your generous donation of {amount}.

Your giving helps us carry our mission forward.
Sincerely,
-The Team
";

/// Letter summarizing lifetime giving since the donor was created.
pub const THANK_YOU_TEMPLATE_CUMULATIVE: &str = "{date}

Dear {first} {last},
Since {created}, you have generously donated {amount} to our organization. Thank you for your support.

Your continued giving makes our good work possible.
Sincerely,
-The Team
";

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(date|first|last|amount|created)\}").expect("valid placeholder regex")
});

/// Fills template placeholders from `fields` in a single pass.
///
/// `{amount}` renders as dollars with thousands separators and two decimals.
/// `{created}` renders empty when the fields carry no creation date.
pub fn render_letter(template: &str, fields: &ThankYouFields) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "date" => fields.date.clone(),
            "first" => fields.first.clone(),
            "last" => fields.last.clone(),
            "amount" => format_currency(fields.amount),
            _ => fields.created.clone().unwrap_or_default(),
        })
        .into_owned()
}

/// Letter persistence failure.
#[derive(Debug)]
pub enum LetterError {
    CreateDir { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl Display for LetterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { path, source } => write!(
                f,
                "failed to create letter directory `{}`: {source}",
                path.display()
            ),
            Self::Write { path, source } => {
                write!(f, "failed to write letter `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for LetterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } | Self::Write { source, .. } => Some(source),
        }
    }
}

/// Destination for rendered thank-you letters.
pub trait LetterWriter {
    /// Persists one letter and returns where it was stored.
    fn save(&self, first: &str, last: &str, text: &str) -> Result<PathBuf, LetterError>;
}

/// Writes letters under `<root>/<last>_<first>/<last>_<first>_<date>.txt`.
#[derive(Debug, Clone)]
pub struct FsLetterWriter {
    root: PathBuf,
}

impl FsLetterWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LetterWriter for FsLetterWriter {
    fn save(&self, first: &str, last: &str, text: &str) -> Result<PathBuf, LetterError> {
        let stem = format!("{}_{}", path_safe(last), path_safe(first));
        let directory = self.root.join(&stem);
        fs::create_dir_all(&directory).map_err(|source| LetterError::CreateDir {
            path: directory.clone(),
            source,
        })?;

        let base_name = format!("{stem}_{}", human_date(&Local::now()));
        let mut attempt = 1_u32;
        loop {
            let file_name = if attempt == 1 {
                format!("{base_name}.txt")
            } else {
                format!("{base_name}_{attempt}.txt")
            };
            let path = directory.join(file_name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(text.as_bytes())
                        .map_err(|source| LetterError::Write {
                            path: path.clone(),
                            source,
                        })?;
                    info!(
                        "event=letter_saved module=letters status=ok attempt={}",
                        attempt
                    );
                    return Ok(path);
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(LetterError::Write { path, source }),
            }
        }
    }
}

fn path_safe(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}
