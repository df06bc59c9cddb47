//! CSV roster upload.
//!
//! A file is accepted when its MIME type is `text/csv` or its name ends with
//! `.csv`. The first row is the header; name and email columns are located
//! by header name.

use crate::config::RosterConfig;
use crate::error::RosterError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const CSV_MIME: &str = "text/csv";

/// Check a candidate file before reading it.
pub fn validate_csv_upload(name: &str, mime: Option<&str>) -> Result<(), RosterError> {
    if mime == Some(CSV_MIME) || name.ends_with(".csv") {
        Ok(())
    } else {
        Err(RosterError::InvalidFileType {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Roster {
    source_name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    name_column: Option<usize>,
    email_column: Option<usize>,
}

impl Roster {
    pub fn parse<R: Read>(
        source_name: &str,
        reader: R,
        config: &RosterConfig,
    ) -> Result<Self, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = csv_reader.records();
        let headers: Vec<String> = match records.next() {
            Some(header) => header?.iter().map(str::to_string).collect(),
            None => return Err(RosterError::Empty),
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(record.iter().map(str::to_string).collect());
        }

        let name_column = find_column(&headers, &config.name_columns);
        let email_column = find_column(&headers, &config.email_columns);
        if email_column.is_none() {
            log::warn!("{source_name}: no email column among {:?}", headers);
        }
        log::info!("Parsed roster {source_name}: {} rows", rows.len());

        Ok(Self {
            source_name: source_name.to_string(),
            headers,
            rows,
            name_column,
            email_column,
        })
    }

    pub fn from_path(path: &Path, config: &RosterConfig) -> Result<Self, RosterError> {
        let name = file_name(path);
        validate_csv_upload(&name, None)?;
        Self::parse(&name, File::open(path)?, config)
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first data row paired with its headers. Missing trailing cells
    /// show as empty strings.
    pub fn sample_row(&self) -> Option<Vec<(String, String)>> {
        let row = self.rows.first()?;
        Some(
            self.headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect(),
        )
    }

    /// Rows that carry an email address.
    pub fn recipients(&self) -> Vec<Recipient> {
        let Some(email_column) = self.email_column else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| {
                let email = row.get(email_column).filter(|e| !e.is_empty())?;
                let name = self
                    .name_column
                    .and_then(|c| row.get(c))
                    .cloned()
                    .unwrap_or_default();
                Some(Recipient {
                    name,
                    email: email.clone(),
                })
            })
            .collect()
    }

    pub fn first_recipient(&self) -> Option<Recipient> {
        self.recipients().into_iter().next()
    }
}

fn find_column(headers: &[String], candidates: &[String]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(candidate.trim()))
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// The currently selected roster. A rejected upload leaves the previous
/// selection in place.
#[derive(Debug, Default)]
pub struct RosterSlot {
    current: Option<Roster>,
}

impl RosterSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Roster> {
        self.current.as_ref()
    }

    pub fn offer<R: Read>(
        &mut self,
        name: &str,
        mime: Option<&str>,
        reader: R,
        config: &RosterConfig,
    ) -> Result<&Roster, RosterError> {
        validate_csv_upload(name, mime)?;
        let roster = Roster::parse(name, reader, config)?;
        Ok(&*self.current.insert(roster))
    }

    pub fn offer_path(
        &mut self,
        path: &Path,
        config: &RosterConfig,
    ) -> Result<&Roster, RosterError> {
        let roster = Roster::from_path(path, config)?;
        Ok(&*self.current.insert(roster))
    }
}
