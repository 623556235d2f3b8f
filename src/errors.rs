//! CDR error taxonomy.
//!
//! # Responsibilities
//! - Define the closed set of error kinds a validation stage may report
//! - Map each kind to its fixed title and URN code
//! - Build and extend error lists in evaluation order
//!
//! # Design Decisions
//! - No free-form codes: every entry is created from an `ErrorKind`
//! - Lists are append-only and never deduplicated
//! - Adding a kind means adding a variant and its row in `ErrorKind::descriptor`

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error kinds defined by the Consumer Data Standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingRequiredField,
    MissingRequiredHeader,
    InvalidField,
    InvalidHeader,
    InvalidVersion,
    UnsupportedVersion,
    ConsentInvalid,
    ResourceNotFound,
    ResourceNotImplemented,
    InvalidEnergyAccount,
    InvalidBankAccount,
    InvalidPage,
    InvalidPageSize,
}

impl ErrorKind {
    /// Every kind, in table order.
    pub const ALL: [ErrorKind; 13] = [
        ErrorKind::MissingRequiredField,
        ErrorKind::MissingRequiredHeader,
        ErrorKind::InvalidField,
        ErrorKind::InvalidHeader,
        ErrorKind::InvalidVersion,
        ErrorKind::UnsupportedVersion,
        ErrorKind::ConsentInvalid,
        ErrorKind::ResourceNotFound,
        ErrorKind::ResourceNotImplemented,
        ErrorKind::InvalidEnergyAccount,
        ErrorKind::InvalidBankAccount,
        ErrorKind::InvalidPage,
        ErrorKind::InvalidPageSize,
    ];

    /// (title, code) row for this kind.
    const fn descriptor(self) -> (&'static str, &'static str) {
        match self {
            ErrorKind::MissingRequiredField => (
                "Missing Required Field",
                "urn:au-cds:error:cds-all:Field/Missing",
            ),
            ErrorKind::MissingRequiredHeader => (
                "Missing Required Header",
                "urn:au-cds:error:cds-all:Header/Missing",
            ),
            ErrorKind::InvalidField => ("Invalid Field", "urn:au-cds:error:cds-all:Field/Invalid"),
            ErrorKind::InvalidHeader => (
                "Invalid Header",
                "urn:au-cds:error:cds-all:Header/Invalid",
            ),
            ErrorKind::InvalidVersion => (
                "Invalid Version",
                "urn:au-cds:error:cds-all:Header/InvalidVersion",
            ),
            ErrorKind::UnsupportedVersion => (
                "Unsupported Version",
                "urn:au-cds:error:cds-all:Header/UnsupportedVersion",
            ),
            ErrorKind::ConsentInvalid => (
                "Invalid Consent Arrangement",
                "urn:au-cds:error:cds-all:Authorisation/InvalidConsent",
            ),
            ErrorKind::ResourceNotFound => (
                "Resource Not Found",
                "urn:au-cds:error:cds-all:Resource/NotFound",
            ),
            ErrorKind::ResourceNotImplemented => (
                "Resource Not Implemented",
                "urn:au-cds:error:cds-all:Resource/NotImplemented",
            ),
            ErrorKind::InvalidEnergyAccount => (
                "Invalid Energy Account",
                "urn:au-cds:error:cds-energy:Authorisation/InvalidEnergyAccount",
            ),
            ErrorKind::InvalidBankAccount => (
                "Invalid Banking Account",
                "urn:au-cds:error:cds-banking:Authorisation/InvalidBankingAccount",
            ),
            ErrorKind::InvalidPage => ("Invalid Page", "urn:au-cds:error:cds-all:Field/InvalidPage"),
            ErrorKind::InvalidPageSize => (
                "Invalid Page Size",
                "urn:au-cds:error:cds-all:Field/InvalidPageSize",
            ),
        }
    }

    /// Human-readable title.
    pub const fn title(self) -> &'static str {
        self.descriptor().0
    }

    /// URN error code.
    pub const fn code(self) -> &'static str {
        self.descriptor().1
    }
}

/// A single entry of an error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub code: String,
    pub title: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ErrorEntry {
    pub fn new(kind: ErrorKind, detail: impl Into<String>, meta: Option<Value>) -> Self {
        Self {
            code: kind.code().to_string(),
            title: kind.title().to_string(),
            detail: detail.into(),
            meta,
        }
    }
}

/// Response body for every rejected request: `{ "errors": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorList {
    pub errors: Vec<ErrorEntry>,
}

impl ErrorList {
    /// One-element list.
    pub fn single(kind: ErrorKind, detail: impl Into<String>) -> Self {
        build_error(kind, detail, None, None)
    }

    /// Append an entry without meta.
    pub fn push(&mut self, kind: ErrorKind, detail: impl Into<String>) {
        self.errors.push(ErrorEntry::new(kind, detail, None));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Codes in insertion order, mostly useful for logging.
    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.code.as_str()).collect()
    }
}

/// Append an entry for `kind` to `existing`, or start a new list.
pub fn build_error(
    kind: ErrorKind,
    detail: impl Into<String>,
    existing: Option<ErrorList>,
    meta: Option<Value>,
) -> ErrorList {
    let mut list = existing.unwrap_or_default();
    list.errors.push(ErrorEntry::new(kind, detail, meta));
    list
}
