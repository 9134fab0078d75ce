//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for report identifiers. Each type
//! ensures type safety and provides validation for format compliance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Report identifier newtype wrapper
///
/// Represents a unique identifier for a generated report. Backed by a UUID v4
/// assigned at request time.
///
/// # Examples
///
/// ```
/// use medreport::domain::ids::ReportId;
/// use std::str::FromStr;
///
/// let id = ReportId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
/// assert_eq!(id.to_string(), "7d44b88c-4199-4bad-97dc-d78268e01398");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(Uuid);

impl ReportId {
    /// Creates a new random ReportId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the first 8 hex characters of the id
    ///
    /// Used as a short disambiguating suffix in artifact filenames.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReportId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid report id '{s}': {e}"))
    }
}

/// Owner identifier newtype wrapper
///
/// Represents the owner of a report. Owners are opaque non-empty strings;
/// resolving them to actual user accounts is the transport layer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates a new OwnerId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Owner id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the owner id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OwnerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for OwnerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_id_roundtrip() {
        let id = ReportId::new();
        let parsed = ReportId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_report_id_rejects_garbage() {
        assert!(ReportId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_report_id_short_length() {
        let id = ReportId::new();
        assert_eq!(id.short().len(), 8);
    }

    #[test]
    fn test_owner_id_valid() {
        let owner = OwnerId::new("dr-house").unwrap();
        assert_eq!(owner.as_str(), "dr-house");
    }

    #[test]
    fn test_owner_id_rejects_empty() {
        assert!(OwnerId::new("").is_err());
        assert!(OwnerId::new("   ").is_err());
    }

    #[test]
    fn test_owner_id_display() {
        let owner = OwnerId::new("front-desk").unwrap();
        assert_eq!(owner.to_string(), "front-desk");
    }
}
