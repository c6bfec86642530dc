//! Portal records and dataset loading.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review state of a submitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Pending",
            ReviewStatus::Approved => "Approved",
            ReviewStatus::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A document submitted by a citizen or business for review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub applicant: String,
    pub department: String,
    pub category: String,
    pub submitted: NaiveDate,
    /// Scanned page count, unknown for electronic submissions.
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub status: ReviewStatus,
}

impl Document {
    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub members: u32,
    pub created: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub role: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub last_login: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub head: String,
    #[serde(default)]
    pub staff: u32,
    #[serde(default)]
    pub location: String,
}

/// Every table the portal shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalData {
    pub documents: Vec<Document>,
    pub roles: Vec<Role>,
    pub users: Vec<User>,
    pub departments: Vec<Department>,
}

impl PortalData {
    /// Load and validate a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a dataset from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let data: PortalData = serde_json::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    /// Row ids must be unique within each table, since selection is keyed by
    /// id.
    pub fn validate(&self) -> Result<()> {
        check_unique("documents", self.documents.iter().map(|d| d.id.as_str()))?;
        check_unique("roles", self.roles.iter().map(|r| r.id.as_str()))?;
        check_unique("users", self.users.iter().map(|u| u.id.as_str()))?;
        check_unique("departments", self.departments.iter().map(|d| d.id.as_str()))?;
        Ok(())
    }

    /// Number of documents still awaiting review.
    pub fn pending_reviews(&self) -> usize {
        self.documents.iter().filter(|d| d.is_pending()).count()
    }

    pub fn document_mut(&mut self, id: &str) -> Option<&mut Document> {
        self.documents.iter_mut().find(|d| d.id == id)
    }

    pub fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Remove a role. Returns the removed record.
    pub fn remove_role(&mut self, id: &str) -> Option<Role> {
        let index = self.roles.iter().position(|r| r.id == id)?;
        Some(self.roles.remove(index))
    }
}

fn check_unique<'a>(table: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            bail!("{} contains a record with an empty id", table);
        }
        if !seen.insert(id) {
            bail!("{} contains duplicate id '{}'", table, id);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const DATASET: &str = r#"{
        "documents": [
            {"id": "DOC-1", "title": "Building permit", "applicant": "A. Ruiz",
             "department": "Planning", "category": "Permit", "submitted": "2024-03-02",
             "pages": 12},
            {"id": "DOC-2", "title": "Tax appeal", "applicant": "B. Okafor",
             "department": "Revenue", "category": "Appeal", "submitted": "2024-02-17",
             "status": "approved"}
        ],
        "roles": [
            {"id": "ROLE-1", "name": "Reviewer", "members": 4, "created": "2023-01-09"}
        ]
    }"#;

    #[test]
    fn test_parse_dataset() {
        let data = PortalData::parse(DATASET).unwrap();
        assert_eq!(data.documents.len(), 2);
        assert_eq!(data.documents[0].status, ReviewStatus::Pending);
        assert_eq!(data.documents[0].pages, Some(12));
        assert_eq!(data.documents[1].pages, None);
        assert_eq!(data.roles[0].description, "");
        assert!(data.users.is_empty());
        assert_eq!(data.pending_reviews(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();

        let data = PortalData::load(file.path()).unwrap();
        assert_eq!(data.documents[1].id, "DOC-2");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"departments": [
            {"id": "D1", "name": "Planning", "head": "X"},
            {"id": "D1", "name": "Revenue", "head": "Y"}
        ]}"#;
        let err = PortalData::parse(json).unwrap_err();
        assert!(err.to_string().contains("duplicate id 'D1'"));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let json = r#"{"roles": [{"id": "R", "name": "N", "created": "yesterday"}]}"#;
        assert!(PortalData::parse(json).is_err());
    }

    #[test]
    fn test_mutators() {
        let mut data = PortalData::parse(DATASET).unwrap();
        data.document_mut("DOC-1").unwrap().status = ReviewStatus::Rejected;
        assert_eq!(data.pending_reviews(), 0);

        assert!(data.remove_role("ROLE-1").is_some());
        assert!(data.remove_role("ROLE-1").is_none());
    }
}
