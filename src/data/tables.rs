//! Static table definitions: columns and row actions for each portal table.

use std::fmt;
use std::str::FromStr;

use crate::grid::{CellValue, ColumnModel, ColumnSpec, ColumnWidth, GridError, RowAction, SortDirection};

use super::model::{Department, Document, Role, User};

/// Names of the row actions offered by the portal tables.
pub mod action {
    pub const VIEW: &str = "view";
    pub const APPROVE: &str = "approve";
    pub const REJECT: &str = "reject";
    pub const DELETE: &str = "delete";
    pub const ACTIVATE: &str = "activate";
    pub const DEACTIVATE: &str = "deactivate";
}

/// Id of the checkbox column in every selectable table.
pub const SELECT_COLUMN: &str = "select";

/// One of the portal's tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Documents,
    Roles,
    Users,
    Departments,
}

impl Table {
    pub const ALL: [Table; 4] = [Table::Documents, Table::Roles, Table::Users, Table::Departments];

    /// Cycle to the next table.
    pub fn next(self) -> Self {
        match self {
            Table::Documents => Table::Roles,
            Table::Roles => Table::Users,
            Table::Users => Table::Departments,
            Table::Departments => Table::Documents,
        }
    }

    /// Cycle to the previous table.
    pub fn prev(self) -> Self {
        match self {
            Table::Documents => Table::Departments,
            Table::Roles => Table::Documents,
            Table::Users => Table::Roles,
            Table::Departments => Table::Users,
        }
    }

    /// Display label, used for tabs and block titles.
    pub fn label(&self) -> &'static str {
        match self {
            Table::Documents => "Documents",
            Table::Roles => "Roles",
            Table::Users => "Users",
            Table::Departments => "Departments",
        }
    }

    /// Lowercase key used on the command line, in settings and in exports.
    pub fn key(&self) -> &'static str {
        match self {
            Table::Documents => "documents",
            Table::Roles => "roles",
            Table::Users => "users",
            Table::Departments => "departments",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Table::Documents => 0,
            Table::Roles => 1,
            Table::Users => 2,
            Table::Departments => 3,
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            Table::Documents => "No documents awaiting review",
            Table::Roles => "No roles defined",
            Table::Users => "No users found",
            Table::Departments => "No departments found",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Table {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown table '{}' (expected one of: documents, roles, users, departments)",
                    s
                )
            })
    }
}

fn optional_count(value: &CellValue, unknown: &str) -> String {
    if value.is_empty() {
        unknown.to_string()
    } else {
        value.to_string()
    }
}

pub fn document_id(doc: &Document) -> String {
    doc.id.clone()
}

pub fn document_columns() -> Result<ColumnModel<Document>, GridError> {
    ColumnModel::new(vec![
        ColumnSpec::selection(SELECT_COLUMN),
        ColumnSpec::new("title", "Title", |d: &Document| d.title.as_str().into())
            .sortable()
            .width(ColumnWidth::Fill(3)),
        ColumnSpec::new("applicant", "Applicant", |d: &Document| d.applicant.as_str().into())
            .sortable()
            .hideable()
            .width(ColumnWidth::Fill(2)),
        ColumnSpec::new("department", "Department", |d: &Document| d.department.as_str().into())
            .sortable()
            .hideable()
            .width(ColumnWidth::Fill(2)),
        ColumnSpec::new("category", "Category", |d: &Document| d.category.as_str().into())
            .sortable()
            .hideable(),
        ColumnSpec::new("submitted", "Submitted", |d: &Document| d.submitted.into())
            .sortable()
            .header_with(|direction| match direction {
                Some(SortDirection::Ascending) => "Submitted (oldest)".to_string(),
                Some(SortDirection::Descending) => "Submitted (newest)".to_string(),
                None => "Submitted".to_string(),
            })
            .width(ColumnWidth::Min(12)),
        ColumnSpec::new("pages", "Pages", |d: &Document| d.pages.into())
            .sortable()
            .hideable()
            .cell(|value, _| optional_count(value, "-"))
            .width(ColumnWidth::Length(6)),
        ColumnSpec::new("status", "Status", |d: &Document| d.status.label().into())
            .sortable()
            .width(ColumnWidth::Min(9)),
    ])
}

pub fn document_actions() -> Vec<RowAction<Document>> {
    vec![
        RowAction::new(action::VIEW, "View"),
        RowAction::new(action::APPROVE, "Approve")
            .hotkey('y')
            .when(Document::is_pending),
        RowAction::new(action::REJECT, "Reject")
            .hotkey('n')
            .when(Document::is_pending),
    ]
}

pub fn role_id(role: &Role) -> String {
    role.id.clone()
}

pub fn role_columns() -> Result<ColumnModel<Role>, GridError> {
    ColumnModel::new(vec![
        ColumnSpec::selection(SELECT_COLUMN),
        ColumnSpec::new("name", "Role", |r: &Role| r.name.as_str().into())
            .sortable()
            .width(ColumnWidth::Fill(2)),
        ColumnSpec::new("description", "Description", |r: &Role| r.description.as_str().into())
            .hideable()
            .width(ColumnWidth::Fill(4)),
        ColumnSpec::new("members", "Members", |r: &Role| r.members.into())
            .sortable()
            .width(ColumnWidth::Length(8)),
        ColumnSpec::new("created", "Created", |r: &Role| r.created.into())
            .sortable()
            .width(ColumnWidth::Min(10)),
    ])
}

pub fn role_actions() -> Vec<RowAction<Role>> {
    vec![
        RowAction::new(action::VIEW, "View"),
        RowAction::new(action::DELETE, "Delete")
            .hotkey('d')
            .when(|r: &Role| r.members == 0),
    ]
}

pub fn user_id(user: &User) -> String {
    user.id.clone()
}

fn user_state(user: &User) -> &'static str {
    if user.active {
        "Active"
    } else {
        "Inactive"
    }
}

pub fn user_columns() -> Result<ColumnModel<User>, GridError> {
    ColumnModel::new(vec![
        ColumnSpec::selection(SELECT_COLUMN),
        ColumnSpec::new("name", "Name", |u: &User| u.name.as_str().into())
            .sortable()
            .width(ColumnWidth::Fill(2)),
        ColumnSpec::new("email", "Email", |u: &User| u.email.as_str().into())
            .hideable()
            .width(ColumnWidth::Fill(3)),
        ColumnSpec::new("department", "Department", |u: &User| u.department.as_str().into())
            .sortable()
            .hideable()
            .width(ColumnWidth::Fill(2)),
        ColumnSpec::new("role", "Role", |u: &User| u.role.as_str().into()).sortable(),
        ColumnSpec::new("status", "Status", |u: &User| user_state(u).into())
            .sortable()
            .width(ColumnWidth::Min(8)),
        ColumnSpec::new("last_login", "Last login", |u: &User| u.last_login.into())
            .sortable()
            .hideable()
            .cell(|value, _| optional_count(value, "never"))
            .width(ColumnWidth::Min(10)),
    ])
}

pub fn user_actions() -> Vec<RowAction<User>> {
    vec![
        RowAction::new(action::VIEW, "View"),
        RowAction::new(action::ACTIVATE, "Activate")
            .hotkey('t')
            .when(|u: &User| !u.active),
        RowAction::new(action::DEACTIVATE, "Deactivate")
            .hotkey('t')
            .when(|u: &User| u.active),
    ]
}

pub fn department_id(department: &Department) -> String {
    department.id.clone()
}

pub fn department_columns() -> Result<ColumnModel<Department>, GridError> {
    ColumnModel::new(vec![
        ColumnSpec::new("name", "Department", |d: &Department| d.name.as_str().into())
            .sortable()
            .width(ColumnWidth::Fill(2)),
        ColumnSpec::new("head", "Head", |d: &Department| d.head.as_str().into())
            .sortable()
            .width(ColumnWidth::Fill(2)),
        ColumnSpec::new("staff", "Staff", |d: &Department| d.staff.into())
            .sortable()
            .width(ColumnWidth::Length(6)),
        ColumnSpec::new("location", "Location", |d: &Department| d.location.as_str().into())
            .hideable()
            .width(ColumnWidth::Fill(3)),
    ])
}

pub fn department_actions() -> Vec<RowAction<Department>> {
    vec![RowAction::new(action::VIEW, "View")]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PortalData;

    #[test]
    fn test_table_definitions_are_valid() {
        assert_eq!(document_columns().unwrap().len(), 8);
        assert_eq!(role_columns().unwrap().len(), 5);
        assert_eq!(user_columns().unwrap().len(), 7);
        assert!(department_columns().unwrap().selection_column().is_none());
    }

    #[test]
    fn test_table_cycle_and_parse() {
        for table in Table::ALL {
            assert_eq!(table.next().prev(), table);
            assert_eq!(table.key().parse::<Table>().unwrap(), table);
            assert_eq!(Table::ALL[table.index()], table);
        }
        assert_eq!("Users".parse::<Table>().unwrap(), Table::Users);
        assert!("invoices".parse::<Table>().is_err());
    }

    #[test]
    fn test_optional_cells() {
        let data = PortalData::sample();
        let columns = document_columns().unwrap();
        let unpaged = data.documents.iter().find(|d| d.pages.is_none()).unwrap();
        let pages = columns.column("pages").unwrap();
        assert_eq!(pages.render(unpaged), "-");

        let users = user_columns().unwrap();
        let never = data.users.iter().find(|u| u.last_login.is_none()).unwrap();
        assert_eq!(users.column("last_login").unwrap().render(never), "never");
    }

    #[test]
    fn test_document_actions_only_for_pending() {
        let data = PortalData::sample();
        let actions = document_actions();
        let approved = data.documents.iter().find(|d| !d.is_pending()).unwrap();
        let offered: Vec<&str> = actions
            .iter()
            .filter(|a| a.is_available(approved))
            .map(|a| a.name())
            .collect();
        assert_eq!(offered, vec![action::VIEW]);
    }

    #[test]
    fn test_user_toggle_hotkey_depends_on_state() {
        let data = PortalData::sample();
        let actions = user_actions();
        for user in &data.users {
            let toggle: Vec<&str> = actions
                .iter()
                .filter(|a| a.key() == Some('t') && a.is_available(user))
                .map(|a| a.name())
                .collect();
            let expected = if user.active { action::DEACTIVATE } else { action::ACTIVATE };
            assert_eq!(toggle, vec![expected]);
        }
    }

    #[test]
    fn test_submitted_header_follows_direction() {
        let columns = document_columns().unwrap();
        let header = columns.column("submitted").unwrap().header();
        assert_eq!(header.text(None), "Submitted");
        assert_eq!(header.text(Some(SortDirection::Descending)), "Submitted (newest)");
    }
}
