//! Built-in mock dataset, used when no `--data` file is given.

use chrono::NaiveDate;

use super::model::{Department, Document, PortalData, ReviewStatus, Role, User};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn document(
    id: &str,
    title: &str,
    applicant: &str,
    department: &str,
    category: &str,
    submitted: NaiveDate,
    pages: Option<u32>,
    status: ReviewStatus,
) -> Document {
    Document {
        id: id.to_string(),
        title: title.to_string(),
        applicant: applicant.to_string(),
        department: department.to_string(),
        category: category.to_string(),
        submitted,
        pages,
        status,
    }
}

fn role(id: &str, name: &str, description: &str, members: u32, created: NaiveDate) -> Role {
    Role {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        members,
        created,
    }
}

fn user(
    id: &str,
    name: &str,
    email: &str,
    department: &str,
    role: &str,
    active: bool,
    last_login: Option<NaiveDate>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        department: department.to_string(),
        role: role.to_string(),
        active,
        last_login,
    }
}

fn department(id: &str, name: &str, head: &str, staff: u32, location: &str) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
        head: head.to_string(),
        staff,
        location: location.to_string(),
    }
}

impl PortalData {
    /// The mock dataset shipped with the binary.
    pub fn sample() -> Self {
        use ReviewStatus::*;

        let documents = vec![
            document("DOC-1001", "Building permit: 14 Elm St", "Ana Ruiz", "Planning", "Permit", date(2024, 3, 2), Some(12), Pending),
            document("DOC-1002", "Property tax appeal", "Bola Okafor", "Revenue", "Appeal", date(2024, 2, 17), Some(4), Approved),
            document("DOC-1003", "Street vendor licence", "Chen Wei", "Licensing", "Licence", date(2024, 3, 9), None, Pending),
            document("DOC-1004", "Noise complaint", "Dana Novak", "Environment", "Complaint", date(2024, 1, 28), Some(2), Rejected),
            document("DOC-1005", "Change of address", "Eli Haddad", "Registry", "Registration", date(2024, 3, 11), None, Pending),
            document("DOC-1006", "Tree removal request", "Farah Aziz", "Environment", "Permit", date(2024, 2, 29), Some(3), Pending),
            document("DOC-1007", "Business registration", "Gus Lindqvist", "Registry", "Registration", date(2024, 3, 1), Some(9), Approved),
            document("DOC-1008", "Parking permit renewal", "Hana Sato", "Transport", "Permit", date(2024, 3, 12), Some(1), Pending),
            document("DOC-1009", "Water bill dispute", "Ivan Petrov", "Utilities", "Appeal", date(2024, 2, 5), Some(6), Pending),
            document("DOC-1010", "Event permit: spring market", "Jo Mbeki", "Licensing", "Permit", date(2024, 3, 14), Some(18), Pending),
            document("DOC-1011", "Birth certificate copy", "Kai Moana", "Registry", "Certificate", date(2024, 3, 6), None, Approved),
            document("DOC-1012", "Pothole report", "Lena Vogel", "Transport", "Complaint", date(2024, 3, 13), Some(1), Pending),
            document("DOC-1013", "Home care subsidy", "Mo Farouk", "Social Services", "Application", date(2024, 2, 21), Some(22), Pending),
            document("DOC-1014", "Fence height variance", "Nia Brooks", "Planning", "Permit", date(2024, 1, 30), Some(7), Rejected),
            document("DOC-1015", "Library card replacement", "Omar Said", "Culture", "Application", date(2024, 3, 15), None, Pending),
            document("DOC-1016", "Food truck inspection", "Pia Costa", "Licensing", "Inspection", date(2024, 3, 3), Some(5), Pending),
            document("DOC-1017", "Solar panel permit", "Quinn Harper", "Planning", "Permit", date(2024, 3, 8), Some(14), Approved),
            document("DOC-1018", "Benefit eligibility review", "Rosa Lima", "Social Services", "Appeal", date(2024, 2, 26), Some(11), Pending),
        ];

        let roles = vec![
            role("ROLE-ADMIN", "Administrator", "Full access to portal configuration", 3, date(2021, 6, 1)),
            role("ROLE-REVIEW", "Reviewer", "Approves and rejects submitted documents", 12, date(2021, 6, 1)),
            role("ROLE-CLERK", "Clerk", "Registers incoming paper submissions", 21, date(2022, 1, 17)),
            role("ROLE-AUDIT", "Auditor", "Read-only access to decisions and logs", 4, date(2022, 9, 5)),
            role("ROLE-SUPPORT", "Support", "Answers citizen enquiries", 9, date(2023, 4, 20)),
            role("ROLE-TEMP", "Seasonal staff", "", 0, date(2024, 1, 8)),
        ];

        let users = vec![
            user("U-001", "Alma Jensen", "alma.jensen@city.gov", "Planning", "Reviewer", true, Some(date(2024, 3, 15))),
            user("U-002", "Bram de Vries", "bram.devries@city.gov", "Revenue", "Reviewer", true, Some(date(2024, 3, 14))),
            user("U-003", "Cora Mendes", "cora.mendes@city.gov", "Registry", "Clerk", true, Some(date(2024, 3, 12))),
            user("U-004", "Dev Patel", "dev.patel@city.gov", "IT", "Administrator", true, Some(date(2024, 3, 15))),
            user("U-005", "Edda Berg", "edda.berg@city.gov", "Licensing", "Clerk", false, Some(date(2023, 11, 2))),
            user("U-006", "Femi Ade", "femi.ade@city.gov", "Social Services", "Support", true, None),
            user("U-007", "Greta Holm", "greta.holm@city.gov", "Audit", "Auditor", true, Some(date(2024, 2, 28))),
            user("U-008", "Hugo Marchal", "hugo.marchal@city.gov", "Transport", "Reviewer", false, Some(date(2023, 8, 19))),
            user("U-009", "Ines Duarte", "ines.duarte@city.gov", "Environment", "Clerk", true, Some(date(2024, 3, 10))),
        ];

        let departments = vec![
            department("DEP-PLAN", "Planning", "Alma Jensen", 34, "City Hall, 2nd floor"),
            department("DEP-REV", "Revenue", "Bram de Vries", 51, "Annex B"),
            department("DEP-REG", "Registry", "Cora Mendes", 18, "City Hall, ground floor"),
            department("DEP-LIC", "Licensing", "Edda Berg", 12, "Annex A"),
            department("DEP-ENV", "Environment", "Ines Duarte", 27, "Depot Road 4"),
            department("DEP-TRA", "Transport", "Hugo Marchal", 40, "Depot Road 6"),
            department("DEP-SOC", "Social Services", "Femi Ade", 63, "Civic Centre"),
        ];

        Self {
            documents,
            roles,
            users,
            departments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        let data = PortalData::sample();
        data.validate().unwrap();
        assert!(data.pending_reviews() > 0);
        assert!(data.users.iter().any(|u| !u.active));
        assert!(data.documents.iter().any(|d| d.pages.is_none()));
    }
}
