//! User approval workflow: status filter, table columns and the optimistic
//! approve/reject reducers

use crate::table::{CellValue, ColumnDef, TableRecord, TableState, TableView};
use crate::types::{User, UserStatus};
use smallvec::{SmallVec, smallvec};
use std::fmt;
use std::str::FromStr;

/// Admin decision on a pending account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Approve the account
    Approve,
    /// Reject the account
    Reject,
}

impl Decision {
    /// Status the account ends up in
    #[must_use]
    pub const fn target_status(self) -> UserStatus {
        match self {
            Self::Approve => UserStatus::Approved,
            Self::Reject => UserStatus::Rejected,
        }
    }

    /// Path segment used by the API (`users/approve/{id}`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            other => Err(crate::Error::validation(
                "decision",
                format!("unknown decision '{other}'"),
            )),
        }
    }
}

/// Status dropdown on the users page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No status restriction
    #[default]
    All,
    /// Only accounts in this status
    Only(UserStatus),
}

impl StatusFilter {
    /// Options in dropdown order
    pub const OPTIONS: [Self; 4] = [
        Self::All,
        Self::Only(UserStatus::Pending),
        Self::Only(UserStatus::Approved),
        Self::Only(UserStatus::Rejected),
    ];

    /// Whether a user passes this filter
    #[must_use]
    pub fn matches(self, user: &User) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => user.status == status,
        }
    }

    /// Query-string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Dropdown label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Statuses",
            Self::Only(status) => status.label(),
        }
    }

    /// Whether the filter restricts anything
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::All)
    }
}

impl FromStr for StatusFilter {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().is_empty() {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

static USER_COLUMNS: [ColumnDef; 4] = [
    ColumnDef::new("id", "ID"),
    ColumnDef::new("email", "Email").pinned(),
    ColumnDef::new("status", "Status"),
    ColumnDef::new("created_at", "Created At"),
];

impl TableRecord for User {
    fn columns() -> &'static [ColumnDef] {
        &USER_COLUMNS
    }

    fn cell(&self, column: &str) -> CellValue<'_> {
        match column {
            "id" => CellValue::Text(&self.id),
            "email" => CellValue::Text(&self.email),
            "status" => CellValue::Text(self.status.as_str()),
            "created_at" => CellValue::Timestamp(self.created_at),
            _ => CellValue::Empty,
        }
    }

    fn search_fields(&self) -> SmallVec<[&str; 2]> {
        smallvec![self.email.as_str(), self.id.as_str()]
    }
}

/// Derive the users table: free-text search over email and id, ANDed with
/// the status filter
#[must_use]
pub fn derive_users<'a>(
    users: &'a [User],
    state: &TableState,
    status: StatusFilter,
) -> TableView<'a, User> {
    crate::table::derive_with(users, state, |user| status.matches(user))
}

/// Return a copy of `users` with the matching record moved to the decision's
/// status. Every other record is untouched; an unknown id changes nothing.
#[must_use]
pub fn apply_decision(users: &[User], id: &str, decision: Decision) -> Vec<User> {
    let status = decision.target_status();
    users
        .iter()
        .map(|user| {
            if user.id == id {
                User {
                    status,
                    ..user.clone()
                }
            } else {
                user.clone()
            }
        })
        .collect()
}

/// Optimistic patch after a successful approve call
#[must_use]
pub fn apply_approval(users: &[User], id: &str) -> Vec<User> {
    apply_decision(users, id, Decision::Approve)
}

/// Optimistic patch after a successful reject call
#[must_use]
pub fn apply_rejection(users: &[User], id: &str) -> Vec<User> {
    apply_decision(users, id, Decision::Reject)
}

/// Count of users per status, for the page header
#[must_use]
pub fn count_by_status(users: &[User], status: UserStatus) -> usize {
    users.iter().filter(|user| user.status == status).count()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::table::ViewStatus;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn user(id: &str, email: &str, status: UserStatus, day: u32) -> User {
        User {
            id: id.to_string(),
            email: email.to_string(),
            status,
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        }
    }

    fn sample() -> Vec<User> {
        vec![
            user("abc123", "alice@example.com", UserStatus::Pending, 1),
            user("def456", "bob@example.com", UserStatus::Approved, 2),
            user("ghi789", "carol@example.com", UserStatus::Rejected, 3),
        ]
    }

    #[test]
    fn test_pending_filter_returns_exactly_one() {
        let users = sample();
        let view = derive_users(
            &users,
            &TableState::default(),
            StatusFilter::Only(UserStatus::Pending),
        );

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows.first().map(|u| u.id.as_str()), Some("abc123"));
    }

    #[test]
    fn test_approval_patches_only_the_target() {
        let users = sample();
        let patched = apply_approval(&users, "abc123");

        assert_eq!(patched.len(), 3);
        assert_eq!(patched[0].status, UserStatus::Approved);
        assert_eq!(patched[0].email, "alice@example.com");
        assert_eq!(patched[1], users[1]);
        assert_eq!(patched[2], users[2]);
        // input untouched
        assert_eq!(users[0].status, UserStatus::Pending);
    }

    #[test]
    fn test_rejection_patches_only_the_target() {
        let users = sample();
        let patched = apply_rejection(&users, "abc123");

        assert_eq!(patched[0].status, UserStatus::Rejected);
        assert_eq!(&patched[1..], &users[1..]);
    }

    #[test]
    fn test_unknown_id_changes_nothing() {
        let users = sample();
        assert_eq!(apply_approval(&users, "missing"), users);
    }

    #[test]
    fn test_search_matches_email_or_id() {
        let users = sample();
        let mut state = TableState::default();

        state.set_filter("BOB@");
        let view = derive_users(&users, &state, StatusFilter::All);
        assert_eq!(view.rows.first().map(|u| u.id.as_str()), Some("def456"));

        state.set_filter("ghi7");
        let view = derive_users(&users, &state, StatusFilter::All);
        assert_eq!(view.rows.first().map(|u| u.id.as_str()), Some("ghi789"));
    }

    #[test]
    fn test_search_and_status_are_combined() {
        let users = sample();
        let mut state = TableState::default();
        state.set_filter("alice");

        let view = derive_users(&users, &state, StatusFilter::Only(UserStatus::Approved));
        assert_eq!(view.status, ViewStatus::NoMatches);
    }

    #[test]
    fn test_empty_list_is_no_data_even_with_filters() {
        let view = derive_users(
            &[],
            &TableState::default(),
            StatusFilter::Only(UserStatus::Pending),
        );
        assert_eq!(view.status, ViewStatus::NoData);
    }

    #[test]
    fn test_unsorted_list_keeps_api_order() {
        let users = sample();
        let state = TableState::for_record::<User>(10);
        let view = derive_users(&users, &state, StatusFilter::All);

        let ids: Vec<&str> = view.rows.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["abc123", "def456", "ghi789"]);
    }

    #[test]
    fn test_sort_by_created_at_descending() {
        let users = sample();
        let mut state = TableState::for_record::<User>(10);
        state.set_sort(crate::table::SortSpec::desc("created_at"));
        let view = derive_users(&users, &state, StatusFilter::All);

        let ids: Vec<&str> = view.rows.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["ghi789", "def456", "abc123"]);
    }

    #[rstest]
    #[case("all", StatusFilter::All)]
    #[case("", StatusFilter::All)]
    #[case("pending", StatusFilter::Only(UserStatus::Pending))]
    #[case("Approved", StatusFilter::Only(UserStatus::Approved))]
    #[case("rejected", StatusFilter::Only(UserStatus::Rejected))]
    fn test_status_filter_from_str(#[case] input: &str, #[case] expected: StatusFilter) {
        assert_eq!(input.parse::<StatusFilter>().unwrap(), expected);
    }

    #[test]
    fn test_status_filter_round_trips_through_query_value() {
        for option in StatusFilter::OPTIONS {
            assert_eq!(option.as_str().parse::<StatusFilter>().unwrap(), option);
        }
        assert!("banned".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_decision_parse_and_target() {
        assert_eq!("approve".parse::<Decision>().unwrap(), Decision::Approve);
        assert_eq!("reject".parse::<Decision>().unwrap(), Decision::Reject);
        assert!("delete".parse::<Decision>().is_err());
        assert_eq!(Decision::Approve.target_status(), UserStatus::Approved);
        assert_eq!(Decision::Reject.to_string(), "reject");
    }

    #[test]
    fn test_count_by_status() {
        let users = sample();
        assert_eq!(count_by_status(&users, UserStatus::Pending), 1);
        let patched = apply_approval(&users, "abc123");
        assert_eq!(count_by_status(&patched, UserStatus::Pending), 0);
        assert_eq!(count_by_status(&patched, UserStatus::Approved), 2);
    }
}
