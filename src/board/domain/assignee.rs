//! Static assignee directory.
//!
//! Assignees are reference data only. Tasks do not persist an assignee, so
//! the directory is used to populate pickers and to validate submitted ids.

use serde::Serialize;

/// A person a task can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    /// Stable directory identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Contact address.
    pub email: &'static str,
    /// Avatar image location.
    pub avatar_url: &'static str,
}

const DIRECTORY: [Assignee; 5] = [
    Assignee {
        id: "1",
        name: "Sarah Chen",
        email: "sarah.chen@company.com",
        avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=Sarah",
    },
    Assignee {
        id: "2",
        name: "Alex Kumar",
        email: "alex.kumar@company.com",
        avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=Alex",
    },
    Assignee {
        id: "3",
        name: "Maria Garcia",
        email: "maria.garcia@company.com",
        avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=Maria",
    },
    Assignee {
        id: "4",
        name: "James Wilson",
        email: "james.wilson@company.com",
        avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=James",
    },
    Assignee {
        id: "5",
        name: "Yuki Tanaka",
        email: "yuki.tanaka@company.com",
        avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=Yuki",
    },
];

/// Returns the full assignee directory in display order.
#[must_use]
pub const fn assignees() -> &'static [Assignee] {
    &DIRECTORY
}

/// Looks up an assignee by directory identifier.
#[must_use]
pub fn find_assignee(id: &str) -> Option<&'static Assignee> {
    DIRECTORY.iter().find(|assignee| assignee.id == id)
}
