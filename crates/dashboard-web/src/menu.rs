//! Sidebar navigation

/// One link in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// Target path
    pub href: &'static str,
    /// Link text
    pub label: &'static str,
    /// Whether the current page is this entry
    pub active: bool,
}

/// A titled group of links; the top group has no title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGroup {
    /// Group heading
    pub label: Option<&'static str>,
    /// Links in display order
    pub entries: Vec<MenuEntry>,
}

const MENU: [(Option<&str>, &[(&str, &str)]); 3] = [
    (None, &[("/dashboard", "Dashboard")]),
    (Some("Contents"), &[("/dashboard/ai/chat", "Chat AI")]),
    (
        Some("Settings"),
        &[("/dashboard/users", "Users"), ("/dashboard/account", "Account")],
    ),
];

/// The sidebar for a request to `path`. Exactly one entry is active when the
/// path is one of the menu targets.
#[must_use]
pub fn menu(path: &str) -> Vec<MenuGroup> {
    let path = normalize(path);
    MENU.iter()
        .map(|(label, entries)| MenuGroup {
            label: *label,
            entries: entries
                .iter()
                .map(|&(href, label)| MenuEntry {
                    href,
                    label,
                    active: href == path,
                })
                .collect(),
        })
        .collect()
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn active(path: &str) -> Vec<&'static str> {
        menu(path)
            .into_iter()
            .flat_map(|group| group.entries)
            .filter(|entry| entry.active)
            .map(|entry| entry.label)
            .collect()
    }

    #[rstest]
    #[case("/dashboard", vec!["Dashboard"])]
    #[case("/dashboard/", vec!["Dashboard"])]
    #[case("/dashboard/users?status=pending", vec!["Users"])]
    #[case("/dashboard/account", vec!["Account"])]
    #[case("/dashboard/ai/chat", vec!["Chat AI"])]
    #[case("/login", vec![])]
    fn test_active_entry(#[case] path: &str, #[case] expected: Vec<&'static str>) {
        assert_eq!(active(path), expected);
    }

    #[test]
    fn test_group_layout() {
        let groups = menu("/");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].label, None);
        assert_eq!(groups[1].label, Some("Contents"));
        assert_eq!(groups[2].label, Some("Settings"));
        let settings: Vec<_> = groups[2].entries.iter().map(|e| e.label).collect();
        assert_eq!(settings, vec!["Users", "Account"]);
    }
}
