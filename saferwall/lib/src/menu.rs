//! File detail navigation tabs.

use serde::{Deserialize, Serialize};

/// Name of the tab reserved for PE files.
const PE_MENU: &str = "pe";

/// A tab on the file detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMenu {
    pub name: String,
    /// Route segment after `/files/{hash}/`.
    pub path: String,
}

impl FileMenu {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Whether this tab only applies to PE files.
    pub fn is_pe(&self) -> bool {
        self.name.eq_ignore_ascii_case(PE_MENU)
    }
}

/// The tabs shown on every file page before filtering.
pub fn default_file_menu() -> Vec<FileMenu> {
    vec![
        FileMenu::new("Summary", "summary"),
        FileMenu::new("Antivirus", "antivirus"),
        FileMenu::new("PE", "pe"),
        FileMenu::new("Strings", "strings"),
        FileMenu::new("Comments", "comments"),
    ]
}

/// Removes the PE tab unless `file_format` is `pe` in any letter case.
///
/// Pass `None` when the file could not be fetched.
pub fn filter_file_menu(menu: &[FileMenu], file_format: Option<&str>) -> Vec<FileMenu> {
    let is_pe = file_format.is_some_and(|format| format.eq_ignore_ascii_case(PE_MENU));

    menu.iter()
        .filter(|entry| is_pe || !entry.is_pe())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(menu: &[FileMenu]) -> Vec<&str> {
        menu.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_pe_format_keeps_pe_tab() {
        let menu = default_file_menu();
        for format in ["pe", "PE", "Pe"] {
            let filtered = filter_file_menu(&menu, Some(format));
            assert_eq!(filtered.len(), menu.len());
            assert!(filtered.iter().any(FileMenu::is_pe));
        }
    }

    #[test]
    fn test_other_format_hides_pe_tab() {
        let filtered = filter_file_menu(&default_file_menu(), Some("elf"));
        assert_eq!(
            names(&filtered),
            vec!["Summary", "Antivirus", "Strings", "Comments"]
        );
    }

    #[test]
    fn test_unknown_format_hides_pe_tab() {
        let filtered = filter_file_menu(&default_file_menu(), None);
        assert!(!filtered.iter().any(FileMenu::is_pe));
    }

    #[test]
    fn test_order_preserved() {
        let menu = vec![
            FileMenu::new("pe", "pe"),
            FileMenu::new("Summary", "summary"),
        ];
        let filtered = filter_file_menu(&menu, Some("PE"));
        assert_eq!(names(&filtered), vec!["pe", "Summary"]);
    }
}
