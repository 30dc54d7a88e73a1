//! Searchable dropdown filtering.

/// One selectable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub value: String,
    pub label: String,
    pub sublabel: Option<String>,
}

impl DropdownOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            sublabel: None,
        }
    }

    pub fn with_sublabel(mut self, sublabel: impl Into<String>) -> Self {
        self.sublabel = Some(sublabel.into());
        self
    }

    fn matches(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self
                .sublabel
                .as_ref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}

/// Options whose label or sublabel contains `term`, ignoring case.
///
/// An empty term matches everything. Original order is kept.
pub fn filter_options<'a>(options: &'a [DropdownOption], term: &str) -> Vec<&'a DropdownOption> {
    let needle = term.to_lowercase();
    options.iter().filter(|o| o.matches(&needle)).collect()
}

/// The typed term, offered as a new entry when no matching option has it as
/// its exact label or value (ignoring case).
pub fn custom_value(options: &[DropdownOption], term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let needle = term.to_lowercase();
    let exact = filter_options(options, term)
        .into_iter()
        .any(|o| o.label.to_lowercase() == needle || o.value.to_lowercase() == needle);
    (!exact).then(|| term.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<DropdownOption> {
        vec![
            DropdownOption::new("ana@b.com", "Ana").with_sublabel("ana@b.com"),
            DropdownOption::new("bo@shop.es", "Bo Diaz").with_sublabel("bo@shop.es"),
        ]
    }

    #[test]
    fn filter_matches_label_or_sublabel_ignoring_case() {
        let options = users();
        assert_eq!(filter_options(&options, "DIAZ").len(), 1);
        assert_eq!(filter_options(&options, "shop.")[0].label, "Bo Diaz");
        assert_eq!(filter_options(&options, "").len(), 2);
        assert!(filter_options(&options, "zzz").is_empty());
    }

    #[test]
    fn custom_value_offered_only_without_exact_match() {
        let options = users();
        assert_eq!(custom_value(&options, "an"), Some("an".to_string()));
        assert_eq!(custom_value(&options, "ana"), None);
        assert_eq!(custom_value(&options, "BO@SHOP.ES"), None);
        assert_eq!(custom_value(&options, "  "), None);
    }
}
