use joblane_models::job::CompanyName;

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod schema;
pub mod update;

/// Companies that are never allowed to post listings.
pub const DEFAULT_DENY_LIST: &[&str] = &["spam", "scam", "fake company", "test company"];

/// Deny-list of company names, matched case-insensitively as substrings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyBlacklist(Vec<String>);

impl CompanyBlacklist {
    pub fn new(entries: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|entry| entry.into().to_lowercase())
                .collect(),
        )
    }

    pub fn matches(&self, company: &CompanyName) -> bool {
        let company = company.to_lowercase();
        self.0.iter().any(|entry| company.contains(entry))
    }
}

impl Default for CompanyBlacklist {
    fn default() -> Self {
        Self::new(DEFAULT_DENY_LIST.iter().copied())
    }
}
