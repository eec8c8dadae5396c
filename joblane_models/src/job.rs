use std::fmt;

use chrono::{DateTime, Utc};
use joblane_utils::patch::Patch;
use serde::{Deserialize, Serialize};

use crate::{
    macros::{id, nutype_string},
    pagination::{PageLimit, PageNumber},
    user::UserId,
    QueryText,
};

id!(JobId);

nutype_string!(JobTitle(validate(len_char_min = 1, len_char_max = 100)));
nutype_string!(CompanyName(validate(len_char_min = 1, len_char_max = 100)));
nutype_string!(JobDescription(validate(len_char_min = 10, len_char_max = 5000)));
nutype_string!(JobLocation(validate(len_char_min = 1, len_char_max = 100)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
}

impl JobType {
    pub const VALUES: [Self; 3] = [Self::FullTime, Self::PartTime, Self::Contract];

    /// Parses user input leniently: case and `-`/`_`/space separators are
    /// ignored, so `FULL_TIME` and `Full-Time` both parse.
    pub fn from_input(input: &str) -> Option<Self> {
        match normalize_keyword(input).as_str() {
            "fulltime" => Some(Self::FullTime),
            "parttime" => Some(Self::PartTime),
            "contract" => Some(Self::Contract),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "FULL_TIME",
            Self::PartTime => "PART_TIME",
            Self::Contract => "CONTRACT",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One job posting. Field invariants are carried by the newtypes, so a `Job`
/// cannot be constructed or patched into an invalid state.
#[derive(Debug, Clone, PartialEq, Eq, Patch)]
pub struct Job {
    #[no_patch]
    pub id: JobId,
    #[no_patch]
    pub user_id: UserId,
    pub title: JobTitle,
    pub company: CompanyName,
    pub description: JobDescription,
    pub location: JobLocation,
    pub job_type: JobType,
    #[no_patch]
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobFilter {
    /// Restrict to one owner's postings.
    pub user_id: Option<UserId>,
    /// Substring match on the location.
    pub location: Option<QueryText>,
    pub job_type: Option<JobType>,
    /// Substring match across title, company and description.
    pub search: Option<QueryText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Company,
}

impl JobSortField {
    /// Accepts both the camelCase wire form (`createdAt`) and snake_case.
    pub fn from_input(input: &str) -> Option<Self> {
        match normalize_keyword(input).as_str() {
            "createdat" => Some(Self::CreatedAt),
            "updatedat" => Some(Self::UpdatedAt),
            "title" => Some(Self::Title),
            "company" => Some(Self::Company),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn from_input(input: &str) -> Option<Self> {
        match normalize_keyword(input).as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobSort {
    pub field: JobSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobPageRequest {
    pub page: PageNumber,
    pub limit: PageLimit,
    pub sort: JobSort,
}

/// One page of a job listing query, together with the query's total result
/// count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPage {
    pub jobs: Vec<Job>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_more: bool,
}

impl JobPage {
    pub fn empty(request: JobPageRequest) -> Self {
        Self {
            jobs: Vec::new(),
            total: 0,
            page: *request.page,
            limit: *request.limit,
            total_pages: 0,
            has_more: false,
        }
    }
}

fn normalize_keyword(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .collect::<String>()
        .to_lowercase()
}
