use std::collections::BTreeMap;

use joblane_models::job::{
    CompanyName, CompanyNameError, JobDescription, JobDescriptionError, JobLocation,
    JobLocationError, JobPatch, JobTitle, JobTitleError, JobType,
};

/// Field → messages map produced by the safe-parse operations below.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationIssues(BTreeMap<String, Vec<String>>);

impl ValidationIssues {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

macro_rules! parse_text_field {
    ($issues:expr, $field:literal, $raw:expr, $ty:ident, $err:ident, $min:literal, $max:literal) => {{
        let raw: String = $raw;
        if raw.is_empty() {
            $issues.add($field, "is required");
            None
        } else {
            match $ty::try_new(raw) {
                Ok(value) => Some(value),
                Err($err::LenCharMinViolated) => {
                    $issues.add($field, concat!("must be at least ", $min, " characters"));
                    None
                }
                Err($err::LenCharMaxViolated) => {
                    $issues.add($field, concat!("must be at most ", $max, " characters"));
                    None
                }
            }
        }
    }};
}

/// Raw create input as decoded from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobCreateRequest {
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
}

/// The validated form of a [`JobCreateRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCreateData {
    pub title: JobTitle,
    pub company: CompanyName,
    pub description: JobDescription,
    pub location: JobLocation,
    pub job_type: JobType,
}

impl JobCreateRequest {
    /// Checks every field and reports all violations at once.
    pub fn parse(self) -> Result<JobCreateData, ValidationIssues> {
        let mut issues = ValidationIssues::default();

        let title = parse_text_field!(issues, "title", self.title, JobTitle, JobTitleError, 1, 100);
        let company =
            parse_text_field!(issues, "company", self.company, CompanyName, CompanyNameError, 1, 100);
        let description = parse_text_field!(
            issues,
            "description",
            self.description,
            JobDescription,
            JobDescriptionError,
            10,
            5000
        );
        let location = parse_text_field!(
            issues,
            "location",
            self.location,
            JobLocation,
            JobLocationError,
            1,
            100
        );
        let job_type = parse_job_type(&mut issues, &self.job_type);

        match (title, company, description, location, job_type) {
            (Some(title), Some(company), Some(description), Some(location), Some(job_type))
                if issues.is_empty() =>
            {
                Ok(JobCreateData {
                    title,
                    company,
                    description,
                    location,
                    job_type,
                })
            }
            _ => Err(issues),
        }
    }
}

/// Raw partial-update input; absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobUpdateRequest {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
}

impl JobUpdateRequest {
    /// Checks every present field and reports all violations at once. The
    /// resulting patch never touches `updated_at`; the update service owns
    /// that refresh.
    pub fn parse(self) -> Result<JobPatch, ValidationIssues> {
        let mut issues = ValidationIssues::default();
        let mut patch = JobPatch::new();

        if let Some(raw) = self.title {
            if let Some(title) = parse_text_field!(issues, "title", raw, JobTitle, JobTitleError, 1, 100)
            {
                patch = patch.update_title(title);
            }
        }
        if let Some(raw) = self.company {
            if let Some(company) =
                parse_text_field!(issues, "company", raw, CompanyName, CompanyNameError, 1, 100)
            {
                patch = patch.update_company(company);
            }
        }
        if let Some(raw) = self.description {
            if let Some(description) = parse_text_field!(
                issues,
                "description",
                raw,
                JobDescription,
                JobDescriptionError,
                10,
                5000
            ) {
                patch = patch.update_description(description);
            }
        }
        if let Some(raw) = self.location {
            if let Some(location) =
                parse_text_field!(issues, "location", raw, JobLocation, JobLocationError, 1, 100)
            {
                patch = patch.update_location(location);
            }
        }
        if let Some(raw) = self.job_type {
            if let Some(job_type) = parse_job_type(&mut issues, &raw) {
                patch = patch.update_job_type(job_type);
            }
        }

        if issues.is_empty() {
            Ok(patch)
        } else {
            Err(issues)
        }
    }
}

fn parse_job_type(issues: &mut ValidationIssues, raw: &str) -> Option<JobType> {
    if raw.is_empty() {
        issues.add("job_type", "is required");
        return None;
    }
    let job_type = JobType::from_input(raw);
    if job_type.is_none() {
        issues.add("job_type", "must be one of FULL_TIME, PART_TIME, CONTRACT");
    }
    job_type
}
