use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Sev1,
    Sev2,
    Sev3,
    Sev4,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Sev1,
        Severity::Sev2,
        Severity::Sev3,
        Severity::Sev4,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Sev1 => "SEV1",
            Severity::Sev2 => "SEV2",
            Severity::Sev3 => "SEV3",
            Severity::Sev4 => "SEV4",
        }
    }

    pub fn parse(value: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Open,
    Mitigated,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Open, Status::Mitigated, Status::Resolved];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Mitigated => "Mitigated",
            Status::Resolved => "Resolved",
        }
    }

    pub fn parse(value: &str) -> Option<Status> {
        Status::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    Auth,
    Payments,
    Backend,
    Frontend,
    Database,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::Auth,
        Service::Payments,
        Service::Backend,
        Service::Frontend,
        Service::Database,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Service::Auth => "Auth",
            Service::Payments => "Payments",
            Service::Backend => "Backend",
            Service::Frontend => "Frontend",
            Service::Database => "Database",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server-owned incident record. The backend emits `id` or `_id` depending on
/// the store behind it, so both spellings are accepted. Enum fields fall back
/// to their defaults when absent.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Incident {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub service: Option<Service>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<String>,
}

/// One page of list results from `GET /incidents`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct IncidentPage {
    #[serde(default)]
    pub data: Vec<Incident>,
    #[serde(default = "default_total_pages", rename = "totalPages")]
    pub total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}

/// Body of `POST /incidents`. Service and status stay raw strings because the
/// form allows submitting with neither selected; the backend validates.
#[derive(Clone, Debug, Serialize)]
pub struct CreateIncident {
    pub title: String,
    pub service: String,
    pub severity: Severity,
    pub status: String,
    pub owner: String,
    pub summary: String,
}

/// Body of `PATCH /incidents/update/{id}`. `service` and `createdAt` are
/// immutable and never resubmitted; empty owner/summary go out as null.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateIncident {
    pub title: String,
    pub severity: Severity,
    pub status: Status,
    pub owner: Option<String>,
    pub summary: Option<String>,
}
