use crate::dto::{CreateIncident, Incident, Severity, Status, UpdateIncident};
use std::cell::Cell;
use std::rc::Rc;

/// Fixed server page size for the list view.
pub const PAGE_SIZE: u32 = 5;

/// Status dimension of the list filter: everything, or one lifecycle stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    /// Parses a `<select>` value; anything unrecognized means "all".
    pub fn from_value(value: &str) -> StatusFilter {
        match Status::parse(value) {
            Some(status) => StatusFilter::Only(status),
            None => StatusFilter::All,
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }
}

/// Server-side portion of the list view's query state. The free-text search
/// lives outside: it is applied client-side and never sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub severities: Vec<Severity>,
    pub status: StatusFilter,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery {
            page: 1,
            severities: vec![Severity::Sev1],
            status: StatusFilter::All,
        }
    }
}

impl ListQuery {
    /// Adds the severity if absent, removes it if present. Any change to the
    /// filter set restarts pagination from the first page.
    pub fn toggle_severity(&mut self, severity: Severity) {
        if let Some(pos) = self.severities.iter().position(|s| *s == severity) {
            self.severities.remove(pos);
        } else {
            self.severities.push(severity);
        }
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn has_severity(&self, severity: Severity) -> bool {
        self.severities.contains(&severity)
    }

    /// Builds the query string for `GET /incidents`. Severity is a
    /// comma-joined list, omitted when nothing is selected; status is omitted
    /// when not filtering.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("page={}&limit={}", self.page, PAGE_SIZE);
        if !self.severities.is_empty() {
            let csv: Vec<&str> = self.severities.iter().map(|s| s.as_str()).collect();
            query.push_str("&severity=");
            query.push_str(&csv.join(","));
        }
        if let StatusFilter::Only(status) = self.status {
            query.push_str("&status=");
            query.push_str(status.as_str());
        }
        query
    }
}

/// Case-insensitive substring match over titles. Applies to the current page
/// only; the search term is never forwarded to the server, so matches on
/// other pages are not found. Known limitation.
pub fn filter_by_title(incidents: &[Incident], search: &str) -> Vec<Incident> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return incidents.to_vec();
    }
    incidents
        .iter()
        .filter(|inc| inc.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Page-jump buttons derived from the reported page count.
pub fn page_numbers(total_pages: u32) -> Vec<u32> {
    (1..=total_pages.max(1)).collect()
}

/// Per-view fetch generation counter. Every state change that triggers a
/// refetch stamps the new request with a ticket; a response whose ticket is
/// no longer current must be discarded, so a slow early response can never
/// overwrite the result of a later one.
#[derive(Clone, Default)]
pub struct RequestSequence {
    current: Rc<Cell<u64>>,
}

pub struct RequestTicket {
    seq: u64,
    current: Rc<Cell<u64>>,
}

impl RequestSequence {
    /// Supersedes any outstanding ticket and issues the next one.
    pub fn begin(&self) -> RequestTicket {
        let next = self.current.get() + 1;
        self.current.set(next);
        RequestTicket {
            seq: next,
            current: Rc::clone(&self.current),
        }
    }

    /// Invalidates all outstanding tickets without issuing a new one. Used on
    /// view teardown.
    pub fn invalidate(&self) {
        self.current.set(self.current.get() + 1);
    }
}

impl RequestTicket {
    pub fn is_current(&self) -> bool {
        self.current.get() == self.seq
    }
}

/// Draft held by the creation form. Everything starts empty except severity,
/// which the radio group pre-selects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateDraft {
    pub title: String,
    pub service: String,
    pub severity: Severity,
    pub status: String,
    pub owner: String,
    pub summary: String,
}

impl Default for CreateDraft {
    fn default() -> Self {
        CreateDraft {
            title: String::new(),
            service: String::new(),
            severity: Severity::Sev1,
            status: String::new(),
            owner: String::new(),
            summary: String::new(),
        }
    }
}

impl CreateDraft {
    pub fn to_request(&self) -> CreateIncident {
        CreateIncident {
            title: self.title.clone(),
            service: self.service.clone(),
            severity: self.severity,
            status: self.status.clone(),
            owner: self.owner.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// Draft held by the detail form. `service` and `occurred_at` are display
/// only and never sent back.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetailDraft {
    pub title: String,
    pub service: String,
    pub severity: Severity,
    pub status: Status,
    pub assigned_to: String,
    pub occurred_at: String,
    pub summary: String,
}

impl DetailDraft {
    /// Maps a server record into the editable draft. The caller supplies the
    /// date formatter so the browser locale rendering stays at the edge.
    pub fn from_incident(inc: &Incident, format_date: impl Fn(&str) -> String) -> Self {
        DetailDraft {
            title: inc.title.clone(),
            service: inc.service.map(|s| s.as_str().to_string()).unwrap_or_default(),
            severity: inc.severity,
            status: inc.status,
            assigned_to: inc.owner.clone().unwrap_or_default(),
            occurred_at: inc.created_at.as_deref().map(format_date).unwrap_or_default(),
            summary: inc.summary.clone().unwrap_or_default(),
        }
    }

    pub fn to_update(&self) -> UpdateIncident {
        UpdateIncident {
            title: self.title.clone(),
            severity: self.severity,
            status: self.status,
            owner: none_if_empty(&self.assigned_to),
            summary: none_if_empty(&self.summary),
        }
    }
}

fn none_if_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident(title: &str) -> Incident {
        Incident {
            id: title.to_lowercase().replace(' ', "-"),
            title: title.to_string(),
            ..Incident::default()
        }
    }

    #[test]
    fn toggle_adds_and_removes_and_resets_page() {
        let mut query = ListQuery::default();
        query.set_page(4);
        query.toggle_severity(Severity::Sev2);
        assert!(query.has_severity(Severity::Sev1));
        assert!(query.has_severity(Severity::Sev2));
        assert_eq!(query.page, 1);

        query.set_page(3);
        query.toggle_severity(Severity::Sev1);
        assert!(!query.has_severity(Severity::Sev1));
        assert_eq!(query.page, 1);
    }

    #[test]
    fn status_change_resets_page() {
        let mut query = ListQuery::default();
        query.set_page(7);
        query.set_status(StatusFilter::Only(Status::Resolved));
        assert_eq!(query.page, 1);
        assert_eq!(query.status, StatusFilter::Only(Status::Resolved));
    }

    #[test]
    fn query_string_joins_severities_and_includes_status() {
        let mut query = ListQuery::default();
        query.toggle_severity(Severity::Sev2);
        query.set_status(StatusFilter::Only(Status::Open));
        assert_eq!(
            query.to_query_string(),
            "page=1&limit=5&severity=SEV1,SEV2&status=Open"
        );
    }

    #[test]
    fn query_string_omits_empty_dimensions() {
        let mut query = ListQuery::default();
        query.toggle_severity(Severity::Sev1);
        query.set_page(2);
        assert_eq!(query.to_query_string(), "page=2&limit=5");
    }

    #[test]
    fn status_filter_parses_select_values() {
        assert_eq!(StatusFilter::from_value("all"), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_value("Mitigated"),
            StatusFilter::Only(Status::Mitigated)
        );
        assert_eq!(StatusFilter::from_value("bogus"), StatusFilter::All);
    }

    #[test]
    fn title_filter_is_case_insensitive() {
        let page = vec![incident("DB down"), incident("Auth fail")];
        let hits = filter_by_title(&page, "db");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "DB down");
    }

    #[test]
    fn blank_search_keeps_everything() {
        let page = vec![incident("DB down"), incident("Auth fail")];
        assert_eq!(filter_by_title(&page, "").len(), 2);
        assert_eq!(filter_by_title(&page, "   ").len(), 2);
    }

    #[test]
    fn page_numbers_derive_from_total() {
        assert_eq!(page_numbers(4), vec![1, 2, 3, 4]);
        assert_eq!(page_numbers(1), vec![1]);
        assert_eq!(page_numbers(0), vec![1]);
    }

    #[test]
    fn newer_ticket_supersedes_older() {
        let seq = RequestSequence::default();
        let first = seq.begin();
        assert!(first.is_current());
        let second = seq.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn invalidate_discards_all_tickets() {
        let seq = RequestSequence::default();
        let ticket = seq.begin();
        seq.invalidate();
        assert!(!ticket.is_current());
    }

    #[test]
    fn detail_draft_maps_owner_and_defaults() {
        let inc: Incident = serde_json::from_str(
            r#"{"id":"i1","title":"Checkout latency","service":"Payments",
                "severity":"SEV2","status":"Mitigated","owner":"alice",
                "createdAt":"2024-01-05T00:00:00Z"}"#,
        )
        .unwrap();
        let draft = DetailDraft::from_incident(&inc, |iso| format!("local({iso})"));
        assert_eq!(draft.assigned_to, "alice");
        assert_eq!(draft.occurred_at, "local(2024-01-05T00:00:00Z)");
        assert_eq!(draft.service, "Payments");
        assert_eq!(draft.summary, "");

        let bare: Incident = serde_json::from_str(r#"{"id":"i2"}"#).unwrap();
        let draft = DetailDraft::from_incident(&bare, |_| unreachable!());
        assert_eq!(draft.severity, Severity::Sev1);
        assert_eq!(draft.status, Status::Open);
        assert_eq!(draft.occurred_at, "");
    }

    #[test]
    fn detail_update_preserves_untouched_owner_and_nulls_empty() {
        let mut draft = DetailDraft {
            assigned_to: "alice".into(),
            ..DetailDraft::default()
        };
        assert_eq!(draft.to_update().owner.as_deref(), Some("alice"));
        assert!(draft.to_update().summary.is_none());

        draft.assigned_to.clear();
        draft.summary = "postmortem pending".into();
        let update = draft.to_update();
        assert!(update.owner.is_none());
        assert_eq!(update.summary.as_deref(), Some("postmortem pending"));
    }

    #[test]
    fn create_draft_submits_all_fields_verbatim() {
        let draft = CreateDraft {
            title: "X".into(),
            service: "Auth".into(),
            severity: Severity::Sev2,
            status: "Open".into(),
            summary: "desc".into(),
            ..CreateDraft::default()
        };
        let req = draft.to_request();
        assert_eq!(req.title, "X");
        assert_eq!(req.service, "Auth");
        assert_eq!(req.severity, Severity::Sev2);
        assert_eq!(req.owner, "");
    }
}
