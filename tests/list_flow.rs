use incident_tracker::dto::{Incident, IncidentPage, Severity, Status};
use incident_tracker::state::{
    filter_by_title, ListQuery, RequestSequence, RequestTicket, StatusFilter,
};

fn page_json(titles: &[&str], total_pages: u32) -> IncidentPage {
    let data: Vec<serde_json::Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| serde_json::json!({ "id": format!("i{i}"), "title": title }))
        .collect();
    serde_json::from_value(serde_json::json!({ "data": data, "totalPages": total_pages })).unwrap()
}

/// Mirrors the list view's response handling: a response is applied only if
/// its ticket is still current.
struct ListView {
    sequence: RequestSequence,
    incidents: Vec<Incident>,
    total_pages: u32,
}

impl ListView {
    fn new() -> Self {
        ListView {
            sequence: RequestSequence::default(),
            incidents: Vec::new(),
            total_pages: 1,
        }
    }

    fn apply(&mut self, ticket: &RequestTicket, page: IncidentPage, search: &str) -> bool {
        if !ticket.is_current() {
            return false;
        }
        self.incidents = filter_by_title(&page.data, search);
        self.total_pages = page.total_pages.max(1);
        true
    }
}

#[test]
fn filter_changes_produce_the_documented_query_string() {
    let mut query = ListQuery::default();
    query.toggle_severity(Severity::Sev2);
    query.set_status(StatusFilter::Only(Status::Open));
    assert_eq!(
        query.to_query_string(),
        "page=1&limit=5&severity=SEV1,SEV2&status=Open"
    );
}

#[test]
fn stale_response_never_overwrites_a_newer_one() {
    let mut view = ListView::new();

    // A page-1 request goes out, then the user jumps to page 2 before the
    // first response lands.
    let first = view.sequence.begin();
    let second = view.sequence.begin();

    // Page-2 response arrives first and wins.
    assert!(view.apply(&second, page_json(&["Payments 500s"], 3), ""));
    // The slow page-1 response arrives afterwards and must be dropped.
    assert!(!view.apply(&first, page_json(&["Login outage"], 2), ""));

    assert_eq!(view.incidents.len(), 1);
    assert_eq!(view.incidents[0].title, "Payments 500s");
    assert_eq!(view.total_pages, 3);
}

#[test]
fn teardown_discards_any_in_flight_response() {
    let mut view = ListView::new();
    let ticket = view.sequence.begin();
    view.sequence.invalidate();
    assert!(!view.apply(&ticket, page_json(&["DB down"], 1), ""));
    assert!(view.incidents.is_empty());
}

#[test]
fn search_narrows_the_current_page_client_side() {
    let mut view = ListView::new();
    let ticket = view.sequence.begin();
    assert!(view.apply(&ticket, page_json(&["DB down", "Auth fail"], 1), "db"));
    assert_eq!(view.incidents.len(), 1);
    assert_eq!(view.incidents[0].title, "DB down");
}

#[test]
fn any_filter_sequence_keeps_the_page_valid() {
    let mut query = ListQuery::default();
    query.set_page(9);
    query.toggle_severity(Severity::Sev3);
    assert_eq!(query.page, 1);
    query.set_page(4);
    query.set_status(StatusFilter::All);
    assert_eq!(query.page, 1);
    query.set_page(0);
    assert_eq!(query.page, 1);
}
