use incident_tracker::api::ApiClient;
use incident_tracker::app::App;
use leptos::*;

const API_BASE_URL: &str = "http://localhost:5000/api";

fn main() {
    let api = ApiClient::new(API_BASE_URL);
    mount_to_body(move || view! { <App api=api/> });
}
