use crate::api::ApiClient;
use crate::views::create::CreateIncident;
use crate::views::detail::IncidentDetail;
use crate::views::list::IncidentList;
use leptos::*;

/// Client-side navigation surface: the list, the creation form, and the
/// detail form for one incident.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    List,
    Create,
    Detail(String),
}

/// App shell. Owns the current route and hands the API client to the views
/// through context; each view owns its own state for its lifetime.
#[component]
pub fn App(api: ApiClient) -> impl IntoView {
    let route = create_rw_signal(Route::List);
    provide_context(api);
    provide_context(route);

    view! {
      <div class="app">
        {move || match route.get() {
            Route::List => view! { <IncidentList/> }.into_view(),
            Route::Create => view! { <CreateIncident/> }.into_view(),
            Route::Detail(id) => view! { <IncidentDetail id=id/> }.into_view(),
        }}
      </div>
    }
}
