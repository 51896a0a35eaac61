use crate::api::ApiClient;
use crate::app::Route;
use crate::dto::{Incident, Severity, Status};
use crate::format::locale_date;
use crate::state::{filter_by_title, page_numbers, ListQuery, RequestSequence, StatusFilter};
use leptos::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::AbortController;

#[component]
pub fn IncidentList() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let route = expect_context::<RwSignal<Route>>();

    let query = create_rw_signal(ListQuery::default());
    let search = create_rw_signal(String::new());

    let incidents = create_rw_signal(Vec::<Incident>::new());
    let total_pages = create_rw_signal(1u32);
    let loading = create_rw_signal(false);
    let error = create_rw_signal(None::<String>);

    let sequence = RequestSequence::default();
    let controller = store_value(None::<AbortController>);

    let abort_in_flight = move || {
        controller.update_value(|slot| {
            if let Some(ctl) = slot.take() {
                ctl.abort();
            }
        });
    };

    // Refetch whenever the query or the search term changes. The previous
    // request is aborted and its ticket superseded, so the only response ever
    // applied is the one for the latest state.
    {
        let api = api.clone();
        let sequence = sequence.clone();
        create_effect(move |_| {
            let q = query.get();
            let needle = search.get();

            abort_in_flight();
            let ticket = sequence.begin();
            let ctl = AbortController::new().ok();
            let signal = ctl.as_ref().map(|c| c.signal());
            controller.set_value(ctl);

            loading.set(true);
            error.set(None);

            let api = api.clone();
            spawn_local(async move {
                let result = api.list_incidents(&q, signal.as_ref()).await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(page) => {
                        // Search narrows the current page only; it is not
                        // part of the server query.
                        incidents.set(filter_by_title(&page.data, &needle));
                        total_pages.set(page.total_pages.max(1));
                        error.set(None);
                        loading.set(false);
                    }
                    Err(e) if e.is_cancelled() => {}
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        loading.set(false);
                    }
                }
            });
        });
    }

    on_cleanup(move || {
        sequence.invalidate();
        abort_in_flight();
    });

    view! {
      <div class="page list-page">
        <h1>"Incident List"</h1>
        <div class="card">
          <div class="card-header">
            <h2>"Incident Tracker"</h2>
            <button on:click=move |_| route.set(Route::Create)>"New Incident"</button>
          </div>

          <div class="filters">
            <div class="severity-filter">
              <span>"Severity"</span>
              <For
                each=move || Severity::ALL
                key=|sev| *sev
                children=move |sev| view! {
                  <label>
                    <input
                      type="checkbox"
                      prop:checked=move || query.with(|q| q.has_severity(sev))
                      on:change=move |_| query.update(|q| q.toggle_severity(sev))
                    />
                    <span>{sev.as_str()}</span>
                  </label>
                }
              />
            </div>
            <div class="row">
              <select
                prop:value=move || query.with(|q| q.status.value().to_string())
                on:change=move |ev| {
                  query.update(|q| q.set_status(StatusFilter::from_value(&event_target_value(&ev))));
                }
              >
                <option value="all">"Status"</option>
                <For
                  each=move || Status::ALL
                  key=|st| *st
                  children=move |st| view! {
                    <option value=st.as_str()>{st.as_str()}</option>
                  }
                />
              </select>
              <input
                type="text"
                placeholder="Search..."
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
              />
              <button on:click=move |_| query.update(|q| q.set_page(1))>"Filter"</button>
            </div>
          </div>

          <Show when=move || error.get().is_some() fallback=|| ()>
            <div class="error">{move || error.get().unwrap_or_default()}</div>
          </Show>
          <Show when=move || loading.get() fallback=|| ()>
            <div class="loading">"Loading incidents..."</div>
          </Show>

          <table>
            <thead>
              <tr>
                <th>"Title"</th>
                <th>"Severity"</th>
                <th>"Status"</th>
                <th>"Created At"</th>
                <th>"Owner"</th>
              </tr>
            </thead>
            <tbody>
              <For
                each=move || incidents.get()
                key=|inc| inc.id.clone()
                children=move |inc| {
                  let id = inc.id.clone();
                  let created = inc.created_at.as_deref().map(locale_date).unwrap_or_default();
                  let owner = inc.owner.clone().unwrap_or_default();
                  view! {
                    <tr>
                      <td>
                        <button class="link" on:click=move |_| route.set(Route::Detail(id.clone()))>
                          {inc.title.clone()}
                        </button>
                      </td>
                      <td>{inc.severity.as_str()}</td>
                      <td><span class="status">{inc.status.as_str()}</span></td>
                      <td>{created}</td>
                      <td>{owner}</td>
                    </tr>
                  }
                }
              />
            </tbody>
          </table>

          <div class="pagination">
            <span>
              {move || format!("Page {} of {}", query.with(|q| q.page), total_pages.get())}
            </span>
            <button on:click=move |_| query.update(|q| q.set_page(1))>"<<"</button>
            <For
              each=move || page_numbers(total_pages.get())
              key=|page| *page
              children=move |page| view! {
                <button
                  class:active=move || query.with(|q| q.page == page)
                  on:click=move |_| query.update(|q| q.set_page(page))
                >
                  {page}
                </button>
              }
            />
            <button on:click=move |_| {
              let last = total_pages.get_untracked();
              query.update(|q| q.set_page((q.page + 1).min(last.max(1))));
            }>"Next"</button>
          </div>
        </div>
      </div>
    }
}
