use crate::api::ApiClient;
use crate::app::Route;
use crate::dto::{Severity, Status};
use crate::format::locale_date;
use crate::state::{DetailDraft, RequestSequence};
use leptos::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn IncidentDetail(id: String) -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let route = expect_context::<RwSignal<Route>>();
    let incident_id = store_value(id);

    let draft = create_rw_signal(DetailDraft::default());
    let loading = create_rw_signal(false);
    let saving = create_rw_signal(false);
    let notice = create_rw_signal(None::<String>);

    let sequence = RequestSequence::default();

    // The shell recreates this view whenever the route id changes, so one
    // load per instance is enough. The ticket drops a response that lands
    // after teardown.
    {
        let id = incident_id.get_value();
        if !id.is_empty() {
            let ticket = sequence.begin();
            let api = api.get_value();
            loading.set(true);
            spawn_local(async move {
                let result = api.get_incident(&id).await;
                if !ticket.is_current() {
                    return;
                }
                match result {
                    Ok(inc) => draft.set(DetailDraft::from_incident(&inc, locale_date)),
                    Err(e) => logging::error!("failed to load incident {id}: {e}"),
                }
                loading.set(false);
            });
        }
    }

    on_cleanup(move || sequence.invalidate());

    let save = move || {
        let id = incident_id.get_value();
        if id.is_empty() || saving.get_untracked() {
            return;
        }
        saving.set(true);
        notice.set(None);
        let payload = draft.get_untracked().to_update();
        let api = api.get_value();
        spawn_local(async move {
            match api.update_incident(&id, &payload).await {
                Ok(_) => {
                    saving.set(false);
                    route.set(Route::List);
                }
                Err(e) => {
                    logging::error!("failed to save incident {id}: {e}");
                    notice.set(Some(format!("Failed to save changes: {e}")));
                    saving.set(false);
                }
            }
        });
    };

    view! {
      <div class="page detail-page">
        <h1>"Incident Detail"</h1>
        <div class="card">
          <div class="card-header">
            <h2>"Incident Tracker"</h2>
          </div>

          <Show when=move || loading.get() fallback=|| ()>
            <div class="loading">"Loading incident..."</div>
          </Show>

          <Show when=move || !loading.get() fallback=|| ()>
            <div class="form">
              <h3>{move || draft.with(|d| d.title.clone())}</h3>

              <Show when=move || notice.get().is_some() fallback=|| ()>
                <div class="notice">
                  <span>{move || notice.get().unwrap_or_default()}</span>
                  <button on:click=move |_| notice.set(None)>"Dismiss"</button>
                </div>
              </Show>

              <label>
                "Service:"
                <span class="readonly">{move || draft.with(|d| d.service.clone())}</span>
              </label>

              <label>"Severity:"</label>
              <select on:change=move |ev| {
                if let Some(sev) = Severity::parse(&event_target_value(&ev)) {
                    draft.update(|d| d.severity = sev);
                }
              }>
                <For
                  each=move || Severity::ALL
                  key=|sev| *sev
                  children=move |sev| view! {
                    <option
                      value=sev.as_str()
                      prop:selected=move || draft.with(|d| d.severity == sev)
                    >
                      {sev.as_str()}
                    </option>
                  }
                />
              </select>

              <label>"Status:"</label>
              <select on:change=move |ev| {
                if let Some(status) = Status::parse(&event_target_value(&ev)) {
                    draft.update(|d| d.status = status);
                }
              }>
                <For
                  each=move || Status::ALL
                  key=|st| *st
                  children=move |st| view! {
                    <option
                      value=st.as_str()
                      prop:selected=move || draft.with(|d| d.status == st)
                    >
                      {st.as_str()}
                    </option>
                  }
                />
              </select>

              <label>"Assigned To:"</label>
              <input
                type="text"
                prop:value=move || draft.with(|d| d.assigned_to.clone())
                on:input=move |ev| draft.update(|d| d.assigned_to = event_target_value(&ev))
              />

              <label>
                "Occurred At:"
                <span class="readonly">{move || draft.with(|d| d.occurred_at.clone())}</span>
              </label>

              <label>"Summary"</label>
              <textarea
                prop:value=move || draft.with(|d| d.summary.clone())
                on:input=move |ev| draft.update(|d| d.summary = event_target_value(&ev))
              />

              <div class="row">
                <button disabled=move || saving.get() on:click=move |_| save()>
                  {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                </button>
                <button on:click=move |_| route.set(Route::List)>"Cancel"</button>
              </div>
            </div>
          </Show>
        </div>
      </div>
    }
}
