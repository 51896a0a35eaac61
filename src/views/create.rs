use crate::api::ApiClient;
use crate::app::Route;
use crate::dto::{Service, Severity, Status};
use crate::state::CreateDraft;
use leptos::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn CreateIncident() -> impl IntoView {
    let api = store_value(expect_context::<ApiClient>());
    let route = expect_context::<RwSignal<Route>>();

    let draft = create_rw_signal(CreateDraft::default());
    let submitting = create_rw_signal(false);
    let notice = create_rw_signal(None::<String>);

    let submit = move || {
        // One creation request at a time; the button is also disabled while
        // a submission is outstanding.
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        notice.set(None);
        let body = draft.get_untracked().to_request();
        let api = api.get_value();
        spawn_local(async move {
            match api.create_incident(&body).await {
                Ok(_) => {
                    submitting.set(false);
                    draft.set(CreateDraft::default());
                    route.set(Route::List);
                }
                Err(e) => {
                    notice.set(Some(format!("Failed to create incident: {e}")));
                    submitting.set(false);
                }
            }
        });
    };

    view! {
      <div class="page create-page">
        <h1>"Create Incident"</h1>
        <div class="card">
          <div class="card-header">
            <h2>"Incident Tracker"</h2>
          </div>
          <div class="form">
            <h3>"Create New Incident"</h3>

            <Show when=move || notice.get().is_some() fallback=|| ()>
              <div class="notice">
                <span>{move || notice.get().unwrap_or_default()}</span>
                <button on:click=move |_| notice.set(None)>"Dismiss"</button>
              </div>
            </Show>

            <label>"Title"</label>
            <input
              type="text"
              placeholder="Issue Title..."
              prop:value=move || draft.with(|d| d.title.clone())
              on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
            />

            <label>"Service"</label>
            <select
              prop:value=move || draft.with(|d| d.service.clone())
              on:change=move |ev| draft.update(|d| d.service = event_target_value(&ev))
            >
              <option value="">"Select Service"</option>
              <For
                each=move || Service::ALL
                key=|svc| *svc
                children=move |svc| view! {
                  <option value=svc.as_str()>{svc.as_str()}</option>
                }
              />
            </select>

            <label>"Severity"</label>
            <div class="row">
              <For
                each=move || Severity::ALL
                key=|sev| *sev
                children=move |sev| view! {
                  <label>
                    <input
                      type="radio"
                      name="severity"
                      prop:checked=move || draft.with(|d| d.severity == sev)
                      on:change=move |_| draft.update(|d| d.severity = sev)
                    />
                    <span>{sev.as_str()}</span>
                  </label>
                }
              />
            </div>

            <label>"Status"</label>
            <select
              prop:value=move || draft.with(|d| d.status.clone())
              on:change=move |ev| draft.update(|d| d.status = event_target_value(&ev))
            >
              <option value="">"Select Status"</option>
              <For
                each=move || Status::ALL
                key=|st| *st
                children=move |st| view! {
                  <option value=st.as_str()>{st.as_str()}</option>
                }
              />
            </select>

            <label>"Owner" <span class="optional">"Optional"</span></label>
            <input
              type="text"
              prop:value=move || draft.with(|d| d.owner.clone())
              on:input=move |ev| draft.update(|d| d.owner = event_target_value(&ev))
            />

            <label>"Summary"</label>
            <textarea
              placeholder="Describe the incident..."
              prop:value=move || draft.with(|d| d.summary.clone())
              on:input=move |ev| draft.update(|d| d.summary = event_target_value(&ev))
            />

            <div class="row">
              <button disabled=move || submitting.get() on:click=move |_| submit()>
                {move || if submitting.get() { "Creating..." } else { "Create Incident" }}
              </button>
              <button on:click=move |_| draft.set(CreateDraft::default())>"Cancel"</button>
            </div>
          </div>
        </div>
      </div>
    }
}
