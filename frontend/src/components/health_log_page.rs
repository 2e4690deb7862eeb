use shared::{HealthLogEntryRequest, HealthLogEntryRow, HealthLogMutationResponse, HealthLogResponse};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::Page;

const MISSING_DATE_OR_NOTE: &str = "Please add a date and a note.";

#[derive(Properties, PartialEq)]
pub struct HealthLogPageProps {
    pub api_client: ApiClient,
    pub pet_id: String,
    pub on_navigate: Callback<Page>,
}

/// Date and note being typed, either for a new entry or for the entry at `editing`
#[derive(Clone, Default, PartialEq)]
struct EntryDraft {
    date: String,
    text: String,
    /// Storage index of the entry being edited
    editing: Option<usize>,
}

impl EntryDraft {
    fn for_row(row: &HealthLogEntryRow) -> Self {
        Self {
            date: row.date.clone(),
            text: row.text.clone(),
            editing: Some(row.index),
        }
    }

    fn to_request(&self) -> Option<HealthLogEntryRequest> {
        if self.date.trim().is_empty() || self.text.trim().is_empty() {
            return None;
        }
        Some(HealthLogEntryRequest {
            date: self.date.trim().to_string(),
            text: self.text.trim().to_string(),
        })
    }
}

#[function_component(HealthLogPage)]
pub fn health_log_page(props: &HealthLogPageProps) -> Html {
    let log = use_state(|| Option::<HealthLogResponse>::None);
    let load_error = use_state(|| Option::<String>::None);
    let draft = use_state(EntryDraft::default);
    let form_error = use_state(|| Option::<String>::None);
    let form_success = use_state(|| Option::<String>::None);

    // Load the pet and its log whenever the pet changes
    {
        let api_client = props.api_client.clone();
        let log = log.clone();
        let load_error = load_error.clone();
        let draft = draft.clone();
        use_effect_with(props.pet_id.clone(), move |pet_id| {
            let pet_id = pet_id.clone();
            draft.set(EntryDraft::default());
            spawn_local(async move {
                match api_client.get_health_log(&pet_id).await {
                    Ok(response) => {
                        log.set(Some(response));
                        load_error.set(None);
                    }
                    Err(e) => {
                        Logger::warn_with_component("health_log", &format!("Failed to load log for {}: {}", pet_id, e));
                        log.set(None);
                        load_error.set(Some(e));
                    }
                }
            });
            || ()
        });
    }

    // Apply the entries returned by a mutation without refetching the pet
    let apply_mutation = {
        let log = log.clone();
        let form_success = form_success.clone();
        Callback::from(move |response: HealthLogMutationResponse| {
            if let Some(current) = (*log).clone() {
                log.set(Some(HealthLogResponse {
                    pet: current.pet,
                    entries: response.entries,
                }));
            }
            form_success.set(Some(response.success_message));
        })
    };

    let on_date_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(EntryDraft { date: input.value(), ..(*draft).clone() });
        })
    };

    let on_text_input = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(EntryDraft { text: input.value(), ..(*draft).clone() });
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let pet_id = props.pet_id.clone();
        let draft = draft.clone();
        let form_error = form_error.clone();
        let apply_mutation = apply_mutation.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(request) = draft.to_request() else {
                form_error.set(Some(MISSING_DATE_OR_NOTE.to_string()));
                return;
            };
            form_error.set(None);

            let api_client = api_client.clone();
            let pet_id = pet_id.clone();
            let editing = draft.editing;
            let draft = draft.clone();
            let form_error = form_error.clone();
            let apply_mutation = apply_mutation.clone();

            spawn_local(async move {
                let result = match editing {
                    Some(index) => api_client.update_health_log_entry(&pet_id, index, request).await,
                    None => api_client.add_health_log_entry(&pet_id, request).await,
                };

                match result {
                    Ok(response) => {
                        apply_mutation.emit(response);
                        draft.set(EntryDraft::default());
                    }
                    Err(e) => {
                        Logger::error_with_component("health_log", &format!("Failed to save entry: {}", e));
                        form_error.set(Some(e));
                    }
                }
            });
        })
    };

    let on_edit = {
        let draft = draft.clone();
        let form_success = form_success.clone();
        Callback::from(move |row: HealthLogEntryRow| {
            form_success.set(None);
            draft.set(EntryDraft::for_row(&row));
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let pet_id = props.pet_id.clone();
        let draft = draft.clone();
        let form_error = form_error.clone();
        let apply_mutation = apply_mutation.clone();

        Callback::from(move |index: usize| {
            let api_client = api_client.clone();
            let pet_id = pet_id.clone();
            let draft = draft.clone();
            let form_error = form_error.clone();
            let apply_mutation = apply_mutation.clone();

            spawn_local(async move {
                match api_client.delete_health_log_entry(&pet_id, index).await {
                    Ok(response) => {
                        // Indices after the removed entry shift down by one
                        if draft.editing.is_some() {
                            draft.set(EntryDraft::default());
                        }
                        apply_mutation.emit(response);
                    }
                    Err(e) => {
                        Logger::error_with_component("health_log", &format!("Failed to delete entry: {}", e));
                        form_error.set(Some(e));
                    }
                }
            });
        })
    };

    let on_cancel_edit = {
        let draft = draft.clone();
        Callback::from(move |_: MouseEvent| draft.set(EntryDraft::default()))
    };

    let on_back = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(Page::Roster))
    };

    let Some(current) = (*log).clone() else {
        let title = if load_error.is_some() { "Pet not found" } else { "Health Log" };
        return html! {
            <section class="health-log-page">
                <h2 id="pet-title">{title}</h2>
                <button class="btn btn-secondary" onclick={on_back}>{"Back to My Animals"}</button>
            </section>
        };
    };

    let pet = &current.pet.pet;
    let is_editing = draft.editing.is_some();

    html! {
        <section class="health-log-page">
            <h2 id="pet-title">{format!("Health Log - {}", pet.name)}</h2>
            <button class="btn btn-secondary" onclick={on_back}>{"Back to My Animals"}</button>

            <div id="pet-details" class="pet-card">
                <img src={current.pet.photo_src.clone()} alt={format!("{} photo", pet.name)} />
                <div class="pet-info">
                    <strong>{&pet.name}</strong><br />
                    <b>{"Species: "}</b>{&pet.species}<br />
                    {if pet.dob.is_empty() {
                        html! {}
                    } else {
                        html! { <><b>{"DOB: "}</b>{&pet.dob}<br /></> }
                    }}
                    <b>{"Diet: "}</b>{&pet.diet}<br />
                    <b>{"Notes: "}</b>{&pet.notes}
                </div>
            </div>

            {if let Some(error) = form_error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}
            {if let Some(success) = form_success.as_ref() {
                html! { <div class="form-message success">{success}</div> }
            } else { html! {} }}

            <form id="add-log-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="log-date">{"Date"}</label>
                    <input type="date" id="log-date" value={draft.date.clone()} oninput={on_date_input} />
                </div>
                <div class="form-group">
                    <label for="log-text">{"Note"}</label>
                    <textarea id="log-text" value={draft.text.clone()} oninput={on_text_input} />
                </div>
                <button type="submit" class="btn btn-primary">
                    {if is_editing { "Save Entry" } else { "Add Entry" }}
                </button>
                {if is_editing {
                    html! { <button type="button" class="btn btn-secondary" onclick={on_cancel_edit}>{"Cancel"}</button> }
                } else { html! {} }}
            </form>

            <div id="log-list">
                {if current.entries.is_empty() {
                    html! { <p>{"No entries yet."}</p> }
                } else {
                    html! {
                        {for current.entries.iter().map(|row| {
                            let on_edit = {
                                let on_edit = on_edit.clone();
                                let row = row.clone();
                                Callback::from(move |_: MouseEvent| on_edit.emit(row.clone()))
                            };
                            let on_delete = {
                                let on_delete = on_delete.clone();
                                let index = row.index;
                                Callback::from(move |_: MouseEvent| on_delete.emit(index))
                            };
                            html! {
                                <div class="health-log-entry" key={row.index}>
                                    <div class="entry-meta"><strong>{&row.date}</strong></div>
                                    <div class="entry-text">{&row.text}</div>
                                    <div class="entry-actions">
                                        <button class="btn btn-secondary" onclick={on_edit}>{"Edit"}</button>
                                        <button class="btn btn-danger" onclick={on_delete}>{"Delete"}</button>
                                    </div>
                                </div>
                            }
                        })}
                    }
                }}
            </div>
        </section>
    }
}
