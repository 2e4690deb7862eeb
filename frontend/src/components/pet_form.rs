use gloo::file::{futures::read_as_data_url, File};
use shared::{CreatePetRequest, PetCard, UpdatePetRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const MISSING_NAME_OR_SPECIES: &str = "Please enter at least a pet name and species.";
const PHOTO_READ_FAILED: &str = "Could not read photo file - pet saved without photo.";
const PHOTO_READ_FAILED_KEPT: &str = "Could not read photo file - previous photo kept.";

/// Notice shown when the selected photo could not be read
fn photo_read_notice(is_editing: bool) -> &'static str {
    if is_editing {
        PHOTO_READ_FAILED_KEPT
    } else {
        PHOTO_READ_FAILED
    }
}

#[derive(Properties, PartialEq)]
pub struct PetFormProps {
    pub api_client: ApiClient,
    /// Pet being edited; `None` adds a new pet
    pub editing: Option<PetCard>,
    pub on_saved: Callback<()>,
    pub on_cancel_edit: Callback<()>,
}

#[derive(Clone, Default, PartialEq)]
struct PetFields {
    name: String,
    species: String,
    dob: String,
    diet: String,
    notes: String,
}

impl PetFields {
    fn from_card(card: Option<&PetCard>) -> Self {
        match card {
            Some(card) => Self {
                name: card.pet.name.clone(),
                species: card.pet.species.clone(),
                dob: card.pet.dob.clone(),
                diet: card.pet.diet.clone(),
                notes: card.pet.notes.clone(),
            },
            None => Self::default(),
        }
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.species.trim().is_empty()
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[function_component(PetForm)]
pub fn pet_form(props: &PetFormProps) -> Html {
    let fields = use_state(|| PetFields::from_card(props.editing.as_ref()));
    let photo = use_state(|| Option::<File>::None);
    let saving = use_state(|| false);
    let form_error = use_state(|| Option::<String>::None);
    let form_notice = use_state(|| Option::<String>::None);
    let form_success = use_state(|| Option::<String>::None);
    // Bumped to clear the file input after a save
    let file_input_key = use_state(|| 0u32);

    // Reload the fields whenever a different pet is picked for editing
    {
        let fields = fields.clone();
        let photo = photo.clone();
        let form_error = form_error.clone();
        use_effect_with(props.editing.clone(), move |editing| {
            fields.set(PetFields::from_card(editing.as_ref()));
            photo.set(None);
            form_error.set(None);
            || ()
        });
    }

    let text_input = |update: fn(&mut PetFields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            update(&mut next, input.value());
            fields.set(next);
        })
    };

    let on_notes_input = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            next.notes = input.value();
            fields.set(next);
        })
    };

    let on_photo_change = {
        let photo = photo.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let selected = input.files().and_then(|files| files.get(0)).map(File::from);
            photo.set(selected);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let editing = props.editing.clone();
        let on_saved = props.on_saved.clone();
        let fields = fields.clone();
        let photo = photo.clone();
        let saving = saving.clone();
        let form_error = form_error.clone();
        let form_notice = form_notice.clone();
        let form_success = form_success.clone();
        let file_input_key = file_input_key.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            form_success.set(None);
            form_notice.set(None);

            let current = (*fields).clone();
            if !current.is_complete() {
                form_error.set(Some(MISSING_NAME_OR_SPECIES.to_string()));
                return;
            }
            form_error.set(None);

            let api_client = api_client.clone();
            let editing = editing.clone();
            let on_saved = on_saved.clone();
            let fields = fields.clone();
            let selected_photo = (*photo).clone();
            let photo = photo.clone();
            let saving = saving.clone();
            let form_error = form_error.clone();
            let form_notice = form_notice.clone();
            let form_success = form_success.clone();
            let file_input_key = file_input_key.clone();

            spawn_local(async move {
                saving.set(true);

                let mut notice = None;
                let photo_data_url = match selected_photo {
                    Some(file) => match read_as_data_url(&file).await {
                        Ok(data_url) => Some(data_url),
                        Err(e) => {
                            Logger::warn_with_component("pet_form", &format!("Photo read failed: {}", e));
                            notice = Some(photo_read_notice(editing.is_some()).to_string());
                            None
                        }
                    },
                    None => None,
                };

                let result = match &editing {
                    Some(card) => {
                        let request = UpdatePetRequest {
                            name: Some(current.name.clone()),
                            species: Some(current.species.clone()),
                            dob: Some(current.dob.clone()),
                            diet: Some(current.diet.clone()),
                            notes: Some(current.notes.clone()),
                            photo_data_url,
                        };
                        api_client.update_pet(&card.pet.id, request).await
                    }
                    None => {
                        let request = CreatePetRequest {
                            name: current.name.clone(),
                            species: current.species.clone(),
                            dob: optional(&current.dob),
                            diet: optional(&current.diet),
                            notes: optional(&current.notes),
                            photo_data_url,
                        };
                        api_client.create_pet(request).await
                    }
                };

                match result {
                    Ok(response) => {
                        Logger::info_with_component(
                            "pet_form",
                            &format!("Saved pet {}", response.pet.pet.id),
                        );
                        form_notice.set(notice.or(response.photo_notice));
                        form_success.set(Some(response.success_message));
                        if editing.is_none() {
                            fields.set(PetFields::default());
                        }
                        photo.set(None);
                        file_input_key.set(*file_input_key + 1);
                        on_saved.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("pet_form", &format!("Failed to save pet: {}", e));
                        form_error.set(Some(e));
                    }
                }

                saving.set(false);
            });
        })
    };

    let on_cancel = {
        let on_cancel_edit = props.on_cancel_edit.clone();
        Callback::from(move |_: MouseEvent| on_cancel_edit.emit(()))
    };

    let is_editing = props.editing.is_some();

    html! {
        <section class="add-pet-section">
            <h2>{if is_editing { "Edit Pet" } else { "Add a Pet" }}</h2>

            {if let Some(error) = form_error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            {if let Some(notice) = form_notice.as_ref() {
                html! { <div class="form-message info">{notice}</div> }
            } else { html! {} }}

            {if let Some(success) = form_success.as_ref() {
                html! { <div class="form-message success">{success}</div> }
            } else { html! {} }}

            <form id="add-pet-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="petname">{"Pet name"}</label>
                    <input type="text" id="petname" value={fields.name.clone()}
                        oninput={text_input(|f, v| f.name = v)} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label for="species">{"Species"}</label>
                    <input type="text" id="species" value={fields.species.clone()}
                        oninput={text_input(|f, v| f.species = v)} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label for="dob">{"Date of birth"}</label>
                    <input type="date" id="dob" value={fields.dob.clone()}
                        oninput={text_input(|f, v| f.dob = v)} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label for="diet">{"Diet"}</label>
                    <input type="text" id="diet" value={fields.diet.clone()}
                        oninput={text_input(|f, v| f.diet = v)} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label for="notes">{"Notes"}</label>
                    <textarea id="notes" value={fields.notes.clone()}
                        oninput={on_notes_input} disabled={*saving} />
                </div>
                <div class="form-group">
                    <label for="photo">
                        {if is_editing { "New photo (leave empty to keep the current one)" } else { "Photo" }}
                    </label>
                    <input key={*file_input_key} type="file" id="photo" accept="image/*"
                        onchange={on_photo_change} disabled={*saving} />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*saving}>
                    {match (*saving, is_editing) {
                        (true, _) => "Saving...",
                        (false, true) => "Save Changes",
                        (false, false) => "Add Pet",
                    }}
                </button>
                {if is_editing {
                    html! { <button type="button" class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button> }
                } else { html! {} }}
            </form>
        </section>
    }
}
