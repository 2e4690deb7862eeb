use shared::PetCard as PetCardData;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::pet_card::PetCard;
use super::pet_form::PetForm;
use crate::hooks::use_pets::use_pets;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct RosterPageProps {
    pub api_client: ApiClient,
    pub on_navigate: Callback<Page>,
}

#[function_component(RosterPage)]
pub fn roster_page(props: &RosterPageProps) -> Html {
    let pets = use_pets(&props.api_client);
    let editing = use_state(|| Option::<PetCardData>::None);
    let delete_error = use_state(|| Option::<String>::None);

    let on_health_log = {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |pet_id: String| on_navigate.emit(Page::HealthLog(pet_id)))
    };

    let on_edit = {
        let editing = editing.clone();
        Callback::from(move |card: PetCardData| editing.set(Some(card)))
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let refresh = pets.refresh.clone();
        let editing = editing.clone();
        let delete_error = delete_error.clone();
        Callback::from(move |card: PetCardData| {
            let confirmed = gloo::dialogs::confirm(&format!(
                "Delete {} and all of their health log entries?",
                card.pet.name
            ));
            if !confirmed {
                return;
            }

            let api_client = api_client.clone();
            let refresh = refresh.clone();
            let editing = editing.clone();
            let delete_error = delete_error.clone();
            spawn_local(async move {
                match api_client.delete_pet(&card.pet.id).await {
                    Ok(()) => {
                        Logger::info_with_component("roster", &format!("Deleted pet {}", card.pet.id));
                        if editing.as_ref().map(|e| e.pet.id == card.pet.id).unwrap_or(false) {
                            editing.set(None);
                        }
                        delete_error.set(None);
                        refresh.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("roster", &format!("Failed to delete pet: {}", e));
                        delete_error.set(Some(e));
                    }
                }
            });
        })
    };

    let on_saved = {
        let refresh = pets.refresh.clone();
        let editing = editing.clone();
        Callback::from(move |_| {
            editing.set(None);
            refresh.emit(());
        })
    };

    let on_cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_| editing.set(None))
    };

    let list = if pets.state.loading && pets.state.pets.is_empty() {
        html! { <p>{"Loading pets..."}</p> }
    } else if let Some(error) = pets.state.error.as_ref() {
        html! { <div class="form-message error">{format!("Could not load pets: {}", error)}</div> }
    } else if pets.state.pets.is_empty() {
        html! { <p>{"No pets yet, add one on the right."}</p> }
    } else {
        html! {
            {for pets.state.pets.iter().map(|card| html! {
                <PetCard
                    key={card.pet.id.clone()}
                    card={card.clone()}
                    on_health_log={on_health_log.clone()}
                    on_edit={on_edit.clone()}
                    on_delete={on_delete.clone()}
                />
            })}
        }
    };

    html! {
        <div class="roster-page">
            <section class="pet-list">
                <h2>{"My Animals"}</h2>
                {if let Some(error) = delete_error.as_ref() {
                    html! { <div class="form-message error">{error}</div> }
                } else { html! {} }}
                {list}
            </section>
            <PetForm
                api_client={props.api_client.clone()}
                editing={(*editing).clone()}
                on_saved={on_saved}
                on_cancel_edit={on_cancel_edit}
            />
        </div>
    }
}
