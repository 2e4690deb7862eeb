use yew::prelude::*;
use shared::PetCard;
use wasm_bindgen_futures::spawn_local;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone)]
pub struct PetsState {
    pub pets: Vec<PetCard>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct UsePetsResult {
    pub state: PetsState,
    pub refresh: Callback<()>,
}

/// Loads the roster once on mount and again whenever `refresh` is emitted
#[hook]
pub fn use_pets(api_client: &ApiClient) -> UsePetsResult {
    let pets = use_state(Vec::<PetCard>::new);
    let loading = use_state(|| true);
    let error = use_state(|| Option::<String>::None);

    let refresh = {
        let api_client = api_client.clone();
        let pets = pets.clone();
        let loading = loading.clone();
        let error = error.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let pets = pets.clone();
            let loading = loading.clone();
            let error = error.clone();

            spawn_local(async move {
                loading.set(true);

                match api_client.list_pets().await {
                    Ok(response) => {
                        pets.set(response.pets);
                        error.set(None);
                    }
                    Err(e) => {
                        Logger::error_with_component("use_pets", &format!("Failed to load pets: {}", e));
                        error.set(Some(e));
                    }
                }

                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    UsePetsResult {
        state: PetsState {
            pets: (*pets).clone(),
            loading: *loading,
            error: (*error).clone(),
        },
        refresh,
    }
}
