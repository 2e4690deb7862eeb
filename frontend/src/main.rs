use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::header::Header;
use components::health_log_page::HealthLogPage;
use components::registration_form::RegistrationForm;
use components::roster_page::RosterPage;
use components::survey_page::SurveyPage;
use services::api::ApiClient;

/// Which page is showing. Mirrored in the URL hash so reloads and links land
/// on the same page.
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    Roster,
    HealthLog(String),
    Survey,
    Register,
}

impl Page {
    /// Parse a location hash such as `#/pets/pet-1/health-log`
    pub fn from_hash(hash: &str) -> Self {
        let path = hash.trim_start_matches('#').trim_start_matches('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["pets", pet_id, "health-log"] => Page::HealthLog(pet_id.to_string()),
            ["survey"] => Page::Survey,
            ["register"] => Page::Register,
            _ => Page::Roster,
        }
    }

    pub fn to_hash(&self) -> String {
        match self {
            Page::Roster => "#/pets".to_string(),
            Page::HealthLog(pet_id) => format!("#/pets/{}/health-log", pet_id),
            Page::Survey => "#/survey".to_string(),
            Page::Register => "#/register".to_string(),
        }
    }
}

fn current_page() -> Page {
    let hash = gloo::utils::window().location().hash().unwrap_or_default();
    Page::from_hash(&hash)
}

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());
    let page = use_state(current_page);

    let navigate = {
        let page = page.clone();
        Callback::from(move |next: Page| {
            let _ = gloo::utils::window().location().set_hash(&next.to_hash());
            page.set(next);
        })
    };

    let content = match (*page).clone() {
        Page::Roster => html! {
            <RosterPage api_client={(*api_client).clone()} on_navigate={navigate.clone()} />
        },
        Page::HealthLog(pet_id) => html! {
            <HealthLogPage
                api_client={(*api_client).clone()}
                pet_id={pet_id}
                on_navigate={navigate.clone()}
            />
        },
        Page::Survey => html! { <SurveyPage api_client={(*api_client).clone()} /> },
        Page::Register => html! { <RegistrationForm api_client={(*api_client).clone()} /> },
    };

    html! {
        <>
            <Header current_page={(*page).clone()} on_navigate={navigate} />
            <main class="container">
                {content}
            </main>
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
