use shared::{RegistrationError, RegistrationRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct RegistrationFormProps {
    pub api_client: ApiClient,
}

/// Where the form currently stands after the last submit
#[derive(Clone, PartialEq)]
enum Outcome {
    Idle,
    Rejected(Vec<RegistrationError>),
    Accepted(String),
    Failed(String),
}

#[function_component(RegistrationForm)]
pub fn registration_form(props: &RegistrationFormProps) -> Html {
    let request = use_state(|| RegistrationRequest {
        username: String::new(),
        email: String::new(),
        password: String::new(),
        confirm_password: String::new(),
    });
    let outcome = use_state(|| Outcome::Idle);

    let field_input = |update: fn(&mut RegistrationRequest, String)| {
        let request = request.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*request).clone();
            update(&mut next, input.value());
            request.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let request = request.clone();
        let outcome = outcome.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let api_client = api_client.clone();
            let submitted = (*request).clone();
            let outcome = outcome.clone();

            spawn_local(async move {
                let username = submitted.username.trim().to_string();
                match api_client.validate_registration(submitted).await {
                    Ok(result) if result.is_valid => {
                        Logger::info_with_component("registration", &format!("Accepted {}", username));
                        outcome.set(Outcome::Accepted(format!("Welcome aboard, {}!", username)));
                    }
                    Ok(result) => outcome.set(Outcome::Rejected(result.errors)),
                    Err(e) => {
                        Logger::error_with_component("registration", &format!("Validation failed: {}", e));
                        outcome.set(Outcome::Failed(e));
                    }
                }
            });
        })
    };

    html! {
        <section class="registration-section">
            <h2>{"Create an account"}</h2>

            {match &*outcome {
                Outcome::Idle => html! {},
                Outcome::Rejected(errors) => html! {
                    <div class="form-message error" id="registration-errors">
                        <ul>
                            {for errors.iter().map(|error| html! { <li>{error.message()}</li> })}
                        </ul>
                    </div>
                },
                Outcome::Accepted(message) => html! { <div class="form-message success">{message}</div> },
                Outcome::Failed(message) => html! { <div class="form-message error">{message}</div> },
            }}

            <form id="registration-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="username">{"Username"}</label>
                    <input type="text" id="username" value={request.username.clone()}
                        oninput={field_input(|r, v| r.username = v)} />
                </div>
                <div class="form-group">
                    <label for="email">{"Email"}</label>
                    <input type="email" id="email" value={request.email.clone()}
                        oninput={field_input(|r, v| r.email = v)} />
                </div>
                <div class="form-group">
                    <label for="password">{"Password"}</label>
                    <input type="password" id="password" value={request.password.clone()}
                        oninput={field_input(|r, v| r.password = v)} />
                </div>
                <div class="form-group">
                    <label for="confirm-password">{"Confirm password"}</label>
                    <input type="password" id="confirm-password" value={request.confirm_password.clone()}
                        oninput={field_input(|r, v| r.confirm_password = v)} />
                </div>
                <button type="submit" class="btn btn-primary">{"Register"}</button>
            </form>
        </section>
    }
}
