use chrono::DateTime;
use gloo::timers::callback::Timeout;
use shared::{FeedbackMessage, SubmitSurveyRequest};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::feedback_modal::FeedbackModal;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const MISSING_RATING: &str = "Please select a satisfaction rating.";
const FAVORITE_OPTIONS: [&str; 4] = ["My Animals", "Health Log", "Paw Facts", "Community Feedback"];
const STATUS_CLEAR_MS: u32 = 5_000;

/// Format a stored RFC 3339 timestamp for the feedback preview
fn display_timestamp(date: &str) -> String {
    DateTime::parse_from_rfc3339(date)
        .map(|parsed| parsed.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[function_component(SurveyPage)]
pub fn survey_page(props: &SurveyPageProps) -> Html {
    let rating = use_state(|| 0u8);
    let favorite = use_state(String::new);
    let suggestions = use_state(String::new);
    let status = use_state(|| Option::<String>::None);
    let error = use_state(|| Option::<String>::None);
    let feedback = use_state(Vec::<FeedbackMessage>::new);
    let feedback_open = use_state(|| false);
    // Kept alive so the status message clears itself
    let status_timer = use_mut_ref(|| Option::<Timeout>::None);

    let refresh_feedback = {
        let api_client = props.api_client.clone();
        let feedback = feedback.clone();
        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let feedback = feedback.clone();
            spawn_local(async move {
                match api_client.list_feedback().await {
                    Ok(response) => feedback.set(response.messages),
                    Err(e) => Logger::error_with_component("survey", &format!("Failed to load feedback: {}", e)),
                }
            });
        })
    };

    {
        let refresh_feedback = refresh_feedback.clone();
        use_effect_with((), move |_| {
            refresh_feedback.emit(());
            || ()
        });
    }

    let on_rate = {
        let rating = rating.clone();
        Callback::from(move |value: u8| rating.set(value))
    };

    let on_favorite_change = {
        let favorite = favorite.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            favorite.set(select.value());
        })
    };

    let on_suggestions_input = {
        let suggestions = suggestions.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            suggestions.set(input.value());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let rating = rating.clone();
        let favorite = favorite.clone();
        let suggestions = suggestions.clone();
        let status = status.clone();
        let error = error.clone();
        let status_timer = status_timer.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if *rating == 0 {
                error.set(Some(MISSING_RATING.to_string()));
                return;
            }
            error.set(None);

            let request = SubmitSurveyRequest {
                satisfaction: rating.to_string(),
                favorite: Some((*favorite).clone()).filter(|f| !f.is_empty()),
                suggestions: Some(suggestions.trim().to_string()).filter(|s| !s.is_empty()),
            };
            let api_client = api_client.clone();
            let rating = rating.clone();
            let favorite = favorite.clone();
            let suggestions = suggestions.clone();
            let status = status.clone();
            let error = error.clone();
            let status_timer = status_timer.clone();

            spawn_local(async move {
                match api_client.submit_survey(request).await {
                    Ok(response) => {
                        Logger::info_with_component("survey", &format!("Recorded {}", response.response.id));
                        status.set(Some(response.success_message));
                        rating.set(0);
                        favorite.set(String::new());
                        suggestions.set(String::new());

                        let status = status.clone();
                        *status_timer.borrow_mut() = Some(Timeout::new(STATUS_CLEAR_MS, move || status.set(None)));
                    }
                    Err(e) => {
                        Logger::error_with_component("survey", &format!("Failed to submit survey: {}", e));
                        error.set(Some(e));
                    }
                }
            });
        })
    };

    let open_feedback = {
        let feedback_open = feedback_open.clone();
        Callback::from(move |_: MouseEvent| feedback_open.set(true))
    };
    let close_feedback = {
        let feedback_open = feedback_open.clone();
        Callback::from(move |_| feedback_open.set(false))
    };

    html! {
        <div class="survey-page">
            <section class="survey-section">
                <h2>{"How are we doing?"}</h2>

                {if let Some(message) = error.as_ref() {
                    html! { <div class="form-message error">{message}</div> }
                } else { html! {} }}
                {if let Some(message) = status.as_ref() {
                    html! { <div class="form-message success" id="survey-status">{message}</div> }
                } else { html! {} }}

                <form id="survey-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label>{"Overall satisfaction"}</label>
                        <div id="rating-stars" class="rating-stars">
                            {for (1..=5u8).map(|value| {
                                let on_rate = on_rate.clone();
                                html! {
                                    <span
                                        class={classes!("star", (value <= *rating).then_some("selected"))}
                                        role="button"
                                        tabindex="0"
                                        aria-label={format!("{} stars", value)}
                                        onclick={Callback::from(move |_: MouseEvent| on_rate.emit(value))}
                                    >
                                        {"★"}
                                    </span>
                                }
                            })}
                        </div>
                    </div>
                    <div class="form-group">
                        <label for="favorite">{"Favorite feature"}</label>
                        <select id="favorite" onchange={on_favorite_change}>
                            <option value="" selected={favorite.is_empty()}>{"Pick one"}</option>
                            {for FAVORITE_OPTIONS.iter().map(|option| html! {
                                <option value={*option} selected={*favorite == *option}>{*option}</option>
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="suggestions">{"Suggestions"}</label>
                        <textarea id="suggestions" value={(*suggestions).clone()} oninput={on_suggestions_input} />
                    </div>
                    <button type="submit" class="btn btn-primary" id="submit-btn">{"Submit"}</button>
                </form>
            </section>

            <section class="feedback-section">
                <div class="feedback-header">
                    <h2>{"Community Feedback"}</h2>
                    <button class="btn btn-secondary" id="open-feedback" onclick={open_feedback}>
                        {"Leave feedback"}
                    </button>
                </div>
                <div id="feedback-preview">
                    {if feedback.is_empty() {
                        html! { <p class="small-muted">{"No community messages yet, be the first to post!"}</p> }
                    } else {
                        html! {
                            {for feedback.iter().map(|message| html! {
                                <div class="feedback-item" key={message.id.clone()}>
                                    {if message.name.is_empty() {
                                        html! {}
                                    } else {
                                        html! { <><strong>{&message.name}</strong>{" • "}</> }
                                    }}
                                    <span class="small-muted">{display_timestamp(&message.date)}</span>
                                    <div>{&message.text}</div>
                                </div>
                            })}
                        }
                    }}
                </div>
            </section>

            {if *feedback_open {
                html! {
                    <FeedbackModal
                        api_client={props.api_client.clone()}
                        on_close={close_feedback}
                        on_posted={refresh_feedback.clone()}
                    />
                }
            } else { html! {} }}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SurveyPageProps {
    pub api_client: ApiClient,
}
