use shared::PostFeedbackRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const MISSING_MESSAGE: &str = "Please enter a message.";

#[derive(Properties, PartialEq)]
pub struct FeedbackModalProps {
    pub api_client: ApiClient,
    pub on_close: Callback<()>,
    pub on_posted: Callback<()>,
}

#[function_component(FeedbackModal)]
pub fn feedback_modal(props: &FeedbackModalProps) -> Html {
    let name = use_state(String::new);
    let text = use_state(String::new);
    let posting = use_state(|| false);
    let error = use_state(|| Option::<String>::None);

    let on_name_input = {
        let name = name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };

    let on_text_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let on_posted = props.on_posted.clone();
        let on_close = props.on_close.clone();
        let name = name.clone();
        let text = text.clone();
        let posting = posting.clone();
        let error = error.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            if text.trim().is_empty() {
                error.set(Some(MISSING_MESSAGE.to_string()));
                return;
            }

            let request = PostFeedbackRequest {
                name: Some(name.trim().to_string()).filter(|n| !n.is_empty()),
                text: text.trim().to_string(),
            };
            let api_client = api_client.clone();
            let on_posted = on_posted.clone();
            let on_close = on_close.clone();
            let posting = posting.clone();
            let error = error.clone();

            spawn_local(async move {
                posting.set(true);
                match api_client.post_feedback(request).await {
                    Ok(response) => {
                        Logger::info_with_component("feedback", &format!("Posted {}", response.message.id));
                        on_posted.emit(());
                        on_close.emit(());
                    }
                    Err(e) => {
                        Logger::error_with_component("feedback", &format!("Failed to post feedback: {}", e));
                        error.set(Some(e));
                    }
                }
                posting.set(false);
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop" id="feedback-modal">
            <div class="modal" role="dialog" aria-labelledby="feedback-title">
                <div class="modal-header">
                    <h3 id="feedback-title">{"Share your feedback"}</h3>
                    <button class="modal-close" id="close-feedback" onclick={on_cancel.clone()}>{"×"}</button>
                </div>

                {if let Some(message) = error.as_ref() {
                    html! { <div class="form-message error">{message}</div> }
                } else { html! {} }}

                <form id="feedback-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="fb-name">{"Name (optional)"}</label>
                        <input type="text" id="fb-name" value={(*name).clone()} oninput={on_name_input} />
                    </div>
                    <div class="form-group">
                        <label for="fb-text">{"Message"}</label>
                        <textarea id="fb-text" value={(*text).clone()} oninput={on_text_input} />
                    </div>
                    <div class="modal-actions">
                        <button type="button" class="btn btn-secondary" id="cancel-feedback" onclick={on_cancel}>
                            {"Cancel"}
                        </button>
                        <button type="submit" class="btn btn-primary" disabled={*posting}>
                            {if *posting { "Posting..." } else { "Post" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
