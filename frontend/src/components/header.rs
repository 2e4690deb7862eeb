use yew::prelude::*;
use crate::Page;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_page: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let nav_link = |label: &'static str, target: Page| {
        let active = match (&props.current_page, &target) {
            (Page::HealthLog(_), Page::Roster) => true,
            (current, target) => current == target,
        };
        let on_navigate = props.on_navigate.clone();
        html! {
            <a
                href={target.to_hash()}
                class={classes!("nav-link", active.then_some("active"))}
                onclick={Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    on_navigate.emit(target.clone());
                })}
            >
                {label}
            </a>
        }
    };

    html! {
        <header class="header">
            <div class="container">
                <h1>
                    <img src="logo.png" alt="" class="header-logo" />
                    {"Creature Comfort"}
                </h1>
                <nav class="header-nav">
                    {nav_link("My Animals", Page::Roster)}
                    {nav_link("Survey", Page::Survey)}
                    {nav_link("Register", Page::Register)}
                </nav>
            </div>
        </header>
    }
}
