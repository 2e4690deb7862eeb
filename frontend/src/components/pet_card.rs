use yew::prelude::*;
use shared::PetCard as PetCardData;

#[derive(Properties, PartialEq)]
pub struct PetCardProps {
    pub card: PetCardData,
    pub on_health_log: Callback<String>,
    pub on_edit: Callback<PetCardData>,
    pub on_delete: Callback<PetCardData>,
}

#[function_component(PetCard)]
pub fn pet_card(props: &PetCardProps) -> Html {
    let pet = &props.card.pet;

    let on_health_log = {
        let callback = props.on_health_log.clone();
        let pet_id = pet.id.clone();
        Callback::from(move |_: MouseEvent| callback.emit(pet_id.clone()))
    };
    let on_edit = {
        let callback = props.on_edit.clone();
        let card = props.card.clone();
        Callback::from(move |_: MouseEvent| callback.emit(card.clone()))
    };
    let on_delete = {
        let callback = props.on_delete.clone();
        let card = props.card.clone();
        Callback::from(move |_: MouseEvent| callback.emit(card.clone()))
    };

    html! {
        <div class="pet-card">
            <img src={props.card.photo_src.clone()} alt={format!("{} photo", pet.name)} />
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
            <div class="pet-actions">
                <button class="health-log-btn" onclick={on_health_log}>{"Health Log"}</button>
                <button class="btn btn-secondary" onclick={on_edit}>{"Edit"}</button>
                <button class="btn btn-danger" onclick={on_delete}>{"Delete"}</button>
            </div>
        </div>
    }
}
