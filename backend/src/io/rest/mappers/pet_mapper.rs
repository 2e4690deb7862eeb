//! backend/src/io/rest/mappers/pet_mapper.rs

use crate::domain::models::pet::Pet as DomainPet;
use crate::domain::PetChange;
use shared::{PetCard, PetListResponse, PetResponse};

/// Mapper to convert domain Pet models into the roster DTOs.
pub struct PetMapper;

impl PetMapper {
    pub fn to_card(domain: DomainPet) -> PetCard {
        let photo_src = domain.photo_src();
        PetCard {
            pet: domain.into(),
            photo_src,
        }
    }

    pub fn to_pet_list_dto(domain_pets: Vec<DomainPet>) -> PetListResponse {
        PetListResponse {
            pets: domain_pets.into_iter().map(Self::to_card).collect(),
        }
    }

    pub fn to_pet_response_dto(change: PetChange, message: &str) -> PetResponse {
        PetResponse {
            pet: Self::to_card(change.pet),
            success_message: message.to_string(),
            photo_notice: change.photo_notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_resolves_photo() {
        let stored = shared::Pet {
            id: "pet-1".to_string(),
            name: "Lincoln".to_string(),
            species: "Dog".to_string(),
            dob: String::new(),
            diet: "Kibble".to_string(),
            notes: String::new(),
            photo: "dog.jpg".to_string(),
        };

        let card = PetMapper::to_card(DomainPet::from(stored));

        assert_eq!(card.photo_src, "images/dog.jpg");
        assert_eq!(card.pet.photo, "dog.jpg");
    }

    #[test]
    fn test_list_keeps_roster_order() {
        let pets = ["Lincoln", "Charlie"].map(|name| {
            DomainPet::from(shared::Pet {
                id: format!("pet-{}", name),
                name: name.to_string(),
                species: "Dog".to_string(),
                dob: String::new(),
                diet: String::new(),
                notes: String::new(),
                photo: String::new(),
            })
        });

        let list = PetMapper::to_pet_list_dto(pets.to_vec());

        assert_eq!(list.pets[1].pet.name, "Charlie");
        assert_eq!(list.pets[0].photo_src, "logo.png");
    }
}
