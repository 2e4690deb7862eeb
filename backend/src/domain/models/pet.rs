//! Domain model for a pet profile

use crate::domain::photo::PetPhoto;

/// A pet on the roster.
///
/// Unlike the stored DTO, the photo is classified and an unknown date of
/// birth is `None` rather than an empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct Pet {
    pub id: String,
    pub name: String,
    pub species: String,
    pub dob: Option<String>,
    pub diet: String,
    pub notes: String,
    pub photo: PetPhoto,
}

impl Pet {
    /// Renderable photo source
    pub fn photo_src(&self) -> String {
        self.photo.src()
    }
}

impl From<shared::Pet> for Pet {
    fn from(stored: shared::Pet) -> Self {
        Self {
            id: stored.id,
            name: stored.name,
            species: stored.species,
            dob: Some(stored.dob).filter(|dob| !dob.trim().is_empty()),
            diet: stored.diet,
            notes: stored.notes,
            photo: PetPhoto::parse(&stored.photo),
        }
    }
}

impl From<Pet> for shared::Pet {
    fn from(pet: Pet) -> Self {
        Self {
            photo: pet.photo.to_stored(),
            id: pet.id,
            name: pet.name,
            species: pet.species,
            dob: pet.dob.unwrap_or_default(),
            diet: pet.diet,
            notes: pet.notes,
        }
    }
}
