pub mod use_pets;
