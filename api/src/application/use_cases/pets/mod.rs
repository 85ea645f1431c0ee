pub mod create_pet;
pub mod delete_pet;
pub mod list_pets;
pub mod update_pet;
