pub mod pet;
pub mod species;
