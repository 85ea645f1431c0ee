use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::pets::species::{CAT_SPECIES, DOG_SPECIES};
use crate::domain::{ValidationError, bounded_text};

pub const PET_NAME_MAX_CHARS: usize = 50;
pub const BIRTH_DAY_MAX_CHARS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
}

impl PetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "dog",
            PetType::Cat => "cat",
        }
    }

    pub fn species(&self) -> &'static [&'static str] {
        match self {
            PetType::Dog => DOG_SPECIES,
            PetType::Cat => CAT_SPECIES,
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dog" => Ok(PetType::Dog),
            "cat" => Ok(PetType::Cat),
            other => Err(ValidationError::new(format!("unknown pet type: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub birth_day: String,
    pub pet_type: PetType,
    pub species: String,
    pub image_key: String,
    pub owner_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Validated form of the user-editable pet attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetAttributes {
    pub name: String,
    pub pet_type: PetType,
    pub species: String,
    pub birth_day: String,
}

impl PetAttributes {
    pub fn parse(
        name: &str,
        pet_type: &str,
        species: &str,
        birth_day: &str,
    ) -> Result<Self, ValidationError> {
        let name = bounded_text(name, "name", PET_NAME_MAX_CHARS)?;
        let pet_type: PetType = pet_type.parse()?;
        let species = validate_species(pet_type, species)?;
        let birth_day = bounded_text(birth_day, "birthDay", BIRTH_DAY_MAX_CHARS)?;
        Ok(Self {
            name,
            pet_type,
            species,
            birth_day,
        })
    }
}

pub fn validate_species(pet_type: PetType, raw: &str) -> Result<String, ValidationError> {
    let species = raw.trim().to_ascii_lowercase();
    if species.is_empty() {
        return Err(ValidationError::new("species is required"));
    }
    if !pet_type.species().contains(&species.as_str()) {
        return Err(ValidationError::new(format!(
            "{species} is not a valid species for a {pet_type}"
        )));
    }
    Ok(species)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pet_type_parses_case_insensitively() {
        assert_eq!("Dog".parse::<PetType>().unwrap(), PetType::Dog);
        assert_eq!(" cat ".parse::<PetType>().unwrap(), PetType::Cat);
        assert!("hamster".parse::<PetType>().is_err());
    }

    #[test]
    fn species_must_match_the_pet_type() {
        assert_eq!(validate_species(PetType::Dog, "shiba_inu").unwrap(), "shiba_inu");
        assert_eq!(
            validate_species(PetType::Cat, "Scottish_Fold").unwrap(),
            "scottish_fold"
        );
        assert!(validate_species(PetType::Cat, "shiba_inu").is_err());
        assert!(validate_species(PetType::Dog, "").is_err());
    }

    #[test]
    fn attributes_reject_missing_fields() {
        let ok = PetAttributes::parse("Pochi", "dog", "pug", "2020-04-01").unwrap();
        assert_eq!(ok.pet_type, PetType::Dog);
        assert!(PetAttributes::parse("", "dog", "pug", "2020-04-01").is_err());
        assert!(PetAttributes::parse("Pochi", "dog", "pug", " ").is_err());
        assert!(PetAttributes::parse("Tama", "bird", "pug", "2020-04-01").is_err());
    }
}
