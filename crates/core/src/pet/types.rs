use std::fmt;

use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_string, deserialize_string_or_number};

/// A pet as stored in the pets table.
///
/// Every attribute is a string, including `price` and `cuteness_rate`, which
/// is how the table and the seed data carry them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub petid: String,
    pub pettype: String,
    #[serde(default)]
    pub petcolor: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub cuteness_rate: String,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub price: String,
    #[serde(default)]
    pub image: String,
}

impl Pet {
    /// Whether the pet can still be adopted.
    pub fn is_available(&self) -> bool {
        self.availability == Availability::Yes.as_str()
    }
}

/// Search result returned by `GET /api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSearchResult {
    pub petid: String,
    pub availability: String,
    pub cuteness_rate: String,
    pub petcolor: String,
    pub pettype: String,
    pub price: String,
    pub peturl: String,
}

impl PetSearchResult {
    pub fn from_pet(pet: Pet, peturl: impl Into<String>) -> Self {
        Self {
            petid: pet.petid,
            availability: pet.availability,
            cuteness_rate: pet.cuteness_rate,
            petcolor: pet.petcolor,
            pettype: pet.pettype,
            price: pet.price,
            peturl: peturl.into(),
        }
    }
}

/// Query parameters of `GET /api/search`.
///
/// Empty values are dropped at deserialization, so a present field is always
/// a real filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSearchQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pettype: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petcolor: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petid: Option<String>,
}

impl PetSearchQuery {
    pub fn by_id(petid: impl Into<String>) -> Self {
        Self {
            petid: Some(petid.into()),
            ..Self::default()
        }
    }

    pub fn by_type(pettype: impl Into<String>) -> Self {
        Self {
            pettype: Some(pettype.into()),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, petcolor: impl Into<String>) -> Self {
        self.petcolor = Some(petcolor.into());
        self
    }

    /// Drops blank values that were set programmatically.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            pettype: clean(self.pettype),
            petcolor: clean(self.petcolor),
            petid: clean(self.petid),
        }
    }

    /// Attribute/value pairs to filter on, in a stable order.
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        [
            ("pettype", self.pettype.as_deref()),
            ("petcolor", self.petcolor.as_deref()),
            ("petid", self.petid.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }

    /// Whether a pet satisfies every filter of this query.
    pub fn matches(&self, pet: &Pet) -> bool {
        self.filters().into_iter().all(|(name, value)| match name {
            "pettype" => pet.pettype == value,
            "petcolor" => pet.petcolor == value,
            "petid" => pet.petid == value,
            _ => false,
        })
    }
}

/// Adoption state of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Yes,
    No,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Yes => "yes",
            Availability::No => "no",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
