use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use validator::Validate;

use super::ArgbColor;
use crate::validation::not_blank;

/// Opaque reference to a photo the user picked (a filesystem path or `file://` URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageHandle(String);

impl ImageHandle {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ImageHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageHandle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ImageHandle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Text inputs of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Name,
    Category,
    Description,
    Price,
    OfferPercentage,
    Sizes,
}

impl FromStr for DraftField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" => Ok(DraftField::Name),
            "category" => Ok(DraftField::Category),
            "description" => Ok(DraftField::Description),
            "price" => Ok(DraftField::Price),
            "offer" | "offer_percentage" => Ok(DraftField::OfferPercentage),
            "sizes" => Ok(DraftField::Sizes),
            _ => Err(anyhow::anyhow!("Unknown form field: {}", s)),
        }
    }
}

/// In-progress product form. Every text field holds exactly what the user typed.
///
/// The required-field rules are declared here and checked by
/// [`crate::validation::FormValidator`].
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct ProductDraft {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub category: String,
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    pub price: String,
    pub offer_percentage: String,
    pub sizes: String,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Vec<ImageHandle>,
    pub colors: Vec<ArgbColor>,
}

impl ProductDraft {
    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Category => &self.category,
            DraftField::Description => &self.description,
            DraftField::Price => &self.price,
            DraftField::OfferPercentage => &self.offer_percentage,
            DraftField::Sizes => &self.sizes,
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Category => self.category = value,
            DraftField::Description => self.description = value,
            DraftField::Price => self.price = value,
            DraftField::OfferPercentage => self.offer_percentage = value,
            DraftField::Sizes => self.sizes = value,
        }
    }
}
