//! Ingredients that recipes refer to.

use std::ops::RangeInclusive;

use uuid::Uuid;

use super::search::SortField;
use super::validation::{DraftValidationError, FieldChecks};

/// Accepted ingredient name length, in characters.
pub const INGREDIENT_NAME_LENGTH: RangeInclusive<usize> = 2..=255;

/// Stored ingredient. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
}

/// Validated ingredient input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDraft {
    name: String,
}

impl IngredientDraft {
    /// Trim and validate an ingredient name.
    pub fn new(name: &str) -> Result<Self, DraftValidationError> {
        let mut checks = FieldChecks::new();
        let name = checks.required_text("name", name, INGREDIENT_NAME_LENGTH);
        checks.finish(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_ingredient(self, id: Uuid) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientSort {
    Id,
    Name,
}

impl SortField for IngredientSort {
    const DEFAULT: Self = Self::Name;
    const DEFAULT_PAGE_SIZE: u32 = 10;
    const ALL: &'static [Self] = &[Self::Id, Self::Name];

    fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
        }
    }
}
