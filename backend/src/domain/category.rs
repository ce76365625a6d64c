//! Recipe categories.

use uuid::Uuid;

use super::search::SortField;
use super::validation::{DraftValidationError, FieldChecks};

/// Accepted length of a category name, in characters.
pub const CATEGORY_NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=255;
/// Maximum length of a category description, in characters.
pub const CATEGORY_DESCRIPTION_MAX: usize = 500;

/// Stored category. Names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Validated input for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    name: String,
    description: String,
}

impl CategoryDraft {
    /// Trim and validate client input.
    ///
    /// An absent description is stored as the empty string.
    ///
    /// # Examples
    /// ```
    /// use recipe_api::domain::CategoryDraft;
    ///
    /// let draft = CategoryDraft::new(" Soups ", None).expect("valid draft");
    /// assert_eq!(draft.name(), "Soups");
    /// assert_eq!(draft.description(), "");
    /// ```
    pub fn new(name: &str, description: Option<&str>) -> Result<Self, DraftValidationError> {
        let mut checks = FieldChecks::new();
        let name = checks.required_text("name", name, CATEGORY_NAME_LENGTH);
        let description =
            checks.optional_text("description", description, CATEGORY_DESCRIPTION_MAX);
        checks.finish(Self { name, description })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Materialise the draft under `id`.
    pub fn into_category(self, id: Uuid) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
        }
    }
}

/// Sortable category fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySort {
    Id,
    Name,
    Description,
}

impl SortField for CategorySort {
    const DEFAULT: Self = Self::Name;
    const DEFAULT_PAGE_SIZE: u32 = 2;
    const ALL: &'static [Self] = &[Self::Id, Self::Name, Self::Description];

    fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}
