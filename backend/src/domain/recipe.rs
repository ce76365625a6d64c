//! Recipes and their ingredient associations.
//!
//! A recipe optionally belongs to one category and lists ingredients through
//! `(recipe, ingredient)` associations that carry a free-text amount. The
//! association set is always written as a whole: creating a recipe inserts
//! it, updating a recipe replaces it, and the add operations append to it.

use std::ops::RangeInclusive;

use uuid::Uuid;

use super::search::{SearchParams, SearchQuery, SortField, normalise_text};
use super::validation::{DraftValidationError, FieldChecks};
use super::Error;

pub const RECIPE_TITLE_LENGTH: RangeInclusive<usize> = 3..=255;

/// Category reference embedded in a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
}

/// Ingredient attached to a recipe, resolved to its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredient {
    pub ingredient_id: Uuid,
    pub name: String,
    pub amount: String,
}

/// Stored recipe with its category and ingredients resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub category: Option<CategorySummary>,
    /// Ordered by ingredient name.
    pub ingredients: Vec<RecipeIngredient>,
}

/// Requested association between a recipe and an ingredient.
///
/// Amounts are checked by the recipe service, after the ingredient has been
/// found, so a missing ingredient is reported before a blank amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientAmount {
    pub ingredient_id: Uuid,
    pub amount: String,
}

/// Raw recipe input prior to validation.
#[derive(Debug, Clone, Default)]
pub struct RecipeFields {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub servings: Option<i32>,
    pub category_id: Option<Uuid>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Validated recipe input, used for both create and full replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    title: String,
    description: String,
    image: Option<String>,
    prep_time: i32,
    cook_time: i32,
    servings: i32,
    category_id: Option<Uuid>,
    ingredients: Vec<IngredientAmount>,
}

impl RecipeDraft {
    /// Validate recipe fields. Absent numbers default to zero.
    pub fn new(fields: RecipeFields) -> Result<Self, DraftValidationError> {
        let RecipeFields {
            title,
            description,
            image,
            prep_time,
            cook_time,
            servings,
            category_id,
            ingredients,
        } = fields;

        let mut checks = FieldChecks::new();
        let title = checks.required_text("title", &title, RECIPE_TITLE_LENGTH);
        let prep_time = checks.non_negative("prepTime", prep_time.unwrap_or_default());
        let cook_time = checks.non_negative("cookTime", cook_time.unwrap_or_default());
        let servings = checks.non_negative("servings", servings.unwrap_or_default());

        checks.finish(Self {
            title,
            description: description.map(|text| text.trim().to_owned()).unwrap_or_default(),
            image: normalise_text(image),
            prep_time,
            cook_time,
            servings,
            category_id,
            ingredients,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category_id(&self) -> Option<Uuid> {
        self.category_id
    }

    pub fn ingredients(&self) -> &[IngredientAmount] {
        &self.ingredients
    }

    /// Turn the draft into a write record once its ingredients have been
    /// checked.
    pub fn into_record(self, id: Uuid, ingredients: Vec<IngredientAmount>) -> RecipeRecord {
        RecipeRecord {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            category_id: self.category_id,
            ingredients,
        }
    }
}

/// Everything a repository needs to write one recipe and its associations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub category_id: Option<Uuid>,
    pub ingredients: Vec<IngredientAmount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSort {
    Id,
    Title,
    Description,
    PrepTime,
    CookTime,
    Servings,
}

impl SortField for RecipeSort {
    const DEFAULT: Self = Self::Title;
    const DEFAULT_PAGE_SIZE: u32 = 2;
    const ALL: &'static [Self] = &[
        Self::Id,
        Self::Title,
        Self::Description,
        Self::PrepTime,
        Self::CookTime,
        Self::Servings,
    ];

    fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::PrepTime => "prepTime",
            Self::CookTime => "cookTime",
            Self::Servings => "servings",
        }
    }
}

/// Recipe search: keyword query plus an optional category name filter.
///
/// The category filter is an exact, case-insensitive name match and is
/// combined with the keyword using AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeSearch {
    pub query: SearchQuery<RecipeSort>,
    pub category_name: Option<String>,
}

impl RecipeSearch {
    /// Validate raw search input.
    pub fn parse(params: SearchParams, category_name: Option<String>) -> Result<Self, Error> {
        Ok(Self {
            query: SearchQuery::parse(params)?,
            category_name: normalise_text(category_name),
        })
    }

    /// In-memory form of the category predicate.
    pub fn matches_category(&self, category: Option<&CategorySummary>) -> bool {
        match (&self.category_name, category) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(wanted), Some(category)) => category.name.to_lowercase() == wanted.to_lowercase(),
        }
    }
}
