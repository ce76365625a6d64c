//! In-memory adapters for the repository ports.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. All repositories created from one [`MemoryStore`] share the same
//! tables, so recipes see category renames and deletions the same way the
//! PostgreSQL schema does: deleting a category detaches its recipes, and
//! deleting a recipe or an ingredient drops its associations.
//!
//! Unique and foreign key constraints are enforced here as well and reported
//! with the same [`RepositoryError`] variants the Diesel adapters produce.

mod category;
mod ingredient;
mod recipe;
mod role;
mod user;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::search::SortDirection;
use crate::domain::{Category, Ingredient, RecipeRecord, Role, User};

pub use category::MemoryCategoryRepository;
pub use ingredient::MemoryIngredientRepository;
pub use recipe::MemoryRecipeRepository;
pub use role::MemoryRoleRepository;
pub use user::MemoryUserRepository;

/// One recipe/ingredient association row.
#[derive(Debug, Clone)]
struct Link {
    recipe_id: Uuid,
    ingredient_id: Uuid,
    amount: String,
}

#[derive(Debug, Default)]
struct Tables {
    categories: HashMap<Uuid, Category>,
    roles: HashMap<Uuid, Role>,
    ingredients: HashMap<Uuid, Ingredient>,
    users: HashMap<Uuid, User>,
    /// Stored without `ingredients`; associations live in `links`.
    recipes: HashMap<Uuid, RecipeRecord>,
    links: Vec<Link>,
}

/// Shared backing tables for the in-memory repositories.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> MemoryCategoryRepository {
        MemoryCategoryRepository::new(self.clone())
    }

    pub fn roles(&self) -> MemoryRoleRepository {
        MemoryRoleRepository::new(self.clone())
    }

    pub fn ingredients(&self) -> MemoryIngredientRepository {
        MemoryIngredientRepository::new(self.clone())
    }

    pub fn users(&self) -> MemoryUserRepository {
        MemoryUserRepository::new(self.clone())
    }

    pub fn recipes(&self) -> MemoryRecipeRepository {
        MemoryRecipeRepository::new(self.clone())
    }

    /// Run `f` with exclusive access to the tables.
    ///
    /// A poisoned lock is recovered: every mutation validates before it
    /// writes, so a panic cannot leave a half-applied change behind.
    fn with<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        let mut guard = self.tables.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Comparable value of the column a page is sorted by.
///
/// Text orders case-insensitively, falling back to the raw bytes, so pages
/// line up with what PostgreSQL's collation returns for the same request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey<'a> {
    Text(&'a str),
    Number(i32),
    Id(Uuid),
}

impl SortKey<'_> {
    const fn rank(&self) -> u8 {
        match self {
            Self::Text(_) => 0,
            Self::Number(_) => 1,
            Self::Id(_) => 2,
        }
    }
}

fn folded(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(left), Self::Text(right)) => folded(left)
                .cmp(folded(right))
                .then_with(|| left.cmp(right)),
            (Self::Number(left), Self::Number(right)) => left.cmp(right),
            (Self::Id(left), Self::Id(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort `items` by `key` in `direction`, break ties by ascending id, and cut
/// out the requested page.
fn sorted_page<T>(
    mut items: Vec<T>,
    direction: SortDirection,
    request: PageRequest,
    key: impl Fn(&T) -> SortKey<'_>,
    id: impl Fn(&T) -> Uuid,
) -> Page<T> {
    items.sort_by(|left, right| {
        let ordering = key(left).cmp(&key(right));
        let ordering = match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        ordering.then_with(|| id(left).cmp(&id(right)))
    });

    let total = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
    let content = items.into_iter().skip(offset).take(size).collect();
    Page::new(content, request, total)
}

/// Fail with the unique constraint name when `taken` is true.
fn ensure_unique(taken: bool, constraint: &str) -> Result<(), RepositoryError> {
    if taken {
        Err(RepositoryError::duplicate(constraint))
    } else {
        Ok(())
    }
}
