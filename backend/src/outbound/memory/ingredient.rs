use std::collections::HashSet;

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{IngredientRepository, RepositoryError};
use crate::domain::search::SearchQuery;
use crate::domain::{Ingredient, IngredientSort};

use super::{MemoryStore, SortKey, Tables, ensure_unique, sorted_page};

const NAME_CONSTRAINT: &str = "ingredients_name_key";

/// [`IngredientRepository`] over a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryIngredientRepository {
    store: MemoryStore,
}

impl MemoryIngredientRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn name_taken(tables: &Tables, ingredient: &Ingredient) -> bool {
    tables
        .ingredients
        .values()
        .any(|stored| stored.id != ingredient.id && stored.name == ingredient.name)
}

#[async_trait]
impl IngredientRepository for MemoryIngredientRepository {
    async fn search(
        &self,
        query: &SearchQuery<IngredientSort>,
    ) -> Result<Page<Ingredient>, RepositoryError> {
        let matches: Vec<Ingredient> = self.store.with(|tables| {
            tables
                .ingredients
                .values()
                .filter(|ingredient| query.matches_any(&[ingredient.name.as_str()]))
                .cloned()
                .collect()
        });
        Ok(sorted_page(
            matches,
            query.direction(),
            query.page(),
            |ingredient| match query.sort() {
                IngredientSort::Id => SortKey::Id(ingredient.id),
                IngredientSort::Name => SortKey::Text(&ingredient.name),
            },
            |ingredient| ingredient.id,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ingredient>, RepositoryError> {
        Ok(self.store.with(|tables| tables.ingredients.get(&id).cloned()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, RepositoryError> {
        Ok(self.store.with(|tables| {
            tables
                .ingredients
                .values()
                .find(|ingredient| ingredient.name == name)
                .cloned()
        }))
    }

    async fn insert(&self, ingredient: &Ingredient) -> Result<(), RepositoryError> {
        self.insert_many(std::slice::from_ref(ingredient)).await
    }

    async fn insert_many(&self, batch: &[Ingredient]) -> Result<(), RepositoryError> {
        self.store.with(|tables| {
            // Validate the whole batch before writing any of it.
            let mut names = HashSet::new();
            for ingredient in batch {
                ensure_unique(
                    tables.ingredients.contains_key(&ingredient.id),
                    "ingredients_pkey",
                )?;
                ensure_unique(
                    name_taken(tables, ingredient) || !names.insert(ingredient.name.as_str()),
                    NAME_CONSTRAINT,
                )?;
            }
            for ingredient in batch {
                tables.ingredients.insert(ingredient.id, ingredient.clone());
            }
            Ok(())
        })
    }

    async fn update(&self, ingredient: &Ingredient) -> Result<bool, RepositoryError> {
        self.store.with(|tables| {
            if !tables.ingredients.contains_key(&ingredient.id) {
                return Ok(false);
            }
            ensure_unique(name_taken(tables, ingredient), NAME_CONSTRAINT)?;
            tables.ingredients.insert(ingredient.id, ingredient.clone());
            Ok(true)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.store.with(|tables| {
            let removed = tables.ingredients.remove(&id).is_some();
            if removed {
                tables.links.retain(|link| link.ingredient_id != id);
            }
            removed
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::SortDirection;
    use pagination::PageRequest;
    use rstest::rstest;

    fn ingredient(id: u128, name: &str) -> Ingredient {
        Ingredient {
            id: Uuid::from_u128(id),
            name: name.to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn failing_batch_writes_nothing() {
        let repo = MemoryStore::new().ingredients();
        repo.insert(&ingredient(1, "salt")).await.expect("insert");

        let err = repo
            .insert_many(&[ingredient(2, "pepper"), ingredient(3, "salt")])
            .await
            .expect_err("duplicate in batch");

        assert_eq!(err, RepositoryError::duplicate(NAME_CONSTRAINT));
        assert_eq!(repo.find_by_name("pepper").await.expect("lookup"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn batch_rejects_names_repeated_within_itself() {
        let repo = MemoryStore::new().ingredients();

        let err = repo
            .insert_many(&[ingredient(1, "flour"), ingredient(2, "flour")])
            .await
            .expect_err("repeated name");

        assert_eq!(err, RepositoryError::duplicate(NAME_CONSTRAINT));
    }

    #[rstest]
    #[tokio::test]
    async fn keyword_search_ignores_case() {
        let repo = MemoryStore::new().ingredients();
        repo.insert_many(&[
            ingredient(1, "Brown Sugar"),
            ingredient(2, "sugar"),
            ingredient(3, "butter"),
        ])
        .await
        .expect("insert");

        let page = repo
            .search(&SearchQuery::new(
                Some("SUGAR".to_owned()),
                IngredientSort::Name,
                SortDirection::Asc,
                PageRequest::new(0, 10).expect("valid page"),
            ))
            .await
            .expect("search");

        let names: Vec<&str> = page.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Brown Sugar", "sugar"]);
    }
}
