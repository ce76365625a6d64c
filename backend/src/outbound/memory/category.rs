use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{CategoryRepository, RepositoryError};
use crate::domain::search::SearchQuery;
use crate::domain::{Category, CategorySort};

use super::{MemoryStore, SortKey, Tables, ensure_unique, sorted_page};

const NAME_CONSTRAINT: &str = "categories_name_key";

/// [`CategoryRepository`] over a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryCategoryRepository {
    store: MemoryStore,
}

impl MemoryCategoryRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn name_taken(tables: &Tables, category: &Category) -> bool {
    tables
        .categories
        .values()
        .any(|stored| stored.id != category.id && stored.name == category.name)
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn search(
        &self,
        query: &SearchQuery<CategorySort>,
    ) -> Result<Page<Category>, RepositoryError> {
        let matches: Vec<Category> = self.store.with(|tables| {
            tables
                .categories
                .values()
                .filter(|category| {
                    query.matches_any(&[category.name.as_str(), category.description.as_str()])
                })
                .cloned()
                .collect()
        });
        Ok(sorted_page(
            matches,
            query.direction(),
            query.page(),
            |category| match query.sort() {
                CategorySort::Id => SortKey::Id(category.id),
                CategorySort::Name => SortKey::Text(&category.name),
                CategorySort::Description => SortKey::Text(&category.description),
            },
            |category| category.id,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, RepositoryError> {
        Ok(self.store.with(|tables| tables.categories.get(&id).cloned()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        Ok(self.store.with(|tables| {
            tables
                .categories
                .values()
                .find(|category| category.name == name)
                .cloned()
        }))
    }

    async fn insert(&self, category: &Category) -> Result<(), RepositoryError> {
        self.store.with(|tables| {
            ensure_unique(tables.categories.contains_key(&category.id), "categories_pkey")?;
            ensure_unique(name_taken(tables, category), NAME_CONSTRAINT)?;
            tables.categories.insert(category.id, category.clone());
            Ok(())
        })
    }

    async fn update(&self, category: &Category) -> Result<bool, RepositoryError> {
        self.store.with(|tables| {
            if !tables.categories.contains_key(&category.id) {
                return Ok(false);
            }
            ensure_unique(name_taken(tables, category), NAME_CONSTRAINT)?;
            tables.categories.insert(category.id, category.clone());
            Ok(true)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.store.with(|tables| {
            let removed = tables.categories.remove(&id).is_some();
            if removed {
                for recipe in tables.recipes.values_mut() {
                    if recipe.category_id == Some(id) {
                        recipe.category_id = None;
                    }
                }
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
    use rstest::{fixture, rstest};

    fn category(id: u128, name: &str, description: &str) -> Category {
        Category {
            id: Uuid::from_u128(id),
            name: name.to_owned(),
            description: description.to_owned(),
        }
    }

    #[fixture]
    fn repo() -> MemoryCategoryRepository {
        MemoryStore::new().categories()
    }

    fn query(
        keyword: Option<&str>,
        sort: CategorySort,
        direction: SortDirection,
    ) -> SearchQuery<CategorySort> {
        SearchQuery::new(
            keyword.map(str::to_owned),
            sort,
            direction,
            PageRequest::new(0, 10).expect("valid page"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn keyword_matches_name_or_description(repo: MemoryCategoryRepository) {
        repo.insert(&category(1, "Breakfast", "Morning food")).await.expect("insert");
        repo.insert(&category(2, "Dessert", "Sweet things")).await.expect("insert");
        repo.insert(&category(3, "Soups", "Warm BREAKFAST alternatives")).await.expect("insert");

        let page = repo
            .search(&query(Some("breakfast"), CategorySort::Name, SortDirection::Asc))
            .await
            .expect("search");

        let names: Vec<&str> = page.items().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Breakfast", "Soups"]);
        assert_eq!(page.total_elements(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_names_are_rejected_on_insert_and_update(repo: MemoryCategoryRepository) {
        repo.insert(&category(1, "Breakfast", "")).await.expect("insert");
        repo.insert(&category(2, "Dessert", "")).await.expect("insert");

        let insert_err = repo
            .insert(&category(3, "Breakfast", ""))
            .await
            .expect_err("duplicate insert");
        let update_err = repo
            .update(&category(2, "Breakfast", ""))
            .await
            .expect_err("duplicate update");

        assert_eq!(insert_err, RepositoryError::duplicate(NAME_CONSTRAINT));
        assert_eq!(update_err, RepositoryError::duplicate(NAME_CONSTRAINT));
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_missing_rows(repo: MemoryCategoryRepository) {
        assert!(!repo.update(&category(9, "Nothing", "")).await.expect("update"));
        assert!(!repo.delete(Uuid::from_u128(9)).await.expect("delete"));
    }
}
