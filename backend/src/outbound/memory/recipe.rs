use std::collections::HashSet;

use async_trait::async_trait;
use pagination::Page;
use uuid::Uuid;

use crate::domain::ports::{RecipeRepository, RepositoryError};
use crate::domain::{
    CategorySummary, IngredientAmount, Recipe, RecipeIngredient, RecipeRecord, RecipeSearch,
    RecipeSort,
};

use super::{Link, MemoryStore, SortKey, Tables, ensure_unique, sorted_page};

const TITLE_CONSTRAINT: &str = "recipes_title_key";
const LINK_CONSTRAINT: &str = "recipe_ingredients_pkey";

/// [`RecipeRepository`] over a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryRecipeRepository {
    store: MemoryStore,
}

impl MemoryRecipeRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn associations(tables: &Tables, recipe_id: Uuid) -> Vec<RecipeIngredient> {
    let mut items: Vec<RecipeIngredient> = tables
        .links
        .iter()
        .filter(|link| link.recipe_id == recipe_id)
        .filter_map(|link| {
            tables
                .ingredients
                .get(&link.ingredient_id)
                .map(|ingredient| RecipeIngredient {
                    ingredient_id: ingredient.id,
                    name: ingredient.name.clone(),
                    amount: link.amount.clone(),
                })
        })
        .collect();
    items.sort_by(|left, right| {
        left.name
            .cmp(&right.name)
            .then_with(|| left.ingredient_id.cmp(&right.ingredient_id))
    });
    items
}

fn hydrate(tables: &Tables, record: &RecipeRecord) -> Recipe {
    Recipe {
        id: record.id,
        title: record.title.clone(),
        description: record.description.clone(),
        image: record.image.clone(),
        prep_time: record.prep_time,
        cook_time: record.cook_time,
        servings: record.servings,
        category: record
            .category_id
            .and_then(|id| tables.categories.get(&id))
            .map(|category| CategorySummary {
                id: category.id,
                name: category.name.clone(),
            }),
        ingredients: associations(tables, record.id),
    }
}

/// Check the recipe row against the title and category constraints.
fn check_record(tables: &Tables, record: &RecipeRecord) -> Result<(), RepositoryError> {
    ensure_unique(
        tables
            .recipes
            .values()
            .any(|stored| stored.id != record.id && stored.title == record.title),
        TITLE_CONSTRAINT,
    )?;
    match record.category_id {
        Some(id) if !tables.categories.contains_key(&id) => Err(
            RepositoryError::missing_reference("recipes_category_id_fkey"),
        ),
        _ => Ok(()),
    }
}

/// Check new association rows against the ingredient foreign key and the
/// composite primary key, including pairs repeated within `items`.
fn check_links(
    tables: &Tables,
    recipe_id: Uuid,
    existing: &[Link],
    items: &[IngredientAmount],
) -> Result<(), RepositoryError> {
    let mut seen: HashSet<Uuid> = existing
        .iter()
        .filter(|link| link.recipe_id == recipe_id)
        .map(|link| link.ingredient_id)
        .collect();
    for item in items {
        if !tables.ingredients.contains_key(&item.ingredient_id) {
            return Err(RepositoryError::missing_reference(
                "recipe_ingredients_ingredient_id_fkey",
            ));
        }
        ensure_unique(!seen.insert(item.ingredient_id), LINK_CONSTRAINT)?;
    }
    Ok(())
}

fn links_for(recipe_id: Uuid, items: &[IngredientAmount]) -> impl Iterator<Item = Link> + '_ {
    items.iter().map(move |item| Link {
        recipe_id,
        ingredient_id: item.ingredient_id,
        amount: item.amount.clone(),
    })
}

fn stored_row(record: &RecipeRecord) -> RecipeRecord {
    RecipeRecord {
        ingredients: Vec::new(),
        ..record.clone()
    }
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn search(&self, search: &RecipeSearch) -> Result<Page<Recipe>, RepositoryError> {
        let matches: Vec<Recipe> = self.store.with(|tables| {
            tables
                .recipes
                .values()
                .map(|record| hydrate(tables, record))
                .filter(|recipe| {
                    search
                        .query
                        .matches_any(&[recipe.title.as_str(), recipe.description.as_str()])
                        && search.matches_category(recipe.category.as_ref())
                })
                .collect()
        });
        Ok(sorted_page(
            matches,
            search.query.direction(),
            search.query.page(),
            |recipe| match search.query.sort() {
                RecipeSort::Id => SortKey::Id(recipe.id),
                RecipeSort::Title => SortKey::Text(&recipe.title),
                RecipeSort::Description => SortKey::Text(&recipe.description),
                RecipeSort::PrepTime => SortKey::Number(recipe.prep_time),
                RecipeSort::CookTime => SortKey::Number(recipe.cook_time),
                RecipeSort::Servings => SortKey::Number(recipe.servings),
            },
            |recipe| recipe.id,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.store.with(|tables| {
            tables
                .recipes
                .get(&id)
                .map(|record| hydrate(tables, record))
        }))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.store.with(|tables| {
            tables
                .recipes
                .values()
                .find(|record| record.title == title)
                .map(|record| hydrate(tables, record))
        }))
    }

    async fn insert(&self, record: &RecipeRecord) -> Result<Recipe, RepositoryError> {
        self.store.with(|tables| {
            ensure_unique(tables.recipes.contains_key(&record.id), "recipes_pkey")?;
            check_record(tables, record)?;
            check_links(tables, record.id, &[], &record.ingredients)?;

            tables.recipes.insert(record.id, stored_row(record));
            tables
                .links
                .extend(links_for(record.id, &record.ingredients));
            Ok(hydrate(tables, record))
        })
    }

    async fn replace(&self, record: &RecipeRecord) -> Result<Option<Recipe>, RepositoryError> {
        self.store.with(|tables| {
            if !tables.recipes.contains_key(&record.id) {
                return Ok(None);
            }
            check_record(tables, record)?;
            check_links(tables, record.id, &[], &record.ingredients)?;

            tables.recipes.insert(record.id, stored_row(record));
            tables.links.retain(|link| link.recipe_id != record.id);
            tables
                .links
                .extend(links_for(record.id, &record.ingredients));
            Ok(Some(hydrate(tables, record)))
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.store.with(|tables| {
            let removed = tables.recipes.remove(&id).is_some();
            if removed {
                tables.links.retain(|link| link.recipe_id != id);
            }
            removed
        }))
    }

    async fn ingredients(&self, recipe_id: Uuid) -> Result<Vec<RecipeIngredient>, RepositoryError> {
        Ok(self.store.with(|tables| associations(tables, recipe_id)))
    }

    async fn attach_ingredients(
        &self,
        recipe_id: Uuid,
        items: &[IngredientAmount],
    ) -> Result<Vec<RecipeIngredient>, RepositoryError> {
        self.store.with(|tables| {
            if !tables.recipes.contains_key(&recipe_id) {
                return Err(RepositoryError::missing_reference(
                    "recipe_ingredients_recipe_id_fkey",
                ));
            }
            check_links(tables, recipe_id, &tables.links, items)?;

            tables.links.extend(links_for(recipe_id, items));
            Ok(items
                .iter()
                .map(|item| RecipeIngredient {
                    ingredient_id: item.ingredient_id,
                    name: tables
                        .ingredients
                        .get(&item.ingredient_id)
                        .map(|ingredient| ingredient.name.clone())
                        .unwrap_or_default(),
                    amount: item.amount.clone(),
                })
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::search::{SearchParams, SearchQuery, SortDirection};
    use crate::domain::{Category, Ingredient};
    use crate::domain::ports::{CategoryRepository, IngredientRepository};
    use pagination::PageRequest;
    use rstest::{fixture, rstest};

    const BREAKFAST: u128 = 100;
    const FLOUR: u128 = 200;
    const EGGS: u128 = 201;

    struct Seeded {
        store: MemoryStore,
        recipes: MemoryRecipeRepository,
    }

    #[fixture]
    async fn seeded() -> Seeded {
        let store = MemoryStore::new();
        store
            .categories()
            .insert(&Category {
                id: Uuid::from_u128(BREAKFAST),
                name: "Breakfast".to_owned(),
                description: String::new(),
            })
            .await
            .expect("category");
        store
            .ingredients()
            .insert_many(&[
                Ingredient {
                    id: Uuid::from_u128(FLOUR),
                    name: "flour".to_owned(),
                },
                Ingredient {
                    id: Uuid::from_u128(EGGS),
                    name: "eggs".to_owned(),
                },
            ])
            .await
            .expect("ingredients");
        let recipes = store.recipes();
        Seeded { store, recipes }
    }

    fn amount(ingredient: u128, amount: &str) -> IngredientAmount {
        IngredientAmount {
            ingredient_id: Uuid::from_u128(ingredient),
            amount: amount.to_owned(),
        }
    }

    fn record(id: u128, title: &str, ingredients: Vec<IngredientAmount>) -> RecipeRecord {
        RecipeRecord {
            id: Uuid::from_u128(id),
            title: title.to_owned(),
            description: String::new(),
            image: None,
            prep_time: 5,
            cook_time: 10,
            servings: 2,
            category_id: Some(Uuid::from_u128(BREAKFAST)),
            ingredients,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_returns_ingredients_ordered_by_name(#[future] seeded: Seeded) {
        let Seeded { recipes, .. } = seeded.await;

        let recipe = recipes
            .insert(&record(1, "Pancakes", vec![amount(FLOUR, "200 g"), amount(EGGS, "2")]))
            .await
            .expect("insert");

        let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["eggs", "flour"]);
        assert_eq!(recipe.category.map(|c| c.name), Some("Breakfast".to_owned()));
    }

    #[rstest]
    #[tokio::test]
    async fn replace_swaps_the_whole_association_set(#[future] seeded: Seeded) {
        let Seeded { recipes, .. } = seeded.await;
        recipes
            .insert(&record(1, "Pancakes", vec![amount(FLOUR, "200 g"), amount(EGGS, "2")]))
            .await
            .expect("insert");

        let replaced = recipes
            .replace(&record(1, "Pancakes", vec![amount(EGGS, "3")]))
            .await
            .expect("replace")
            .expect("recipe exists");

        assert_eq!(
            replaced.ingredients,
            vec![RecipeIngredient {
                ingredient_id: Uuid::from_u128(EGGS),
                name: "eggs".to_owned(),
                amount: "3".to_owned(),
            }]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn attaching_an_existing_pair_changes_nothing(#[future] seeded: Seeded) {
        let Seeded { recipes, .. } = seeded.await;
        recipes
            .insert(&record(1, "Pancakes", vec![amount(FLOUR, "200 g")]))
            .await
            .expect("insert");

        let err = recipes
            .attach_ingredients(
                Uuid::from_u128(1),
                &[amount(EGGS, "2"), amount(FLOUR, "1 cup")],
            )
            .await
            .expect_err("duplicate pair");

        assert_eq!(err, RepositoryError::duplicate(LINK_CONSTRAINT));
        let stored = recipes.ingredients(Uuid::from_u128(1)).await.expect("list");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.first().map(|i| i.amount.as_str()), Some("200 g"));
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_parents_detaches_and_cascades(#[future] seeded: Seeded) {
        let Seeded { store, recipes } = seeded.await;
        recipes
            .insert(&record(1, "Pancakes", vec![amount(FLOUR, "200 g")]))
            .await
            .expect("insert");

        store
            .categories()
            .delete(Uuid::from_u128(BREAKFAST))
            .await
            .expect("delete category");
        store
            .ingredients()
            .delete(Uuid::from_u128(FLOUR))
            .await
            .expect("delete ingredient");

        let recipe = recipes
            .find_by_id(Uuid::from_u128(1))
            .await
            .expect("lookup")
            .expect("recipe survives");
        assert_eq!(recipe.category, None);
        assert!(recipe.ingredients.is_empty());
    }

    #[rstest]
    #[case(Some("breakfast"), 2)]
    #[case(Some("BREAKFAST"), 2)]
    #[case(Some("Break"), 0)]
    #[case(None, 3)]
    #[tokio::test]
    async fn category_filter_is_exact_and_case_insensitive(
        #[future] seeded: Seeded,
        #[case] category: Option<&str>,
        #[case] expected: u64,
    ) {
        let Seeded { recipes, .. } = seeded.await;
        recipes.insert(&record(1, "Pancakes", vec![])).await.expect("insert");
        recipes.insert(&record(2, "Omelette", vec![])).await.expect("insert");
        recipes
            .insert(&RecipeRecord {
                category_id: None,
                ..record(3, "Stew", vec![])
            })
            .await
            .expect("insert");

        let search = RecipeSearch::parse(SearchParams::default(), category.map(str::to_owned))
            .expect("valid search");
        let page = recipes.search(&search).await.expect("search");

        assert_eq!(page.total_elements(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn numeric_sort_uses_values_not_text(#[future] seeded: Seeded) {
        let Seeded { recipes, .. } = seeded.await;
        for (id, title, prep_time) in [(1, "Toast", 9), (2, "Porridge", 10), (3, "Granola", 2)] {
            recipes
                .insert(&RecipeRecord {
                    prep_time,
                    ..record(id, title, vec![])
                })
                .await
                .expect("insert");
        }

        let search = RecipeSearch {
            query: SearchQuery::new(
                None,
                RecipeSort::PrepTime,
                SortDirection::Desc,
                PageRequest::new(0, 10).expect("valid page"),
            ),
            category_name: None,
        };
        let page = recipes.search(&search).await.expect("search");

        let titles: Vec<&str> = page.items().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Porridge", "Toast", "Granola"]);
    }
}
