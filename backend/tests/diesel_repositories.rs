//! Integration tests for the Diesel repositories against embedded PostgreSQL.
//!
//! Each test drives the domain services over the Diesel adapters, so the
//! unique constraints, association table, and search SQL are exercised
//! exactly as the server uses them.
//!
//! # Runtime Strategy
//!
//! The embedded cluster bootstraps outside any async runtime; each test then
//! owns a Tokio runtime and blocks on the service calls.

use std::sync::Arc;

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use recipe_api::domain::ports::{CategoryService, IngredientService, RecipeService, UserService};
use recipe_api::domain::{
    CategoryDraft, CategoryServiceImpl, ErrorCode, IngredientAmount, IngredientDraft,
    IngredientServiceImpl, RecipeDraft, RecipeFields, RecipeSearch, RecipeServiceImpl,
    SearchParams, UserDraft, UserFields, UserServiceImpl,
};
use recipe_api::outbound::crypto::BcryptPasswordHasher;
use recipe_api::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselIngredientRepository, DieselRecipeRepository,
    DieselUserRepository, PoolConfig, run_pending_migrations_blocking,
};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::pg_embed::test_cluster;
use support::{format_postgres_error, handle_cluster_setup_failure};

type Categories = CategoryServiceImpl<DieselCategoryRepository>;
type Ingredients = IngredientServiceImpl<DieselIngredientRepository>;
type Recipes =
    RecipeServiceImpl<DieselRecipeRepository, DieselCategoryRepository, DieselIngredientRepository>;
type Users = UserServiceImpl<DieselUserRepository, BcryptPasswordHasher>;

struct TestContext {
    runtime: Runtime,
    database_url: String,
    categories: Categories,
    ingredients: Ingredients,
    recipes: Recipes,
    users: Users,
    _cluster: TestCluster,
}

fn setup_test_context() -> Result<TestContext, String> {
    let cluster = test_cluster()?;
    let database_url = cluster.connection().database_url("postgres");
    run_pending_migrations_blocking(&database_url).map_err(|err| err.to_string())?;

    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    let category_repo = Arc::new(DieselCategoryRepository::new(pool.clone()));
    let ingredient_repo = Arc::new(DieselIngredientRepository::new(pool.clone()));
    Ok(TestContext {
        runtime,
        database_url,
        categories: CategoryServiceImpl::new(category_repo.clone()),
        ingredients: IngredientServiceImpl::new(ingredient_repo.clone()),
        recipes: RecipeServiceImpl::new(
            Arc::new(DieselRecipeRepository::new(pool.clone())),
            category_repo,
            ingredient_repo,
        ),
        users: UserServiceImpl::new(
            Arc::new(DieselUserRepository::new(pool)),
            Arc::new(BcryptPasswordHasher::new(4)),
        ),
        _cluster: cluster,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn recipe_draft(
    title: &str,
    category_id: Option<Uuid>,
    items: Vec<IngredientAmount>,
) -> RecipeDraft {
    RecipeDraft::new(RecipeFields {
        title: title.to_owned(),
        description: None,
        image: None,
        prep_time: Some(10),
        cook_time: Some(30),
        servings: Some(4),
        category_id,
        ingredients: items,
    })
    .expect("valid recipe draft")
}

fn amount(ingredient_id: Uuid, amount: &str) -> IngredientAmount {
    IngredientAmount {
        ingredient_id,
        amount: amount.to_owned(),
    }
}

#[rstest]
fn recipes_round_trip_through_postgres(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    ctx.runtime.block_on(async {
        let dessert = ctx
            .categories
            .create(CategoryDraft::new("Dessert", Some("Sweet things")).expect("draft"))
            .await
            .expect("category created");
        let duplicate = ctx
            .categories
            .create(CategoryDraft::new("Dessert", None).expect("draft"))
            .await
            .expect_err("duplicate name rejected");
        assert_eq!(duplicate.code(), ErrorCode::InvalidRequest);

        let created = ctx
            .ingredients
            .create_batch(vec![
                IngredientDraft::new("Sugar").expect("draft"),
                IngredientDraft::new("Apples").expect("draft"),
                IngredientDraft::new("Butter").expect("draft"),
            ])
            .await
            .expect("ingredients created");
        let [sugar, apples, butter] = [&created[0], &created[1], &created[2]].map(|i| i.id);

        let pie = ctx
            .recipes
            .create(recipe_draft(
                "Apple pie",
                Some(dessert.id),
                vec![amount(sugar, "100 g"), amount(apples, "6")],
            ))
            .await
            .expect("recipe created");
        let names: Vec<_> = pie.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Apples", "Sugar"]);
        assert_eq!(pie.category.as_ref().map(|c| c.name.as_str()), Some("Dessert"));

        let rejected = ctx
            .recipes
            .add_ingredients(pie.id, vec![amount(butter, "50 g"), amount(sugar, "1 tbsp")])
            .await
            .expect_err("already attached ingredient rejected");
        assert_eq!(rejected.code(), ErrorCode::InvalidRequest);
        let listed = ctx.recipes.ingredients(pie.id).await.expect("ingredients");
        assert_eq!(listed.len(), 2, "failed batch must not attach anything");

        let updated = ctx
            .recipes
            .update(
                pie.id,
                recipe_draft("Apple pie", Some(dessert.id), vec![amount(butter, "50 g")]),
            )
            .await
            .expect("recipe updated");
        assert_eq!(updated.ingredients.len(), 1);
        assert_eq!(updated.ingredients[0].ingredient_id, butter);

        for title in ["Lemon tart", "Pork pie"] {
            ctx.recipes
                .create(recipe_draft(title, None, Vec::new()))
                .await
                .expect("recipe created");
        }

        let second_page = SearchParams {
            page: Some(1),
            size: Some(2),
            ..SearchParams::default()
        };
        let page = ctx
            .recipes
            .search(RecipeSearch::parse(second_page, None).expect("search"))
            .await
            .expect("search runs");
        assert_eq!(page.total_elements(), 3);
        assert_eq!(page.items().len(), 1);

        let pies_in_dessert = SearchParams {
            keyword: Some("PIE".to_owned()),
            ..SearchParams::default()
        };
        let filtered = ctx
            .recipes
            .search(
                RecipeSearch::parse(pies_in_dessert, Some("dessert".to_owned())).expect("search"),
            )
            .await
            .expect("search runs");
        let titles: Vec<_> = filtered.items().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Apple pie"]);

        let receipt = ctx.recipes.delete(pie.id).await.expect("deleted");
        assert!(receipt.deleted);
        let missing = ctx.recipes.delete(pie.id).await.expect_err("already deleted");
        assert_eq!(missing.code(), ErrorCode::NotFound);
    });
}

fn ada(username: &str) -> UserFields {
    UserFields {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        username: username.to_owned(),
        email: "ada@example.com".to_owned(),
        password: Some("analytical-engine".to_owned()),
    }
}

#[rstest]
fn stored_password_hash_verifies(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let user = ctx.runtime.block_on(async {
        let user = ctx
            .users
            .create(UserDraft::for_create(ada("ada")).expect("draft"))
            .await
            .expect("user created");

        let clash = ada("ada2");
        let duplicate = ctx
            .users
            .create(UserDraft::for_create(clash).expect("draft"))
            .await
            .expect_err("duplicate email rejected");
        assert_eq!(duplicate.code(), ErrorCode::InvalidRequest);
        user
    });

    let mut client = Client::connect(&ctx.database_url, NoTls).expect("postgres client");
    let row = client
        .query_one("SELECT password_hash FROM users WHERE id = $1", &[&user.id])
        .unwrap_or_else(|err| panic!("{}", format_postgres_error(&err)));
    let stored: String = row.get(0);

    assert_ne!(stored, "analytical-engine");
    assert!(bcrypt::verify("analytical-engine", &stored).expect("bcrypt hash"));
}
