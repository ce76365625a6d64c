//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Recipe categories. `name` is unique.
    categories (id) {
        id -> Uuid,
        name -> Varchar,
        /// Empty string when no description was given.
        description -> Text,
    }
}

diesel::table! {
    /// User roles. `name` is unique.
    roles (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
    }
}

diesel::table! {
    /// Ingredients. `name` is unique.
    ingredients (id) {
        id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    /// User accounts. `username` and `email` are each unique.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Varchar,
        username -> Varchar,
        email -> Varchar,
        /// bcrypt hash, never the plain-text password.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Recipes. `title` is unique; times and servings are non-negative.
    recipes (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        image -> Nullable<Text>,
        prep_time -> Int4,
        cook_time -> Int4,
        servings -> Int4,
        /// Set to NULL when the category is deleted.
        category_id -> Nullable<Uuid>,
    }
}

diesel::table! {
    /// Recipe/ingredient associations keyed by both ids.
    ///
    /// Rows cascade when either parent is deleted.
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Uuid,
        ingredient_id -> Uuid,
        amount -> Text,
    }
}

diesel::joinable!(recipes -> categories (category_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    categories,
    roles,
    ingredients,
    users,
    recipes,
    recipe_ingredients,
);
