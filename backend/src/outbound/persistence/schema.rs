//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Recipe categories, referenced from recipes by name.
    categories (name) {
        /// Primary key: display name.
        name -> Text,
    }
}

diesel::table! {
    /// Recipes with their derived total time and hashed edit key.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        name -> Text,
        /// Category label; not constrained to `categories`.
        category_name -> Text,
        prep_time -> Int4,
        cook_time -> Int4,
        /// `prep_time + cook_time` at the last write.
        total_time -> Int4,
        serves -> Text,
        /// Ordered ingredient list.
        ingredients -> Array<Text>,
        image_url -> Text,
        instructions -> Text,
        /// Salted digest, `hex(salt)$hex(digest)`.
        edit_key_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(categories, recipes);
