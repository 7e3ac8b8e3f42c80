//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Todo items.
    todos (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Todo text (max 100 characters).
        text -> Varchar,
        /// Free-form category label (max 50 characters).
        category -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last effective mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// The singleton player profile.
    profiles (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Always true; its unique constraint keeps the table to one row.
        singleton -> Bool,
        /// Player name (max 50 characters).
        username -> Varchar,
        /// Current level, at least 1.
        level -> Int8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(todos, profiles);
