//! Diesel table definitions matching `backend/migrations`.

diesel::table! {
    /// Persisted users keyed by lowercase ObjectId hex.
    users (id) {
        id -> Varchar,
        username -> Text,
        email -> Text,
        /// Insert time, filled by the database default.
        created_at -> Timestamptz,
    }
}
