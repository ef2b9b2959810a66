//! Diesel table definitions.
//!
//! Kept in step with `backend/migrations` by hand.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Login email, unique and case-sensitive.
        email -> Varchar,
        /// bcrypt-encoded password hash.
        password_hash -> Varchar,
        /// `user` or `admin`.
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records, each owned by one account.
    tasks (id) {
        /// Primary key assigned from a sequence.
        id -> Int8,
        /// Trimmed, non-empty task text.
        text -> Text,
        /// Completion flag; only ever flips to true.
        done -> Bool,
        /// Owning account.
        owner_id -> Uuid,
        /// Creation timestamp used for newest-first listing.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (owner_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, users);
