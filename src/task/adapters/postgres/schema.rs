//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Life-domain category, fixed at creation.
        #[max_length = 32]
        category -> Varchar,
        /// Task lifecycle status.
        #[max_length = 32]
        status -> Varchar,
        /// Whether the task regenerates after a sweep.
        recurring -> Bool,
        /// Owning user identifier.
        user_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}
