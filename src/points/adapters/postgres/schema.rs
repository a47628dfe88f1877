//! Diesel schema for points persistence.

diesel::table! {
    /// One points row per user.
    points (user_id) {
        /// Owning user; the primary key also serves as the unique
        /// constraint that resolves concurrent first-access races.
        user_id -> Uuid,
        /// Spirituality counter.
        meditation -> Int8,
        /// Intelligence counter.
        brain -> Int8,
        /// Skills counter.
        skills -> Int8,
        /// Health counter.
        diet -> Int8,
        /// Body-kinesthetic counter.
        training -> Int8,
        /// Awareness counter.
        analyse -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last award timestamp.
        updated_at -> Timestamptz,
        /// Soft-deletion timestamp.
        deleted_at -> Nullable<Timestamptz>,
    }
}
