//! Diesel schema for board persistence.

diesel::table! {
    /// Board columns.
    columns (id) {
        /// Column identifier.
        id -> Int4,
        /// Column title.
        title -> Text,
        /// Board position.
        #[sql_name = "order"]
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks placed in columns.
    tasks (id) {
        /// Task identifier.
        id -> Int4,
        /// Task title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Owning column; rows are removed with it.
        column_id -> Int4,
        /// Position within the owning column.
        #[sql_name = "order"]
        position -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> columns (column_id));
diesel::allow_tables_to_appear_in_same_query!(columns, tasks);
