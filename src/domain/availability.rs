//! Soft-delete capability shared by catalog tables.
//!
//! Every table that can be hidden instead of deleted implements
//! [`HasAvailability`]; the generic queries in
//! `db::repositories::catalog` only ever see rows through it.

use sea_orm::{ColumnTrait, Condition, EntityTrait};

pub trait HasAvailability: EntityTrait {
    fn id_column() -> Self::Column;

    fn available_column() -> Self::Column;

    fn updated_at_column() -> Self::Column;
}

/// Tables whose list endpoint supports the `q` substring search.
pub trait Searchable: HasAvailability {
    /// Column used for ordering by name and for the default search.
    fn search_column() -> Self::Column;

    /// Rows matching `term`. Override to search more than one column.
    fn search_condition(term: &str) -> Condition {
        Condition::all().add(Self::search_column().contains(term))
    }
}
