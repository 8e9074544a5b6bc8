//! The soft-delete policy shared by every entity with an `active` flag.
//!
//! Default listings show active rows, the "eliminated" listing shows the
//! rest, and single-row reads ignore the flag unless a caller asks for an
//! active row explicitly.

use crate::error::{RecordError, RecordResult};
use models::lifecycle::Visibility;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Select,
    sea_query::Expr,
};

/// An entity whose rows are soft deleted through an `active` column
pub trait Lifecycle: EntityTrait {
    /// Name used in error messages
    const LABEL: &'static str;

    fn id_column() -> Self::Column;

    fn active_column() -> Self::Column;
}

/// Rows on one side of the soft-delete line, in insertion order
pub fn listing<E: Lifecycle>(visibility: Visibility) -> Select<E> {
    E::find()
        .filter(E::active_column().eq(visibility.active_flag()))
        .order_by_asc(E::id_column())
}

/// Fetch a row regardless of its active flag
pub async fn find_any<E, C>(db: &C, id: i32) -> RecordResult<E::Model>
where
    E: Lifecycle,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await?
        .ok_or_else(|| RecordError::not_found(E::LABEL, id))
}

/// Fetch a row that must exist and be active; soft-deleted rows count as missing
pub async fn find_active<E, C>(db: &C, id: i32) -> RecordResult<E::Model>
where
    E: Lifecycle,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .filter(E::active_column().eq(true))
        .one(db)
        .await?
        .ok_or_else(|| {
            log::debug!("{} {id} is missing or inactive", E::LABEL);
            RecordError::not_found(E::LABEL, id)
        })
}

/// Flip the active flag of one row
pub async fn set_active<E, C>(db: &C, id: i32, active: bool) -> RecordResult<()>
where
    E: Lifecycle,
    C: ConnectionTrait,
{
    let result = E::update_many()
        .col_expr(E::active_column(), Expr::value(active))
        .filter(E::id_column().eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(RecordError::not_found(E::LABEL, id));
    }

    Ok(())
}
