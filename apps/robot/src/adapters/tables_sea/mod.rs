//! SeaORM adapter for the tables collection - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entities::tables;

pub mod dto;

pub use dto::{HandUpdate, TableCreate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn table_not_found() -> sea_orm::DbErr {
    sea_orm::DbErr::RecordNotFound("Table not found".to_string())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: &str,
) -> Result<Option<tables::Model>, sea_orm::DbErr> {
    tables::Entity::find_by_id(table_id.to_string())
        .one(conn)
        .await
}

/// Find table by ID or return RecordNotFound error.
pub async fn require_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    table_id: &str,
) -> Result<tables::Model, sea_orm::DbErr> {
    find_by_id(conn, table_id).await?.ok_or_else(table_not_found)
}

pub async fn create_table<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TableCreate,
) -> Result<tables::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let players = serde_json::to_value(&dto.players)
        .map_err(|e| sea_orm::DbErr::Json(e.to_string()))?;
    let table = tables::ActiveModel {
        id: Set(dto.id),
        players: Set(Some(players)),
        hand: Set(dto.hand),
        version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    table.insert(conn).await
}

/// Writes the `hand` column, bumps `version` and `updated_at`, and returns
/// the refetched row.
///
/// With an expected version, zero affected rows is told apart as either a
/// missing table (`RecordNotFound`) or a lost race (`OPTIMISTIC_LOCK:` payload).
pub async fn update_hand<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: HandUpdate,
) -> Result<tables::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    let mut update = tables::Entity::update_many()
        .col_expr(tables::Column::Hand, Expr::val(dto.hand).into())
        .col_expr(tables::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            tables::Column::Version,
            Expr::col(tables::Column::Version).add(1),
        )
        .filter(tables::Column::Id.eq(dto.id.as_str()));
    if let Some(expected) = dto.expected_version {
        update = update.filter(tables::Column::Version.eq(expected));
    }
    let result = update.exec(conn).await?;

    if result.rows_affected == 0 {
        let current = find_by_id(conn, &dto.id).await?;
        return match (current, dto.expected_version) {
            (Some(table), Some(expected)) => Err(sea_orm::DbErr::Custom(format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                expected, table.version
            ))),
            _ => Err(table_not_found()),
        };
    }

    require_table(conn, &dto.id).await
}
