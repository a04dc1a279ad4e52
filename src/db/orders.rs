use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::orders::{self, NewOrder, Status};

/// Insert a new order in the `active` state.
pub async fn insert_order(
    db: &DatabaseConnection,
    input: NewOrder,
) -> Result<orders::Model, DbErr> {
    let new_order = orders::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_type: Set(input.order_type),
        gig_id: Set(input.gig_id),
        service_id: Set(input.service_id),
        buyer_id: Set(input.buyer_id),
        buyer_name: Set(input.buyer_name),
        provider_id: Set(input.provider_id),
        provider_name: Set(input.provider_name),
        total_amount: Set(input.total_amount),
        commission: Set(input.commission),
        status: Set(Status::Active),
        created_at: Set(Utc::now()),
        cancelled_at: Set(None),
    };

    new_order.insert(db).await
}

/// Fetch a single order by ID.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<orders::Model>, DbErr> {
    orders::Entity::find_by_id(id).one(db).await
}

/// Orders where the user is buyer or provider, newest first.
pub async fn get_orders_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<orders::Model>, DbErr> {
    orders::Entity::find()
        .filter(
            Condition::any()
                .add(orders::Column::BuyerId.eq(user_id))
                .add(orders::Column::ProviderId.eq(user_id)),
        )
        .order_by_desc(orders::Column::CreatedAt)
        .all(db)
        .await
}

/// Atomically move an active order to `cancelled`, stamping `cancelled_at`.
///
/// Conditional on the current status, so concurrent cancel calls (or a
/// cancel racing a completion) succeed exactly once.
pub async fn cancel_if_active(
    db: &DatabaseConnection,
    id: Uuid,
    cancelled_at: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let result = orders::Entity::update_many()
        .col_expr(orders::Column::Status, Expr::value(Status::Cancelled))
        .col_expr(orders::Column::CancelledAt, Expr::value(Some(cancelled_at)))
        .filter(orders::Column::Id.eq(id))
        .filter(orders::Column::Status.eq(Status::Active))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Atomically move an active order to `completed`.
pub async fn complete_if_active(db: &DatabaseConnection, id: Uuid) -> Result<bool, DbErr> {
    let result = orders::Entity::update_many()
        .col_expr(orders::Column::Status, Expr::value(Status::Completed))
        .filter(orders::Column::Id.eq(id))
        .filter(orders::Column::Status.eq(Status::Active))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Propagate a terminal gig status to the gig's order, but only while the
/// order is still active. Completed and cancelled are terminal for orders.
pub async fn set_status_for_gig(
    db: &DatabaseConnection,
    gig_id: Uuid,
    new_status: Status,
) -> Result<bool, DbErr> {
    let result = orders::Entity::update_many()
        .col_expr(orders::Column::Status, Expr::value(new_status))
        .filter(orders::Column::GigId.eq(gig_id))
        .filter(orders::Column::Status.eq(Status::Active))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}
