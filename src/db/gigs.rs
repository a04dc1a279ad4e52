use sea_orm::sea_query::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::gigs::{self, CreateGig, status};

/// Insert a new gig in the `open` state.
pub async fn insert_gig(
    db: &DatabaseConnection,
    input: CreateGig,
    poster_id: Uuid,
    poster_name: String,
) -> Result<gigs::Model, DbErr> {
    let new_gig = gigs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category),
        price: Set(input.price),
        status: Set(status::OPEN.to_string()),
        poster_id: Set(poster_id),
        poster_name: Set(poster_name),
        acceptor_id: Set(None),
        acceptor_name: Set(None),
        created_at: Set(chrono::Utc::now()),
    };

    new_gig.insert(db).await
}

/// Fetch gigs, optionally filtered by status, newest first.
pub async fn get_gigs(
    db: &DatabaseConnection,
    status_filter: Option<&str>,
) -> Result<Vec<gigs::Model>, DbErr> {
    let mut query = gigs::Entity::find().order_by_desc(gigs::Column::CreatedAt);
    if let Some(s) = status_filter {
        query = query.filter(gigs::Column::Status.eq(s));
    }
    query.all(db).await
}

/// Fetch a single gig by ID.
pub async fn get_gig_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<gigs::Model>, DbErr> {
    gigs::Entity::find_by_id(id).one(db).await
}

/// Gigs posted by a user, newest first.
pub async fn get_gigs_by_poster(
    db: &DatabaseConnection,
    poster_id: Uuid,
) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::PosterId.eq(poster_id))
        .order_by_desc(gigs::Column::CreatedAt)
        .all(db)
        .await
}

/// Gigs accepted by a user, newest first.
pub async fn get_gigs_by_acceptor(
    db: &DatabaseConnection,
    acceptor_id: Uuid,
) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::AcceptorId.eq(acceptor_id))
        .order_by_desc(gigs::Column::CreatedAt)
        .all(db)
        .await
}

/// Atomically claim an open gig for `acceptor_id`.
///
/// The status filter makes this a conditional update: of any number of
/// concurrent accept calls, exactly one sees a row transition open→accepted
/// and gets `true`; the rest get `false`.
pub async fn accept_if_open(
    db: &DatabaseConnection,
    id: Uuid,
    acceptor_id: Uuid,
    acceptor_name: &str,
) -> Result<bool, DbErr> {
    let result = gigs::Entity::update_many()
        .col_expr(gigs::Column::Status, Expr::value(status::ACCEPTED))
        .col_expr(gigs::Column::AcceptorId, Expr::value(Some(acceptor_id)))
        .col_expr(
            gigs::Column::AcceptorName,
            Expr::value(Some(acceptor_name.to_string())),
        )
        .filter(gigs::Column::Id.eq(id))
        .filter(gigs::Column::Status.eq(status::OPEN))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Overwrite a gig's status. No validation of the value: the legacy API
/// accepts arbitrary strings here and clients rely on it.
pub async fn set_status(
    db: &DatabaseConnection,
    id: Uuid,
    new_status: &str,
) -> Result<(), DbErr> {
    gigs::Entity::update_many()
        .col_expr(gigs::Column::Status, Expr::value(new_status.to_string()))
        .filter(gigs::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}
