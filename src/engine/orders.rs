//! Order lifecycle engine.
//!
//! Orders are created when a gig is accepted or a service is booked, and only
//! ever move active→completed or active→cancelled. Both terminal transitions
//! are guarded by conditional updates so concurrent requests against the same
//! gig or order resolve to exactly one winner.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db;
use crate::engine::notify;
use crate::error::ApiError;
use crate::models::gigs::{self, status as gig_status};
use crate::models::orders::{self, NewOrder, OrderType, Status};
use crate::models::users;

/// Platform cut, frozen into the order at creation.
pub const COMMISSION_RATE: f64 = 0.15;

/// Cancelling later than this after order creation incurs the fee.
pub const CANCELLATION_GRACE_SECS: i64 = 120;

/// Fraction of the order total charged as a late-cancellation fee.
pub const LATE_CANCELLATION_RATE: f64 = 0.5;

/// Commission owed on an order of the given total, rounded to 2 decimals.
pub fn commission_for(total_amount: f64) -> f64 {
    super::round2(total_amount * COMMISSION_RATE)
}

/// Fee for cancelling at `now` an order created at `created_at`.
///
/// Zero within the grace window, half the order total after it. The fee is
/// informational only: it is returned to the caller, never persisted or
/// deducted anywhere (there is no payment capture in this system).
pub fn cancellation_fee(total_amount: f64, created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    if now - created_at > Duration::seconds(CANCELLATION_GRACE_SECS) {
        total_amount * LATE_CANCELLATION_RATE
    } else {
        0.0
    }
}

/// Accept an open gig on behalf of `acceptor`, creating the backing order.
///
/// The open→accepted transition is a conditional update: two concurrent
/// accepts on the same gig produce exactly one order.
pub async fn accept_gig(
    db: &DatabaseConnection,
    gig_id: Uuid,
    acceptor: &users::Model,
) -> Result<orders::Model, ApiError> {
    let gig = db::gigs::get_gig_by_id(db, gig_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Gig {gig_id}")))?;

    if gig.status != gig_status::OPEN {
        return Err(ApiError::Conflict("Gig not available".to_string()));
    }
    if gig.poster_id == acceptor.id {
        return Err(ApiError::Forbidden(
            "Cannot accept your own gig".to_string(),
        ));
    }

    let claimed = db::gigs::accept_if_open(db, gig_id, acceptor.id, &acceptor.name).await?;
    if !claimed {
        // Someone else won the race between our read and the update.
        return Err(ApiError::Conflict("Gig not available".to_string()));
    }

    let order = db::orders::insert_order(
        db,
        NewOrder {
            order_type: OrderType::Gig,
            gig_id: Some(gig.id),
            service_id: None,
            buyer_id: gig.poster_id,
            buyer_name: gig.poster_name.clone(),
            provider_id: acceptor.id,
            provider_name: acceptor.name.clone(),
            total_amount: gig.price,
            commission: commission_for(gig.price),
        },
    )
    .await?;

    notify(
        db,
        gig.poster_id,
        format!("{} accepted your gig: {}", acceptor.name, gig.title),
        "gig_accepted",
    )
    .await;

    Ok(order)
}

/// Book a service for `buyer`, creating the backing order.
///
/// Services carry no status, so any number of buyers can book concurrently;
/// every booking creates its own order.
pub async fn book_service(
    db: &DatabaseConnection,
    service_id: Uuid,
    buyer: &users::Model,
) -> Result<orders::Model, ApiError> {
    let service = db::services::get_service_by_id(db, service_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {service_id}")))?;

    if service.creator_id == buyer.id {
        return Err(ApiError::Forbidden(
            "Cannot book your own service".to_string(),
        ));
    }

    let order = db::orders::insert_order(
        db,
        NewOrder {
            order_type: OrderType::Service,
            gig_id: None,
            service_id: Some(service.id),
            buyer_id: buyer.id,
            buyer_name: buyer.name.clone(),
            provider_id: service.creator_id,
            provider_name: service.creator_name.clone(),
            total_amount: service.price,
            commission: commission_for(service.price),
        },
    )
    .await?;

    notify(
        db,
        service.creator_id,
        format!("{} booked your service: {}", buyer.name, service.title),
        "service_booked",
    )
    .await;

    Ok(order)
}

/// Update a gig's status on behalf of one of its parties.
///
/// The status value itself is not validated (any string goes through — legacy
/// behavior), but `completed`/`cancelled` additionally propagate to the gig's
/// order and notify both parties.
pub async fn update_gig_status(
    db: &DatabaseConnection,
    gig_id: Uuid,
    new_status: &str,
    actor: &users::Model,
) -> Result<gigs::Model, ApiError> {
    let gig = db::gigs::get_gig_by_id(db, gig_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Gig {gig_id}")))?;

    if gig.poster_id != actor.id && gig.acceptor_id != Some(actor.id) {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    db::gigs::set_status(db, gig_id, new_status).await?;

    let terminal = match new_status {
        gig_status::COMPLETED => Some(Status::Completed),
        gig_status::CANCELLED => Some(Status::Cancelled),
        _ => None,
    };

    if let Some(order_status) = terminal {
        db::orders::set_status_for_gig(db, gig_id, order_status).await?;

        if let Some(acceptor_id) = gig.acceptor_id {
            notify(
                db,
                acceptor_id,
                format!("Gig '{}' has been {new_status}", gig.title),
                new_status,
            )
            .await;
        }
        notify(
            db,
            gig.poster_id,
            format!("Your gig '{}' has been {new_status}", gig.title),
            new_status,
        )
        .await;
    }

    db::gigs::get_gig_by_id(db, gig_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Gig {gig_id}")))
}

/// Cancel an active order on behalf of one of its parties.
///
/// Returns the cancellation fee. A single `Utc::now()` read feeds both the
/// fee computation and `cancelled_at`. The active→cancelled transition is a
/// conditional update, so concurrent cancels succeed exactly once. A
/// cancelled gig order marks its gig cancelled (the gig is not reopened);
/// service orders leave their service untouched.
pub async fn cancel_order(
    db: &DatabaseConnection,
    order_id: Uuid,
    actor: &users::Model,
) -> Result<f64, ApiError> {
    let order = db::orders::get_order_by_id(db, order_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {order_id}")))?;

    if !order.is_party(actor.id) {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    let now = Utc::now();
    let fee = cancellation_fee(order.total_amount, order.created_at, now);

    let cancelled = db::orders::cancel_if_active(db, order_id, now).await?;
    if !cancelled {
        return Err(ApiError::Conflict(
            "Order already completed or cancelled".to_string(),
        ));
    }

    if let Some(gig_id) = order.gig_id {
        db::gigs::set_status(db, gig_id, gig_status::CANCELLED).await?;
    }

    let id_str = order_id.to_string();
    notify(
        db,
        order.counterparty(actor.id),
        format!("Order #{} has been cancelled", &id_str[..8]),
        "cancelled",
    )
    .await;

    Ok(fee)
}

/// Complete an active service order on behalf of one of its parties.
///
/// Gig orders complete through their gig's status update instead; sending
/// one here is a request error.
pub async fn complete_service_order(
    db: &DatabaseConnection,
    order_id: Uuid,
    actor: &users::Model,
) -> Result<orders::Model, ApiError> {
    let order = db::orders::get_order_by_id(db, order_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {order_id}")))?;

    if !order.is_party(actor.id) {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }
    if order.order_type != OrderType::Service {
        return Err(ApiError::Validation(
            "Gig orders are completed through the gig status endpoint".to_string(),
        ));
    }

    let completed = db::orders::complete_if_active(db, order_id).await?;
    if !completed {
        return Err(ApiError::Conflict(
            "Order already completed or cancelled".to_string(),
        ));
    }

    let id_str = order_id.to_string();
    notify(
        db,
        order.counterparty(actor.id),
        format!("Order #{} has been completed", &id_str[..8]),
        "completed",
    )
    .await;

    db::orders::get_order_by_id(db, order_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {order_id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commission_is_fifteen_percent() {
        assert_eq!(commission_for(100.0), 15.0);
        assert_eq!(commission_for(0.0), 0.0);
        assert_eq!(commission_for(19.99), 3.0); // 2.9985 rounds up
    }

    #[test]
    fn no_fee_within_grace_window() {
        let created = Utc::now();
        let now = created + Duration::seconds(10);
        assert_eq!(cancellation_fee(100.0, created, now), 0.0);
    }

    #[test]
    fn no_fee_at_exactly_grace_boundary() {
        let created = Utc::now();
        let now = created + Duration::seconds(CANCELLATION_GRACE_SECS);
        assert_eq!(cancellation_fee(100.0, created, now), 0.0);
    }

    #[test]
    fn half_fee_after_grace_window() {
        let created = Utc::now();
        let now = created + Duration::seconds(130);
        assert_eq!(cancellation_fee(100.0, created, now), 50.0);
    }

    #[test]
    fn fee_scales_with_order_total() {
        let created = Utc::now();
        let now = created + Duration::seconds(121);
        assert_eq!(cancellation_fee(80.0, created, now), 40.0);
    }

    // ── Precondition paths, against a mocked database ──

    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn test_user(name: &str) -> users::Model {
        users::Model {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "x".to_string(),
            college: "Test College".to_string(),
            phone: None,
            picture: None,
            rating: 0.0,
            rating_count: 0,
            terms_accepted: true,
            created_at: Utc::now(),
        }
    }

    fn open_gig(poster: &users::Model, price: f64) -> gigs::Model {
        gigs::Model {
            id: Uuid::new_v4(),
            title: "Fix my bike".to_string(),
            description: "Rear brake drags".to_string(),
            category: "repair".to_string(),
            price,
            status: gig_status::OPEN.to_string(),
            poster_id: poster.id,
            poster_name: poster.name.clone(),
            acceptor_id: None,
            acceptor_name: None,
            created_at: Utc::now(),
        }
    }

    fn gig_order(buyer: &users::Model, provider: &users::Model) -> orders::Model {
        orders::Model {
            id: Uuid::new_v4(),
            order_type: OrderType::Gig,
            gig_id: Some(Uuid::new_v4()),
            service_id: None,
            buyer_id: buyer.id,
            buyer_name: buyer.name.clone(),
            provider_id: provider.id,
            provider_name: provider.name.clone(),
            total_amount: 100.0,
            commission: 15.0,
            status: Status::Active,
            created_at: Utc::now(),
            cancelled_at: None,
        }
    }

    #[tokio::test]
    async fn accepting_a_non_open_gig_is_a_conflict() {
        let poster = test_user("Priya");
        let acceptor = test_user("Dev");
        let mut gig = open_gig(&poster, 100.0);
        gig.status = gig_status::ACCEPTED.to_string();
        gig.acceptor_id = Some(Uuid::new_v4());
        let gig_id = gig.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![gig]])
            .into_connection();

        let result = accept_gig(&db, gig_id, &acceptor).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn accepting_your_own_gig_is_forbidden() {
        let poster = test_user("Priya");
        let gig = open_gig(&poster, 100.0);
        let gig_id = gig.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![gig]])
            .into_connection();

        let result = accept_gig(&db, gig_id, &poster).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn losing_the_accept_race_is_a_conflict() {
        let poster = test_user("Priya");
        let acceptor = test_user("Dev");
        let gig = open_gig(&poster, 100.0);
        let gig_id = gig.id;

        // The read sees an open gig, but by the time the conditional update
        // runs another acceptor has claimed it: zero rows affected.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![gig]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = accept_gig(&db, gig_id, &acceptor).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn cancelling_a_cancelled_order_is_a_conflict() {
        let buyer = test_user("Priya");
        let provider = test_user("Dev");
        let mut order = gig_order(&buyer, &provider);
        order.status = Status::Cancelled;
        order.cancelled_at = Some(Utc::now());
        let order_id = order.id;

        // The conditional update filters on status = active and hits nothing.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let result = cancel_order(&db, order_id, &buyer).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn cancelling_an_order_you_are_not_party_to_is_forbidden() {
        let buyer = test_user("Priya");
        let provider = test_user("Dev");
        let stranger = test_user("Mallory");
        let order = gig_order(&buyer, &provider);
        let order_id = order.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order]])
            .into_connection();

        let result = cancel_order(&db, order_id, &stranger).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn completing_a_gig_order_directly_is_rejected() {
        let buyer = test_user("Priya");
        let provider = test_user("Dev");
        let order = gig_order(&buyer, &provider);
        let order_id = order.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order]])
            .into_connection();

        let result = complete_service_order(&db, order_id, &buyer).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
