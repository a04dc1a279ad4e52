//! Rating aggregation engine.
//!
//! One rating per (order, rater), on completed orders only. Each new rating
//! triggers a full recomputation of the rated user's running average; there
//! is no incremental update, so concurrent submissions can overwrite each
//! other's aggregate writes but the last writer's full scan reflects every
//! committed rating.

use sea_orm::DatabaseConnection;

use crate::db;
use crate::engine::{notify, round2};
use crate::error::ApiError;
use crate::models::ratings::{self, CreateRating};
use crate::models::users;

/// Accepted score range for a rating.
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

/// Unweighted mean over the full history, rounded half-up to 2 decimals.
/// An empty set aggregates to 0 (a race can briefly expose one).
pub fn aggregate(scores: &[f64]) -> (f64, i32) {
    if scores.is_empty() {
        return (0.0, 0);
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    (round2(mean), scores.len() as i32)
}

/// Record a rating for a completed order and refresh the rated user's
/// denormalized aggregate.
///
/// When the order came from a service booking, the service's aggregate is
/// refreshed too, from the same per-creator rating set (the service mirrors
/// its creator's reputation rather than keeping one of its own).
pub async fn submit_rating(
    db: &DatabaseConnection,
    input: CreateRating,
    from_user: &users::Model,
) -> Result<ratings::Model, ApiError> {
    let order = db::orders::get_order_by_id(db, input.order_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Order {}", input.order_id)))?;

    if order.status != crate::models::orders::Status::Completed {
        return Err(ApiError::Conflict(
            "Can only rate completed orders".to_string(),
        ));
    }
    if !order.is_party(from_user.id) {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&input.rating) {
        return Err(ApiError::Validation(format!(
            "Rating must be between {MIN_SCORE} and {MAX_SCORE}"
        )));
    }

    if db::ratings::exists_for_order_and_rater(db, input.order_id, from_user.id).await? {
        return Err(ApiError::Conflict("Already rated this order".to_string()));
    }

    let to_user = db::users::get_user_by_id(db, input.to_user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {}", input.to_user_id)))?;

    let to_user_id = to_user.id;
    let rating = db::ratings::insert_rating(
        db,
        input,
        from_user.id,
        from_user.name.clone(),
        to_user.name,
    )
    .await?;

    // Full-scan recomputation over everything the user has received so far.
    let received = db::ratings::get_ratings_for_user(db, to_user_id).await?;
    let scores: Vec<f64> = received.iter().map(|r| r.rating).collect();
    let (avg, count) = aggregate(&scores);
    db::users::update_rating_aggregate(db, to_user_id, avg, count).await?;

    if let Some(service_id) = order.service_id {
        db::services::update_rating_aggregate(db, service_id, avg, count).await?;
    }

    notify(
        db,
        to_user_id,
        format!("{} rated you {} stars", from_user.name, rating.rating),
        "review",
    )
    .await;

    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_history_aggregates_to_zero() {
        assert_eq!(aggregate(&[]), (0.0, 0));
    }

    #[test]
    fn single_rating_is_its_own_average() {
        assert_eq!(aggregate(&[4.0]), (4.0, 1));
    }

    #[test]
    fn mean_of_three_ratings() {
        assert_eq!(aggregate(&[4.0, 5.0, 3.0]), (4.0, 3));
    }

    #[test]
    fn mean_rounds_half_up_to_two_decimals() {
        // 11/3 = 3.666... → 3.67
        assert_eq!(aggregate(&[3.0, 4.0, 4.0]), (3.67, 3));
        // 4.5 stays exact
        assert_eq!(aggregate(&[4.0, 5.0]), (4.5, 2));
        // 4.125 → 4.13 (half-up; both inputs are exact binary fractions)
        assert_eq!(aggregate(&[4.25, 4.0]), (4.13, 2));
    }

    #[test]
    fn repeated_aggregation_is_deterministic() {
        let scores = [2.0, 3.5, 4.5, 5.0, 1.0];
        assert_eq!(aggregate(&scores), aggregate(&scores));
    }

    // ── Precondition paths, against a mocked database ──

    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use crate::models::orders::{self, OrderType, Status};

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

    fn service_order(buyer: &users::Model, provider: &users::Model, status: Status) -> orders::Model {
        orders::Model {
            id: Uuid::new_v4(),
            order_type: OrderType::Service,
            gig_id: None,
            service_id: Some(Uuid::new_v4()),
            buyer_id: buyer.id,
            buyer_name: buyer.name.clone(),
            provider_id: provider.id,
            provider_name: provider.name.clone(),
            total_amount: 100.0,
            commission: 15.0,
            status,
            created_at: Utc::now(),
            cancelled_at: None,
        }
    }

    fn rating_for(order: &orders::Model, score: f64) -> CreateRating {
        CreateRating {
            order_id: order.id,
            to_user_id: order.provider_id,
            rating: score,
            review: None,
        }
    }

    #[tokio::test]
    async fn rating_a_non_completed_order_is_a_conflict() {
        let buyer = test_user("Priya");
        let provider = test_user("Dev");
        let order = service_order(&buyer, &provider, Status::Active);
        let input = rating_for(&order, 4.0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order]])
            .into_connection();

        let result = submit_rating(&db, input, &buyer).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn rating_the_same_order_twice_is_a_conflict() {
        let buyer = test_user("Priya");
        let provider = test_user("Dev");
        let order = service_order(&buyer, &provider, Status::Completed);
        let input = rating_for(&order, 4.0);

        let existing = ratings::Model {
            id: Uuid::new_v4(),
            order_id: order.id,
            from_user_id: buyer.id,
            from_user_name: buyer.name.clone(),
            to_user_id: provider.id,
            to_user_name: provider.name.clone(),
            rating: 5.0,
            review: None,
            created_at: Utc::now(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order]])
            .append_query_results([vec![existing]])
            .into_connection();

        let result = submit_rating(&db, input, &buyer).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn rating_an_order_you_are_not_party_to_is_forbidden() {
        let buyer = test_user("Priya");
        let provider = test_user("Dev");
        let stranger = test_user("Mallory");
        let order = service_order(&buyer, &provider, Status::Completed);
        let input = rating_for(&order, 4.0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order]])
            .into_connection();

        let result = submit_rating(&db, input, &stranger).await;
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected() {
        let buyer = test_user("Priya");
        let provider = test_user("Dev");
        let order = service_order(&buyer, &provider, Status::Completed);
        let input = rating_for(&order, 6.0);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![order]])
            .into_connection();

        let result = submit_rating(&db, input, &buyer).await;
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
