pub mod auth;
pub mod gigs;
pub mod notifications;
pub mod orders;
pub mod ratings;
pub mod services;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (signup/login are public, /me requires a token) ──
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(auth::signup))
            .route("/login", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me)),
    );

    // ── User routes ──
    cfg.service(
        web::resource("/users/profile").route(web::put().to(users::update_profile)),
    );
    cfg.service(web::resource("/users/{id}").route(web::get().to(users::get_user)));

    // ── Gig routes (browsing is public, mutations require a token) ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/my/posted", web::get().to(gigs::get_my_posted_gigs))
            .route("/my/accepted", web::get().to(gigs::get_my_accepted_gigs))
            .route("/{id}", web::get().to(gigs::get_gig))
            .route("/{id}/accept", web::post().to(gigs::accept_gig))
            .route("/{id}/status", web::put().to(gigs::update_gig_status)),
    );

    // ── Service routes ──
    cfg.service(
        web::scope("/services")
            .route("", web::get().to(services::get_services))
            .route("", web::post().to(services::create_service))
            .route("/my/created", web::get().to(services::get_my_services))
            .route("/{id}", web::get().to(services::get_service))
            .route("/{id}/book", web::post().to(services::book_service)),
    );

    // ── Order routes (all scoped to the authenticated user) ──
    cfg.service(
        web::scope("/orders")
            .route("", web::get().to(orders::get_orders))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}/cancel", web::post().to(orders::cancel_order))
            .route("/{id}/complete", web::post().to(orders::complete_order)),
    );

    // ── Rating routes ──
    cfg.service(
        web::scope("/ratings")
            .route("", web::post().to(ratings::create_rating))
            .route("/user/{user_id}", web::get().to(ratings::get_user_ratings)),
    );

    // ── Notification routes ──
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(notifications::get_notifications))
            .route("/{id}/read", web::post().to(notifications::mark_read)),
    );
}
