pub mod gigs;
pub mod notifications;
pub mod orders;
pub mod ratings;
pub mod services;
pub mod users;
