//! Collection services: read the whole persisted collection, mutate in
//! memory, write the whole collection back.

pub mod profile_service;
pub mod reservation_service;
pub mod subscription_service;

pub use profile_service::ProfileService;
pub use reservation_service::{sample_reservations, ReservationService};
pub use subscription_service::{sample_subscriptions, SortOrder, SubscriptionService};
