//! Persisted record types and the small traits shared across them.

pub mod common;
pub mod profile;
pub mod reservation;
pub mod subscription;

pub use common::{Displayable, Identifiable, NamedEntity};
pub use profile::{Credentials, UserProfile};
pub use reservation::{Reservation, ReservationStatus, ReservationType};
pub use subscription::{BillingCycle, Category, Subscription};
