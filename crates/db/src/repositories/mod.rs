//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Methods suffixed `_tx` run inside
//! a caller-owned transaction.

pub mod auditorium_repo;
pub mod booking_repo;
pub mod movie_repo;
pub mod payment_repo;
pub mod role_repo;
pub mod screening_repo;
pub mod seat_repo;
pub mod session_repo;
pub mod user_repo;

pub use auditorium_repo::AuditoriumRepo;
pub use booking_repo::BookingRepo;
pub use movie_repo::MovieRepo;
pub use payment_repo::PaymentRepo;
pub use role_repo::RoleRepo;
pub use screening_repo::ScreeningRepo;
pub use seat_repo::SeatRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
