pub mod auditorium;
pub mod booking;
pub mod movie;
pub mod payment;
pub mod role;
pub mod screening;
pub mod seat;
pub mod session;
pub mod user;
