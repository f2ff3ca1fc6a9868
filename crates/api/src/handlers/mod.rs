pub mod admin;
pub mod auditorium;
pub mod auth;
pub mod booking;
pub mod movie;
pub mod payment;
pub mod screening;
pub mod seat;
