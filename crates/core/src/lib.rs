//! Domain logic for the Kinoplex cinema-booking backend.
//!
//! This crate is persistence- and transport-agnostic: it owns the booking and
//! payment state machines, derived seat availability, and the field-level
//! validation rules for catalog entities. The `db` and `api` crates build on
//! top of it.

pub mod auditorium;
pub mod booking;
pub mod error;
pub mod movie;
pub mod payment;
pub mod roles;
pub mod screening;
pub mod seat;
pub mod status;
pub mod types;
