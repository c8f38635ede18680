pub mod bookings;
pub mod index;
pub mod services;
