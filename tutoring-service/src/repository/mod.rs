//! Persistence. Every read excludes soft-deleted rows.

pub mod admin;
pub mod analytics;
pub mod booking;
pub mod other_service;
pub mod partner;
pub mod testimonial;
pub mod tutor;

pub use admin::{AdminFilter, AdminRepository, InMemoryAdminRepository, PgAdminRepository};
pub use analytics::AnalyticsRepository;
pub use booking::{BookingFilter, BookingRepository};
pub use other_service::{OtherServiceFilter, OtherServiceRepository};
pub use partner::{PartnerFilter, PartnerRepository};
pub use testimonial::{TestimonialFilter, TestimonialRepository};
pub use tutor::{TutorFilter, TutorRepository};
