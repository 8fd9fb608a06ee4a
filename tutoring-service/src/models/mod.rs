pub mod admin;
pub mod analytics;
pub mod booking;
pub mod other_service;
pub mod partner;
pub mod testimonial;
pub mod tutor;

pub use admin::{Admin, AdminResponse, NewAdmin, Role};
pub use analytics::AnalyticsTotals;
pub use booking::Booking;
pub use other_service::{OtherService, OtherServiceTranslation};
pub use partner::Partner;
pub use testimonial::{Testimonial, TestimonialTranslation};
pub use tutor::Tutor;
