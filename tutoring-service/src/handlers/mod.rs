pub mod admin;
pub mod analytics;
pub mod booking;
pub mod health;
pub mod other_service;
pub mod partner;
pub mod testimonial;
pub mod tutor;
