pub mod appointment;
pub mod classification;
pub mod client;
pub mod faq;
pub mod session;

pub use appointment::{Appointment, AppointmentDraft};
pub use classification::ClassificationResult;
pub use client::{AdminUser, Client, SuperAdmin};
pub use faq::{Faq, FaqRule, TenantScope};
pub use session::{Role, Session};
