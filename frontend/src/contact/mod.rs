pub mod modal;
pub mod submitter;

pub use modal::ContactModal;
