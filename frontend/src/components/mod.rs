pub mod cta;
pub mod footer;
pub mod hero;
pub mod problems;
pub mod services;
pub mod testimonials;

pub use cta::ImprovedCta;
pub use footer::Footer;
pub use hero::HeroSection;
pub use problems::ProblemsSection;
pub use services::ServicesSection;
pub use testimonials::TestimonialsSection;
