pub mod annual_report;
pub mod hero_slide;
pub mod partner;
pub mod post;
