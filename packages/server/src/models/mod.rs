pub mod auth;
pub mod post;
pub mod shared;
pub mod showcase;
pub mod upload;
