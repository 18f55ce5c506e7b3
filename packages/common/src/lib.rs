pub mod media;
pub mod password;
pub mod post_status;

pub use media::ImageRef;
pub use post_status::PostStatus;
