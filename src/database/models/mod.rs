pub mod admin;
pub mod blog_post;
pub mod career_posting;

pub use admin::{Admin, PublicAdmin};
pub use blog_post::{Author, BlogPost, BlogPostRow};
pub use career_posting::CareerPosting;
