//! Domain entities - the core business objects.

mod category;
mod comment;
mod post;

pub use category::Category;
pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post, PostPatch, PostStatus};
