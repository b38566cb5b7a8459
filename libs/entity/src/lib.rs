pub mod contact;
pub mod post;
pub mod related;
pub mod slug;
pub mod user;

pub mod prelude {
    pub use crate::contact::{Contact as ContactEntity, NewContact};
    pub use crate::post::{NewPost, Post as PostEntity};
    pub use crate::user::User as UserEntity;
}
