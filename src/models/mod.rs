mod catalog;
mod event;
mod post;
mod user;

pub use catalog::{Category, Location};
pub use event::{Event, EventView, NewEvent};
pub use post::{Comment, CommentView, Like, Pagination, Post, PostView};
pub use user::{ProfileUpdate, ProfileView, User};
