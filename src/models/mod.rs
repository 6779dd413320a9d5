mod post;
mod thread;

pub use post::{
    CreatePostRequest, Post, PostDetail, PostDetailsParams, PostId, PostRow, UpdatePostRequest,
};
pub use thread::{CreateThreadRequest, Thread, ThreadId, ThreadRef, UpdateThreadRequest};
