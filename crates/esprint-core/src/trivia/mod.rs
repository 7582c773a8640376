//! Trivia handling: binding comments to nodes and rendering them

mod attach;
mod render;

pub use attach::{AttachedComment, CommentMap, Placement, attach_comments};
pub use render::{RenderedComment, render_comment};
