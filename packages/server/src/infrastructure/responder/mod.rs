pub mod keyword;

pub use keyword::{KeywordResponder, RandomReplySelector};
