pub mod handlers;
pub mod issue;
