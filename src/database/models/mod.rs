pub mod article;
pub mod comment;
pub mod table_info;
pub mod topic;
pub mod user;

pub use article::Article;
pub use comment::{Comment, NewComment};
pub use table_info::TableInfo;
pub use topic::Topic;
pub use user::User;
