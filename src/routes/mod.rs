pub mod groups;
pub mod posts;
pub mod profiles;
pub mod users;
