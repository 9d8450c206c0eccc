//! The individual steps of a run
//!
//! Each step issues its requests through [`ApiClient`](crate::client::ApiClient),
//! reads and updates the [`RunContext`](crate::context::RunContext) and returns
//! the failures of its checks. An `Err` means the step could not be evaluated
//! at all (transport error, unexpected status, undecodable body).

pub mod list_users;
pub mod login;
pub mod missing_user;
pub mod show_user;

pub use list_users::list_users;
pub use login::login;
pub use missing_user::missing_user;
pub use show_user::show_user;
