pub mod amount;
pub mod config;
pub mod error;
pub mod paginate;
pub mod providers;
pub mod throttle;

pub use amount::{AmountToken, extract_amount};
pub use error::{AuthError, IsRetryable, TetherError};
pub use paginate::{Page, PageCursor, fetch_all};
pub use providers::basecamp::BasecampService;
pub use providers::notion::NotionClient;
pub use throttle::Throttle;
