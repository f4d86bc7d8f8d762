pub mod basecamp;
pub mod notion;

mod response;

pub use response::ApiResponse;
