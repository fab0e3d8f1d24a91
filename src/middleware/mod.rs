pub mod panic;
pub mod response;

pub use panic::handle_panic;
pub use response::{ApiResponse, ApiResult};
