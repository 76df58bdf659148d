pub mod payload;
pub mod response;

pub use payload::DataPayload;
pub use response::{ApiResponse, ApiResult};
