pub mod request_id;
pub mod timing;

pub use request_id::{RequestId, request_id_middleware};
pub use timing::{TimingMiddleware, classify_endpoint};
