//! HTTP execution layer: client construction, transport, interceptors and
//! error normalization.

pub mod client;
pub mod errors;
pub mod interceptor;
pub mod transport;

pub use client::build_http_client_from_config;
pub use errors::classify_http_error;
pub use interceptor::{HttpInterceptor, HttpRequestContext, LoggingInterceptor};
pub use transport::{HttpTransport, HttpTransportRequest, HttpTransportResponse, ReqwestTransport};
