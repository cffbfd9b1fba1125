//! `grpc` implements the agency gateway over the agency gRPC API
//!
//! The generated types live in [`proto`]. The [`client::AgencyClient`] implements all
//! gateway traits from `prople_agency_core`, translating between both type systems
//! through the functions in [`convert`].
pub mod proto {
    tonic::include_proto!("agency.v1");
}

pub mod channel;
pub mod client;
pub mod convert;
pub mod interceptor;

pub use channel::ChannelParams;
pub use client::AgencyClient;
pub use interceptor::BearerInterceptor;
