#![forbid(unsafe_code)]

//! Client for the external network-capability provider.
//!
//! The provider owns device identity, location, connectivity and QoS session
//! state; this crate only talks to it. [`NetworkProvider`] is the seam the
//! rest of the workspace programs against, [`HttpProvider`] is the production
//! implementation, and [`TimeoutProvider`]/[`RetryProvider`] are stackable
//! decorators bounding and retrying calls.

mod error;
mod http;
mod retry;
mod timeout;
mod traits;
mod types;

pub use crate::{
    error::{ProviderError, ProviderResult},
    http::HttpProvider,
    retry::RetryProvider,
    timeout::TimeoutProvider,
    traits::{NetworkProvider, ProviderExt},
    types::{
        ConnectivityStatus, DeviceHandle, DeviceIdentifier, Ipv4Pair, Location, ProviderOptions,
        RetryPolicy, SessionHandle, SessionId, SessionRequest, SessionStatus,
    },
};

#[cfg(test)]
pub use crate::traits::MockNetworkProvider;
