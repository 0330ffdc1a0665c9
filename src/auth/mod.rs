//! Authentication module
//!
//! Auth material is attached to outgoing requests by an [`AuthInjector`],
//! chosen by scheme name from a process-wide registry. Only the `NONE`
//! scheme ships built in; other strategies are added with
//! [`register_auth_scheme`] before a client is constructed.

mod injector;
mod registry;
mod types;

pub use injector::{AuthInjector, NoAuthInjector};
pub use registry::{
    is_registered, register_auth_scheme, registered_schemes, resolve_injector, AuthFactory,
};
pub use types::{AuthConfig, DEFAULT_AUTH_SCHEME, NONE_AUTH_SCHEME};

#[cfg(test)]
mod tests;
