//! API trait definitions split by responsibility
//!
//! - [`ListingApi`] - paginated collection reads
//! - [`PermissionApi`] - group privilege writes
//!
//! The [`BitbucketApi`](super::BitbucketApi) super-trait combines both.

mod listing;
mod permission;

pub use listing::ListingApi;
pub use permission::PermissionApi;
