//! # Router Module
//!
//! Resolves `(method, path)` pairs to operations declared in a
//! [`Specification`](crate::spec::Specification).
//!
//! ## Architecture
//!
//! 1. **Compilation**: each endpoint template (e.g. `/note/{note_id}/`) becomes
//!    an anchored regex whose placeholders capture exactly one path segment.
//! 2. **Matching**: operations are tried in declaration order; the first one
//!    with the same method and a matching template wins. When nothing
//!    matches, the caller-supplied ignore patterns decide between
//!    [`LookupResult::Ignored`] and [`LookupResult::NotFound`].
//!
//! ```rust,ignore
//! use swagger_validator::router::{LookupResult, OperationLookup};
//!
//! let lookup = OperationLookup::new(&spec.apis, [r"/health"])?;
//! if let LookupResult::Found(m) = lookup.lookup("GET", "/note/123/") {
//!     assert_eq!(m.get_path_param("note_id"), Some("123"));
//! }
//! ```

mod core;

pub use core::{LookupResult, OperationLookup, ParamVec, PathMatcher, RouteMatch, MAX_INLINE_PARAMS};
