//! Pure building blocks of the history engine.
//!
//! - [`Location`] and its construction rules
//! - [`Action`] classification
//! - The path codec: encoding, relative resolution, basename handling
//! - An ordered callback [`Registry`]
//!
//! Nothing in this module talks to a host or holds engine state.

mod action;
mod location;
mod path;
mod registry;

pub use action::Action;
pub use location::{create_location, create_path, Location, LocationDescriptor, To};
pub use path::{
    add_leading_slash, decode_path, encode_path, has_basename, normalize_basename,
    normalize_pathname, resolve_pathname, strip_basename, strip_leading_slash,
    strip_trailing_slash, HashType, PathTransform,
};
pub use registry::{RegistrationId, Registry};
