//! Waypoint: a navigation history state machine.
//!
//! Waypoint manages a stack of navigable locations on top of a host
//! navigation mechanism (a browser-style session history, or a plain
//! in-memory list). Every navigation runs through the same pipeline:
//!
//! 1. A candidate [`Location`] is computed and classified by [`Action`].
//! 2. Transition hooks decide: allow, deny, or ask for confirmation.
//! 3. Confirmation may be answered later; the engine stays suspended and
//!    queues further requests until then.
//! 4. An allowed transition is written to the host and listeners are told.
//!
//! # Core Concepts
//!
//! - **Location**: pathname, search, hash, opaque state and a unique key
//! - **Host**: the [`NavigationHost`] primitives the engine drives
//! - **Hooks**: consulted before a transition commits
//! - **Listeners**: notified after a transition commits
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use waypoint::{Action, History, MemoryHost, Prompt};
//!
//! let history = History::builder(MemoryHost::new())
//!     .get_user_confirmation(|message, confirmation| {
//!         assert_eq!(message, "Discard changes?");
//!         confirmation.deny().unwrap();
//!     })
//!     .build()
//!     .unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! history.listen(move |location, action| {
//!     sink.borrow_mut().push((location.path(), action));
//! });
//!
//! history.push("/editor?doc=1").unwrap();
//!
//! let guard = history.block_with(|location, _action| {
//!     (location.pathname != "/editor").then(|| Prompt::from("Discard changes?"))
//! });
//! history.push("/elsewhere").unwrap();
//! guard.unsubscribe();
//! history.push("#top").unwrap();
//!
//! assert_eq!(
//!     *seen.borrow(),
//!     vec![
//!         ("/editor?doc=1".to_string(), Action::Push),
//!         ("/editor?doc=1#top".to_string(), Action::Push),
//!     ]
//! );
//! ```

pub mod builder;
pub mod core;
mod engine;
pub mod error;
pub mod host;
pub mod transition;

// Re-export commonly used types
pub use builder::{HistoryBuilder, HistoryConfig};
pub use core::{Action, Location, LocationDescriptor, To};
pub use engine::{History, Listener, Subscription};
pub use error::{HistoryError, HostError, Result};
pub use host::{MemoryHost, NavigationHost, SessionHost};
pub use transition::{Confirmation, PendingTransition, Prompt};
