//! The navigation engine: request queue, hook evaluation, confirmation
//! suspension, host writes and listener notification.

mod history;
mod position;
mod settings;

pub use history::{History, Listener, Subscription};
pub(crate) use settings::Settings;
