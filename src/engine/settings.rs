//! Resolved options and the translation between locations and host URLs.

use crate::builder::Addressing;
use crate::core::{create_location, has_basename, strip_basename, Location, PathTransform};
use crate::host::HostEntry;
use crate::transition::ConfirmFn;
use std::rc::Rc;
use tracing::warn;
use uuid::Uuid;

pub(crate) struct Settings {
    /// Already normalized.
    pub(crate) basename: String,
    pub(crate) key_length: usize,
    pub(crate) addressing: Addressing,
    pub(crate) transform: Option<PathTransform>,
    pub(crate) confirm: Option<Rc<ConfirmFn>>,
}

impl Settings {
    pub(crate) fn create_key(&self) -> String {
        let mut key = Uuid::new_v4().simple().to_string();
        key.truncate(self.key_length);
        key
    }

    /// The URL the host should show for `location`.
    pub(crate) fn href(&self, location: &Location) -> String {
        let path = format!("{}{}", self.basename, location.path());
        match self.addressing {
            Addressing::Path => path,
            Addressing::Hash(hash_type) => format!("#{}", hash_type.encode(&path)),
        }
    }

    pub(crate) fn host_entry(&self, location: &Location) -> HostEntry {
        HostEntry {
            url: self.href(location),
            key: location.key.clone(),
            state: location.state.clone(),
        }
    }

    /// Read a host entry back into a location.
    pub(crate) fn read_location(&self, entry: &HostEntry) -> Location {
        let path = match self.addressing {
            Addressing::Path => entry.url.clone(),
            Addressing::Hash(hash_type) => {
                let fragment = entry.url.split_once('#').map_or("", |(_, f)| f);
                hash_type.decode(fragment)
            }
        };

        if !self.basename.is_empty() && !has_basename(&path, &self.basename) {
            warn!(
                path = %path,
                basename = %self.basename,
                "host path does not begin with the configured basename"
            );
        }

        let path = strip_basename(&path, &self.basename);
        create_location(
            path.as_ref(),
            entry.state.clone(),
            entry.key.clone(),
            None,
            self.transform.as_ref(),
        )
    }
}
