//! HandlerId - the name a handler is known by
//!
//! A handler's id travels much further than the handler itself: it is copied
//! into every registration outcome, replacement report, metrics label and CLI
//! line, and route tables refer to handlers by it. Hence:
//! - `Arc<str>` storage, so those copies never reallocate the name
//! - `Borrow<str>` with str-compatible `Eq`/`Hash`, so a registry keyed by
//!   `HandlerId` is queried directly with the `&str` read from a route table
//! - a plain string on the wire, identical to the table's `handler = "..."`
//!
//! The id is a *name*, not the handler's identity. Two distinct handlers may
//! carry equal ids; whether a registration replaces a handler is decided by
//! the handler allocation, never by comparing ids.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of a [`PathHandler`](crate::PathHandler).
///
/// ```
/// use contracts::HandlerId;
/// use std::collections::HashMap;
///
/// let mut status: HashMap<HandlerId, i32> = HashMap::new();
/// status.insert("handler_binterface_key".into(), 0);
///
/// // lookup with the name exactly as a route table spells it
/// assert_eq!(status.get("handler_binterface_key"), Some(&0));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(Arc<str>);

impl HandlerId {
    /// Id for the given handler name
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The handler name
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HandlerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Arc<str> hashes and compares like str, which keeps this consistent with the
// derived Hash/Eq above.
impl Borrow<str> for HandlerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for HandlerId {
    fn from(name: String) -> Self {
        Self(name.into())
    }
}

impl PartialEq<str> for HandlerId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HandlerId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerId").field(&self.as_str()).finish()
    }
}

impl Serialize for HandlerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HandlerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
