//! PlatformId - Cheap-to-clone platform identifier
//!
//! Uses Arc<str> internally for O(1) clone operations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Platform identifier with cheap cloning.
///
/// Internally uses `Arc<str>` so cloning only increments a reference count
/// instead of allocating new memory. Platform ids are created once at
/// configuration time and cloned into every dispatched task and outcome.
///
/// Ordering is lexicographic over the underlying string, which is what makes
/// aggregate reports deterministic.
///
/// # Examples
/// ```
/// use contracts::PlatformId;
///
/// let id: PlatformId = "twitch".into();
/// let id2 = id.clone();  // O(1) - just increments ref count
/// assert_eq!(id, id2);
/// assert_eq!(id.as_str(), "twitch");
/// ```
#[derive(Clone, Default)]
pub struct PlatformId(Arc<str>);

impl PlatformId {
    /// Create a new PlatformId from a string slice.
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for PlatformId {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for PlatformId {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlatformId {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlatformId {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for PlatformId {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlatformId({:?})", self.0)
    }
}

impl PartialEq for PlatformId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for PlatformId {}

impl PartialEq<str> for PlatformId {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for PlatformId {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl PartialOrd for PlatformId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlatformId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

// Hash - same as str hash for HashMap compatibility
impl Hash for PlatformId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl Serialize for PlatformId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PlatformId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_clone_is_cheap() {
        let id1: PlatformId = "twitch".into();
        let id2 = id1.clone();

        // Both should point to same underlying data (Arc clone is O(1))
        assert_eq!(id1.as_str().as_ptr(), id2.as_str().as_ptr());
    }

    #[test]
    fn test_equality() {
        let id: PlatformId = "youtube".into();
        assert_eq!(id, "youtube");
        assert_eq!(id, PlatformId::from("youtube"));
    }

    #[test]
    fn test_lexicographic_order() {
        let mut ids: Vec<PlatformId> = vec!["youtube".into(), "facebook".into(), "twitch".into()];
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(sorted, vec!["facebook", "twitch", "youtube"]);
    }

    #[test]
    fn test_hashmap_key() {
        let mut map: HashMap<PlatformId, i32> = HashMap::new();
        map.insert("twitch".into(), 1);
        map.insert("youtube".into(), 2);

        // Can lookup with &str
        assert_eq!(map.get("twitch"), Some(&1));
        assert_eq!(map.get("youtube"), Some(&2));
    }

    #[test]
    fn test_serde() {
        let id: PlatformId = "facebook".into();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"facebook\"");

        let parsed: PlatformId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
