use hashbrown::HashSet;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Interned string, cheap to clone and safe to hold past a pool reset.
pub type IStr = Arc<str>;

static EMPTY_ISTR: LazyLock<IStr> = LazyLock::new(|| Arc::from(""));

/// Returns the shared empty string.
#[inline]
pub fn empty_istr() -> IStr {
    Arc::clone(&EMPTY_ISTR)
}

/// Session-scoped pool for names, ability names and damage type words.
///
/// Owned by the session context rather than a global so that loading a new
/// log can drop everything the previous one interned.
#[derive(Debug, Default)]
pub struct StringPool {
    strings: RwLock<HashSet<IStr>>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning the pooled copy.
    pub fn intern(&self, s: &str) -> IStr {
        if s.is_empty() {
            return empty_istr();
        }
        {
            let strings = self.strings.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(existing) = strings.get(s) {
                return Arc::clone(existing);
            }
        }
        let mut strings = self.strings.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(strings.get_or_insert_with(s, |s| Arc::from(s)))
    }

    /// Drop every pooled string. Strings already handed out stay valid.
    pub fn clear(&self) {
        self.strings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.strings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
