/*!

  Process-wide name interning.

  Every name that flows into the IR (function names, global/local variable
  names, basic-block labels) is interned here once and referred to everywhere
  else by a small `Copy` symbol. This mirrors the single global
  `WyrmContext`-style table the rest of this lineage reaches for instead of
  threading context through every call.

*/

use std::sync::Mutex;
use string_interner::symbol::SymbolU32;
use string_interner::{DefaultBackend, StringInterner};

/// A stable handle to an interned string. Two handles compare equal iff they
/// were produced by interning equal strings.
pub type InternedStr = SymbolU32;

pub struct Context {
    interner: Mutex<StringInterner<DefaultBackend>>,
}

impl Default for Context {
    fn default() -> Context {
        Context {
            interner: Mutex::new(StringInterner::new()),
        }
    }
}

impl Context {
    /// Intern `s`, returning a handle equal to any previously interned
    /// handle of an equal string.
    pub fn intern(&self, s: impl AsRef<str>) -> InternedStr {
        self.interner
            .lock()
            .expect("context mutex poisoned")
            .get_or_intern(s.as_ref())
    }

    /// Resolve a handle back to its backing string.
    ///
    /// Panics if `handle` was not produced by this `Context` -- resolving an
    /// unknown handle is a programmer error, not a recoverable condition.
    pub fn resolve(&self, handle: InternedStr) -> String {
        self.interner
            .lock()
            .expect("context mutex poisoned")
            .resolve(handle)
            .expect("interned handle not found in context")
            .to_string()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONTEXT: Context = Context::default();
}

/// Intern `s` in the process-wide [`Context`].
pub fn intern(s: impl AsRef<str>) -> InternedStr {
    GLOBAL_CONTEXT.intern(s)
}

/// Resolve a handle interned via [`intern`] back to its string.
pub fn resolve(handle: InternedStr) -> String {
    GLOBAL_CONTEXT.resolve(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_dedupes_equal_strings() {
        let a = intern("hello");
        let b = intern("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn interning_distinguishes_different_strings() {
        let a = intern("alpha_ctx_test");
        let b = intern("beta_ctx_test");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let h = intern("round_trip_ctx_test");
        assert_eq!(resolve(h), "round_trip_ctx_test");
    }
}
