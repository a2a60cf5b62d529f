//! Stable short identifiers for types and scoped names.
//!
//! Event dispatch is keyed by strings. When an event type does not supply its own
//! identifier, the name is derived from `std::any::type_name`, which is stable for
//! the lifetime of a program run, and stripped of its module path.

/// Strip any `::`-separated scope prefix, keeping the trailing segment.
///
/// Generic arguments are shortened the same way, so
/// `app::events::Wrapper<app::events::Open>` becomes `Wrapper<Open>`.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::ident::shorten;
///
/// assert_eq!(shorten("door::events::Open"), "Open");
/// assert_eq!(shorten("Open"), "Open");
/// assert_eq!(shorten("a::Wrapper<b::c::Open>"), "Wrapper<Open>");
/// ```
pub fn shorten(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment_start = 0;
    let bytes = name.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b':' if bytes.get(i + 1) == Some(&b':') => {
                i += 2;
                segment_start = i;
                continue;
            }
            b'<' | b'>' | b',' | b' ' | b'(' | b')' | b'[' | b']' | b'&' | b';' => {
                out.push_str(&name[segment_start..=i]);
                segment_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    out.push_str(&name[segment_start..]);
    out
}

/// Return the path-stripped name of `T`.
///
/// # Example
///
/// ```rust
/// use fsmkit::core::ident::short_type_name;
///
/// struct Begin;
///
/// assert_eq!(short_type_name::<Begin>(), "Begin");
/// assert_eq!(short_type_name::<Vec<String>>(), "Vec<String>");
/// ```
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    if !full.contains('<') {
        return match full.rfind("::") {
            Some(pos) => &full[pos + 2..],
            None => full,
        };
    }
    // Generic names need rewriting; intern them so callers keep a 'static str.
    intern(shorten(full))
}

fn intern(name: String) -> &'static str {
    use parking_lot::Mutex;
    use std::collections::HashSet;
    use std::sync::OnceLock;

    static NAMES: OnceLock<Mutex<HashSet<&'static str>>> = OnceLock::new();
    let mut names = NAMES.get_or_init(|| Mutex::new(HashSet::new())).lock();
    if let Some(existing) = names.get(name.as_str()) {
        return *existing;
    }
    let leaked: &'static str = Box::leak(name.into_boxed_str());
    names.insert(leaked);
    leaked
}

#[cfg(test)]
mod tests {
    use super::*;

    mod nested {
        pub struct Open;
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn shorten_keeps_unscoped_names() {
        assert_eq!(shorten("Closed"), "Closed");
        assert_eq!(shorten(""), "");
    }

    #[test]
    fn shorten_strips_to_last_segment() {
        assert_eq!(shorten("fsm::test::my_state::Closed"), "Closed");
        assert_eq!(shorten("::Closed"), "Closed");
    }

    #[test]
    fn shorten_handles_generic_arguments() {
        assert_eq!(
            shorten("std::collections::HashMap<alloc::string::String, u8>"),
            "HashMap<String, u8>"
        );
    }

    #[test]
    fn type_name_is_scope_stripped() {
        assert_eq!(short_type_name::<nested::Open>(), "Open");
        assert_eq!(
            short_type_name::<nested::Wrapper<nested::Open>>(),
            "Wrapper<Open>"
        );
    }

    #[test]
    fn type_name_is_stable_across_calls() {
        let first = short_type_name::<nested::Wrapper<u32>>();
        let second = short_type_name::<nested::Wrapper<u32>>();
        assert_eq!(first, second);
        assert!(std::ptr::eq(first, second));
    }
}
