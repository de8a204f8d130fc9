use std::fmt;

/// Stable handle for a computer in the network arena.
///
/// Names are never reused within one network: the arena hands them out from a
/// monotonic counter, so a name stays valid (or dangling, never recycled)
/// after its computer is removed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Name(pub u64);

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
