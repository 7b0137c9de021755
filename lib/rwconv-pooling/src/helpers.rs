//! Helpers for moving poolable buffers between element types.

/// Empties a vector and reuses its allocation for a vector of a different element type.
///
/// This exists to move lifetime-bound buffers (for example, `Vec<&'a str>`) back into a pool that can only hold
/// `'static` items (`Vec<&'static str>`) once they have been emptied. The conversion relies on the standard library
/// collecting a `vec::IntoIter` in place when the source and destination element types share the same size and
/// alignment, which holds for any two types that differ only by lifetime. If the allocation cannot be reused, the
/// returned vector has no capacity, which pools treat as not worth retaining.
pub fn recycle_vec<T, U>(mut buf: Vec<T>) -> Vec<U> {
    buf.clear();
    buf.into_iter()
        .map(|_: T| -> U { unreachable!("buffer is cleared before being recycled") })
        .collect()
}
