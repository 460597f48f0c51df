///
/// EntityStore
///
/// Seam to the host persistence substrate. The repository only needs the
/// entity set with translation collections populated; filtering, ordering
/// and slicing happen against the accumulated statement.
///

pub trait EntityStore<E> {
    fn load_all(&self) -> Vec<E>;
}
