use crate::store::EntityStore;

///
/// MemoryStore
///
/// Minimal in-memory entity store used by repository tests: hands out
/// clones of a fixed entity set.
///

pub(crate) struct MemoryStore<E> {
    entities: Vec<E>,
}

impl<E> MemoryStore<E> {
    pub const fn new(entities: Vec<E>) -> Self {
        Self { entities }
    }
}

impl<E: Clone> EntityStore<E> for MemoryStore<E> {
    fn load_all(&self) -> Vec<E> {
        self.entities.clone()
    }
}
