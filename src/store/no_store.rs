use super::{KeyValueStore, StoreError};

/// A no-op store that refuses every call,
/// indicating session persistence is disabled.
pub struct NoStore;

impl NoStore {
    pub fn new() -> Self {
        NoStore
    }
}

impl Default for NoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for NoStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Disabled)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Disabled)
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_store_get() {
        let res = NoStore::new().get("access_token");
        assert!(matches!(res, Err(StoreError::Disabled)));
    }

    #[test]
    fn test_no_store_set() {
        let res = NoStore::new().set("access_token", "tok");
        assert!(res.is_err(), "Expected set to return an error");
    }

    #[test]
    fn test_no_store_remove() {
        let res = NoStore::new().remove("access_token");
        assert!(res.is_err(), "Expected remove to return an error");
    }
}
