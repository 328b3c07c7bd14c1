//! Read access to the hosting environment.
//!
//! Credentials and config overrides are looked up through [`EnvSource`]
//! so the dispatcher and config loader can be handed a fixed map in tests
//! instead of the live process environment.

use std::collections::HashMap;

/// Something that can answer "what is variable `name` set to?".
pub trait EnvSource: Send + Sync {
    /// Raw lookup. `None` if unset.
    fn get(&self, name: &str) -> Option<String>;

    /// Lookup that treats an empty or whitespace-only value as unset.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }
}

/// The live process environment.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}
