//! Option sinks for exercising projection failures.

use config_container::{Error, OptionError, Result, ScalarOptionSink};

/// Records every applied option and rejects the keys it was told to reject.
#[derive(Debug, Default)]
pub struct FailingSink {
    reject: Vec<String>,
    /// Options applied so far, in application order.
    pub applied: Vec<(String, String)>,
}

impl FailingSink {
    /// A sink that rejects each key in `keys`.
    pub fn rejecting<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            reject: keys.into_iter().map(Into::into).collect(),
            applied: Vec::new(),
        }
    }

    /// Keys applied so far.
    pub fn applied_keys(&self) -> Vec<&str> {
        self.applied.iter().map(|(k, _)| k.as_str()).collect()
    }
}

impl ScalarOptionSink for FailingSink {
    fn set_scalar_option(&mut self, key: &str, value: &str) -> std::result::Result<(), OptionError> {
        if self.reject.iter().any(|k| k == key) {
            return Err(OptionError::Rejected(format!("{key} is read-only")));
        }

        self.applied.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn get_scalar_option(&self, key: &str) -> Result<String> {
        self.applied
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| Error::not_found(key))
    }
}
