use std::ops::Deref;

use serde::{Deserialize, Serialize};

pub mod contact;
pub mod delivery;
pub mod email_address;

/// Wrapper for values that must not appear in logs or debug output.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensitive<T>(pub T);

impl<T> std::fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[redacted]")
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Sensitive<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_debug_is_redacted() {
        let secret = Sensitive("hunter2".to_owned());
        assert_eq!(format!("{secret:?}"), "[redacted]");
    }

    #[test]
    fn sensitive_serde_is_transparent() {
        let secret = Sensitive("hunter2".to_owned());
        assert_eq!(
            serde_json::to_value(&secret).unwrap(),
            serde_json::json!("hunter2")
        );
    }
}
