/// A tri-state wrapper for fields of a partial-update payload.
///
/// JSON cannot distinguish an absent key from an explicit `null` when both
/// deserialize into `Option<T>`. `Patch<T>` keeps the distinction:
///
/// - `Missing`: the key was not present; the stored value is left untouched.
/// - `Null`: the key was present with an explicit `null`; the stored value
///   is cleared.
/// - `Value(T)`: the key was present with a value; the stored value is
///   replaced.
///
/// Fields using `Patch<T>` must be annotated with `#[serde(default)]` so an
/// absent key falls back to `Missing` instead of being a deserialize error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the key was absent from the payload.
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Returns a reference to the supplied value, if one was supplied.
    pub fn as_value(&self) -> Option<&T> {
        match self {
            Patch::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Resolves the patch against the currently stored value.
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Missing => current,
            Patch::Null => None,
            Patch::Value(v) => Some(v),
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<'de, T> serde::Deserialize<'de> for Patch<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Patch::Value(v),
            None => Patch::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        #[serde(default)]
        email: Patch<String>,
    }

    #[test]
    fn test_absent_key_deserializes_to_missing() {
        let payload: Payload = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(payload.email, Patch::Missing);
    }

    #[test]
    fn test_explicit_null_deserializes_to_null() {
        let payload: Payload =
            serde_json::from_str(r#"{"email": null}"#).expect("should deserialize");
        assert_eq!(payload.email, Patch::Null);
    }

    #[test]
    fn test_value_deserializes_to_value() {
        let payload: Payload =
            serde_json::from_str(r#"{"email": "a@b.example"}"#).expect("should deserialize");
        assert_eq!(payload.email, Patch::Value("a@b.example".to_string()));
    }

    #[test]
    fn test_apply_resolves_against_stored_value() {
        let stored = Some("old@example.com".to_string());

        assert_eq!(
            Patch::Missing.apply(stored.clone()),
            Some("old@example.com".to_string()),
            "missing should keep the stored value"
        );
        assert_eq!(
            Patch::<String>::Null.apply(stored.clone()),
            None,
            "null should clear the stored value"
        );
        assert_eq!(
            Patch::Value("new@example.com".to_string()).apply(stored),
            Some("new@example.com".to_string()),
            "value should replace the stored value"
        );
    }
}
