use serde::{Deserialize, Deserializer, Serialize};

/// Body of a create request. Fields are optional so that missing ones are
/// reported as validation errors instead of deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateStudentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of an update request; supplied fields are merged onto the stored record.
///
/// Outer `None`: field absent, keep the stored value. `Some(None)`: explicit
/// `null`, which replaces the value and then fails validation as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateStudentInput {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub grade: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub email: Option<Option<String>>,
}

/// Only called for keys present in the body, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Validated fields ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub grade: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_input_tells_null_from_absent() {
        let input: UpdateStudentInput =
            serde_json::from_value(json!({"name": null, "grade": "B"})).expect("valid body");
        assert_eq!(input.name, Some(None));
        assert_eq!(input.grade, Some(Some("B".to_string())));
        assert_eq!(input.email, None);
    }
}
