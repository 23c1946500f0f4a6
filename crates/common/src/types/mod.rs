use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Error payload of the response envelope: a single message or a list of them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ErrorBody {
    Message(String),
    Messages(Vec<String>),
}

/// JSON envelope shared by every `/students` response.
///
/// Absent fields are omitted rather than serialized as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, count: None, data: Some(data), error: None }
    }

    pub fn fail(error: ErrorBody) -> Self {
        Self { success: false, count: None, data: None, error: Some(error) }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(items: Vec<T>) -> Self {
        Self { success: true, count: Some(items.len()), data: Some(items), error: None }
    }
}
