use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentDoc {
    pub id: i64,
    pub name: String,
    pub grade: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
pub struct CreateStudentDoc {
    pub name: String,
    pub grade: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateStudentDoc {
    pub name: Option<String>,
    pub grade: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct StudentResponseDoc {
    pub success: bool,
    pub data: StudentDoc,
}

#[derive(Serialize, ToSchema)]
pub struct StudentListResponseDoc {
    pub success: bool,
    pub count: usize,
    pub data: Vec<StudentDoc>,
}

/// A single message for not-found and server errors, a list for validation failures.
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorDetailDoc {
    Message(String),
    Messages(Vec<String>),
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponseDoc {
    pub success: bool,
    pub error: ErrorDetailDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::students::list,
        crate::students::get,
        crate::students::create,
        crate::students::update,
        crate::students::delete,
    ),
    components(
        schemas(
            HealthResponse,
            StudentDoc,
            CreateStudentDoc,
            UpdateStudentDoc,
            StudentResponseDoc,
            StudentListResponseDoc,
            ErrorDetailDoc,
            ErrorResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
