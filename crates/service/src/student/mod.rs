pub mod domain;
pub mod memory;
pub mod repository;
pub mod service;

pub use domain::{CreateStudentInput, NewStudent, UpdateStudentInput};
pub use memory::MemoryStudentRepository;
pub use repository::{SeaOrmStudentRepository, StudentRepository};
pub use service::StudentService;
