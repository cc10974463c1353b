pub mod evaluations;
pub mod majors;
pub mod users;

pub use evaluations::EvaluationService;
pub use majors::MajorService;
pub use users::UserService;
