pub mod assignments;
pub mod health;
pub mod submissions;
pub mod token;

pub use assignments::{
    assignment_count, create_assignment, delete_assignment, get_assignment, list_assignments,
    upsert_assignment,
};
pub use health::{health_check, readiness_check, root};
pub use submissions::{create_submission, get_submission, list_submissions, update_submission};
pub use token::issue_access_token;
