pub mod acknowledgment;
pub mod requests;

pub use acknowledgment::{
    CountResponse, DeleteAcknowledgment, InsertAcknowledgment, MessageResponse, SuccessResponse,
    UpdateAcknowledgment,
};
pub use requests::{DeleteAssignmentRequest, PageParams, PageWindow, SubmissionListParams};
