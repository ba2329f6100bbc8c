use serde::Deserialize;
use service_core::error::AppError;
use validator::Validate;

/// `GET /create-assignment?page=&items=`. Negative or non-numeric values are
/// rejected by deserialization; `items` must be at least 1 when given.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PageParams {
    pub page: Option<u64>,
    #[validate(range(min = 1))]
    pub items: Option<u64>,
}

/// A resolved skip/limit window over a collection's natural order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

impl PageParams {
    /// `skip = page * items`. Without `items` the whole collection is
    /// returned and `page` is ignored.
    pub fn window(&self) -> Result<Option<PageWindow>, AppError> {
        let Some(items) = self.items else {
            return Ok(None);
        };
        let page = self.page.unwrap_or(0);
        let skip = page
            .checked_mul(items)
            .filter(|skip| i64::try_from(*skip).is_ok() && i64::try_from(items).is_ok())
            .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Page out of range")))?;

        Ok(Some(PageWindow { skip, limit: items }))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListParams {
    #[serde(rename = "userEmail")]
    pub user_email: Option<String>,
}

impl SubmissionListParams {
    /// Empty values behave like an absent filter.
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref().filter(|email| !email.is_empty())
    }
}

/// The claimed owner email. Authorization is an exact string match against
/// the stored value, so no address format is imposed here.
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteAssignmentRequest {
    #[validate(length(min = 1))]
    pub email: String,
}
