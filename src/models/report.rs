use serde::Serialize;

/// Subject roll-up over a student's whole attendance history.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct SubjectReport {
    pub subject: String,
    pub total: u32,
    pub present: u32,
    /// present / total * 100 with two decimals, e.g. `"66.67"`.
    pub percentage: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
