use crate::dto::HealthRes;

/// Liveness message returned by the root endpoint.
pub const LIVENESS_MESSAGE: &str = "Disease Prediction API is running";

/// Simple health service for the REST API and any future transports.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` carrying the liveness message.
    pub fn check_health() -> HealthRes {
        HealthRes {
            message: LIVENESS_MESSAGE.into(),
        }
    }
}
