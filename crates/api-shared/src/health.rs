use crate::res::HealthRes;

/// Simple health service used by the REST API.
///
/// Provides a standardised way to check that the content API process is up.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Content API is alive".into(),
        }
    }
}
