mod http_job_service;
mod mock_job_service;

pub use http_job_service::HttpJobService;
pub use mock_job_service::MockJobService;
