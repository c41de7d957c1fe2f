use pl_chart::ChartError;
use pl_design::DesignError;
use pl_project::ProjectError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Design error: {0}")]
    Design(#[from] DesignError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
