//! pl-project: project file format, defaults and validation.

pub mod convert;
pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{ValidationError, validate_project};

/// Newest project file version this build understands.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn from_yaml_str(content: &str) -> ProjectResult<PipelineProject> {
    let project: PipelineProject = serde_yaml::from_str(content)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn to_yaml_string(project: &PipelineProject) -> ProjectResult<String> {
    validate_project(project)?;
    Ok(serde_yaml::to_string(project)?)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<PipelineProject> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, project: &PipelineProject) -> ProjectResult<()> {
    let content = to_yaml_string(project)?;
    std::fs::write(path, content)?;
    Ok(())
}
