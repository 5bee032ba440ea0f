use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    #[error("Missing field '{field}' for company '{company}'")]
    MissingField { company: String, field: &'static str },

    #[error("Unknown sector: {0}")]
    UnknownSector(String),

    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Invalid feature vector: {0}")]
    InvalidFeatureVector(String),

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Duplicate company in dataset: {0}")]
    DuplicateCompany(String),
}

pub type AssessmentResult<T> = Result<T, AssessmentError>;
