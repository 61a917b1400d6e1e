pub mod etl;
pub mod grading;
pub mod parser;
pub mod pipeline;
pub mod toppers;

pub use crate::domain::model::{
    Grade, GradedRecord, ParseOutcome, StudentRecord, TopperReport,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
