//! Report generation port trait.

use std::path::Path;

use crate::domain::analysis::Analysis;
use crate::domain::error::ClimtrendError;

/// Port for rendering an analysis to a file.
pub trait ReportPort {
    fn write(&self, analysis: &Analysis, output_path: &Path) -> Result<(), ClimtrendError>;
}
