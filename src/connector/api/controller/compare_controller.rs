use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::ComparisonData;

use super::super::render::{format_comparison, waiting_spinner};
use super::super::Container;

pub struct CompareController<'a> {
    container: &'a Container,
}

impl<'a> CompareController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn compare(&self, car1: String, car2: String, format: OutputFormat) -> Result<String> {
        let data = self.fetch(&car1, &car2).await?;

        match format {
            OutputFormat::Text => Ok(format_comparison(&data)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&data)?),
        }
    }

    /// Run the comparison without rendering it, for callers that keep the
    /// result around.
    pub async fn fetch(&self, car1: &str, car2: &str) -> Result<ComparisonData> {
        let use_case = self.container.compare_use_case();
        let spinner = waiting_spinner("Comparing...");
        let result = use_case.compare(car1, car2).await;
        spinner.finish_and_clear();

        Ok(result?)
    }
}
