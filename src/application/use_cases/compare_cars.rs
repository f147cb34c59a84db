use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::GenerativeModel;
use crate::domain::{ComparisonData, ComparisonRequest, DomainError, GenerationRequest, Locale};

/// Requests a structured side-by-side comparison of two cars.
///
/// The model is asked for raw JSON matching [`ComparisonData::response_schema`]
/// and the reply is validated locally. The call either yields a complete
/// [`ComparisonData`] or fails; nothing partial is ever returned.
pub struct CompareCarsUseCase {
    model: Arc<dyn GenerativeModel>,
    locale: Locale,
}

impl CompareCarsUseCase {
    pub fn new(model: Arc<dyn GenerativeModel>, locale: Locale) -> Self {
        Self { model, locale }
    }

    pub async fn compare(&self, car1: &str, car2: &str) -> Result<ComparisonData, DomainError> {
        let request = ComparisonRequest::new(car1, car2)?;
        self.execute(&request).await
    }

    pub async fn execute(&self, request: &ComparisonRequest) -> Result<ComparisonData, DomainError> {
        info!(
            "Comparing '{}' with '{}' using {}",
            request.car1(),
            request.car2(),
            self.model.model_name()
        );
        let start_time = Instant::now();

        let generation = GenerationRequest::new(
            self.locale
                .comparison_prompt(request.car1(), request.car2()),
        )
        .with_response_schema(ComparisonData::response_schema());

        let response = self.model.complete_text(&generation).await?;
        debug!("Raw comparison payload: {}", response.text());

        let data = ComparisonData::parse(response.text())?;

        info!(
            "Comparison ready with {} features in {:.2}s",
            data.row_count(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(data)
    }
}
