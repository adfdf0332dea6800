use crate::engine::QueryAugmenter;
use crate::search::SearchClient;
use crate::ui::FeedbackCollector;
use anyhow::Result;

/// Fraction of results judged relevant; 0.0 for an empty batch.
pub fn precision(feedback: &[u8]) -> f64 {
    if feedback.is_empty() {
        return 0.0;
    }
    feedback.iter().map(|&f| f as f64).sum::<f64>() / feedback.len() as f64
}

/// Final state of a retrieval session.
#[derive(Debug)]
pub struct SessionOutcome {
    pub query: String,
    pub precision: f64,
    pub iterations: usize,
}

/// The interactive retrieval loop: issue query, collect judgments,
/// reformulate, repeat. Stops once precision reaches the target, or as a
/// lost cause when it drops to exactly zero (no relevant result to learn
/// from).
pub struct Session<'a> {
    client: &'a dyn SearchClient,
    collector: &'a mut dyn FeedbackCollector,
    engine: &'a QueryAugmenter,
    target_precision: f64,
}

impl<'a> Session<'a> {
    pub fn new(
        client: &'a dyn SearchClient,
        collector: &'a mut dyn FeedbackCollector,
        engine: &'a QueryAugmenter,
        target_precision: f64,
    ) -> Self {
        Self {
            client,
            collector,
            engine,
            target_precision,
        }
    }

    pub fn run(&mut self, initial_query: &str) -> Result<SessionOutcome> {
        let mut query = initial_query.to_string();
        let mut results = self.client.search(&query)?;
        let mut feedback = self.collector.collect(&results)?;
        let mut current = precision(&feedback);
        let mut iterations = 0;

        while current < self.target_precision && current != 0.0 {
            let augmentation = self.engine.augment(&query, &results, &feedback)?;
            tracing::info!(
                precision = current,
                appended = %augmentation.appended,
                "reformulating query"
            );

            query = augmentation.query;
            results = self.client.search(&query)?;
            feedback = self.collector.collect(&results)?;
            current = precision(&feedback);
            iterations += 1;
        }

        Ok(SessionOutcome {
            query,
            precision: current,
            iterations,
        })
    }
}
