use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time spent in one step of the demo.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Run `f`, recording its duration under `label`.
    pub fn time<T>(&mut self, label: &str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        let ms = elapsed_ms(start);
        log::debug!("{label}: {ms:.3} ms");
        self.push(label, ms);
        out
    }
}

pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_records_stage_and_passes_value_through() {
        let mut timings = TimingBreakdown::default();
        let v = timings.time("load", || 41 + 1);
        assert_eq!(v, 42);
        assert_eq!(timings.stages.len(), 1);
        assert_eq!(timings.stages[0].label, "load");
        assert!(timings.stages[0].elapsed_ms >= 0.0);
    }
}
