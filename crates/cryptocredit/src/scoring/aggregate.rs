use serde::{Deserialize, Serialize};

use super::analyzers::FeatureReports;
use super::normalize::normalize;
use super::weights::{Calibration, MetricId, MetricSense, ScoreWeights, WeightsError};

/// Bounded contribution of one metric, kept for explainability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub metric: MetricId,
    pub sense: MetricSense,
    pub value: Option<f64>,
    pub score: f64,
    pub max_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateScore {
    pub credit_score: u32,
    pub raw_total: f64,
    pub max_raw_score: f64,
    pub components: Vec<SubScore>,
}

/// Combines feature reports into one score in `[0, target_range]`.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
    max_raw_score: f64,
}

impl ScoreAggregator {
    pub fn new(weights: ScoreWeights) -> Result<Self, WeightsError> {
        weights.validate()?;
        let max_raw_score = weights.max_raw_score();
        Ok(Self {
            weights,
            max_raw_score,
        })
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn aggregate(&self, reports: &FeatureReports) -> AggregateScore {
        let components: Vec<SubScore> = self
            .weights
            .metrics
            .iter()
            .map(|(metric, calibration)| sub_score(*metric, calibration, metric.value(reports)))
            .collect();

        let raw_total: f64 = components.iter().map(|component| component.score).sum();
        let target = self.weights.target_range;
        let scaled = raw_total / self.max_raw_score * target;
        let credit_score = scaled.round().clamp(0.0, target) as u32;

        AggregateScore {
            credit_score,
            raw_total,
            max_raw_score: self.max_raw_score,
            components,
        }
    }
}

fn sub_score(metric: MetricId, calibration: &Calibration, value: Option<f64>) -> SubScore {
    let Calibration {
        min_val,
        avg_val,
        max_val,
        max_score,
    } = *calibration;
    let sense = metric.sense();

    let score = match (sense, value) {
        (MetricSense::Reward, _) => normalize(value, min_val, avg_val, max_val, max_score),
        (MetricSense::Penalty, None) => 0.0,
        (MetricSense::Penalty, Some(_)) => {
            (max_score - normalize(value, min_val, avg_val, max_val, max_score)).max(0.0)
        }
    };

    SubScore {
        metric,
        sense,
        value,
        score,
        max_score,
    }
}
