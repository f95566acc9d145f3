use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Total,
    OTT,
    APP,
    ARG,
    T2G,
    P,
    BS,
    DrivingDist,
    DrivingAcc,
    Gir,
    Prox100_125,
    Prox125_150,
    Prox150_175,
    Prox175_200,
    Prox200_225,
    Prox225Plus,
    BogeyAvoid,
    TotalBirdies,
    Par3BirdieOrBetter,
    Par4BirdieOrBetter,
    Par5BirdieOrBetter,
    BirdieConversion,
    Par3Scoring,
    Par4Scoring,
    Par5Scoring,
    EaglesPerHole,
    BirdieAvg,
    BirdieOrBetterPct,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricCategory {
    General,
    Driving,
    Proximity,
    Scoring,
}

impl Metric {
    pub const ALL: [Metric; 28] = [
        Metric::Total,
        Metric::OTT,
        Metric::APP,
        Metric::ARG,
        Metric::T2G,
        Metric::P,
        Metric::BS,
        Metric::DrivingDist,
        Metric::DrivingAcc,
        Metric::Gir,
        Metric::Prox100_125,
        Metric::Prox125_150,
        Metric::Prox150_175,
        Metric::Prox175_200,
        Metric::Prox200_225,
        Metric::Prox225Plus,
        Metric::BogeyAvoid,
        Metric::TotalBirdies,
        Metric::Par3BirdieOrBetter,
        Metric::Par4BirdieOrBetter,
        Metric::Par5BirdieOrBetter,
        Metric::BirdieConversion,
        Metric::Par3Scoring,
        Metric::Par4Scoring,
        Metric::Par5Scoring,
        Metric::EaglesPerHole,
        Metric::BirdieAvg,
        Metric::BirdieOrBetterPct,
    ];

    #[must_use]
    pub fn category(self) -> MetricCategory {
        match self {
            Metric::Total
            | Metric::OTT
            | Metric::APP
            | Metric::ARG
            | Metric::T2G
            | Metric::P
            | Metric::BS => MetricCategory::General,
            Metric::DrivingDist | Metric::DrivingAcc | Metric::Gir => MetricCategory::Driving,
            Metric::Prox100_125
            | Metric::Prox125_150
            | Metric::Prox150_175
            | Metric::Prox175_200
            | Metric::Prox200_225
            | Metric::Prox225Plus => MetricCategory::Proximity,
            _ => MetricCategory::Scoring,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Metric::Total => "Total",
            Metric::OTT => "Off the Tee",
            Metric::APP => "Approach",
            Metric::ARG => "Around Green",
            Metric::T2G => "Tee to Green",
            Metric::P => "Putting",
            Metric::BS => "Ball Striking",
            Metric::DrivingDist => "Driving Distance",
            Metric::DrivingAcc => "Driving Accuracy",
            Metric::Gir => "Greens in Regulation",
            Metric::Prox100_125 => "Proximity 100-125",
            Metric::Prox125_150 => "Proximity 125-150",
            Metric::Prox150_175 => "Proximity 150-175",
            Metric::Prox175_200 => "Proximity 175-200",
            Metric::Prox200_225 => "Proximity 200-225",
            Metric::Prox225Plus => "Proximity 225+",
            Metric::BogeyAvoid => "Bogey Avoidance",
            Metric::TotalBirdies => "Total Birdies",
            Metric::Par3BirdieOrBetter => "Par 3 Birdie or Better",
            Metric::Par4BirdieOrBetter => "Par 4 Birdie or Better",
            Metric::Par5BirdieOrBetter => "Par 5 Birdie or Better",
            Metric::BirdieConversion => "Birdie or Better Conversion",
            Metric::Par3Scoring => "Par 3 Scoring Average",
            Metric::Par4Scoring => "Par 4 Scoring Average",
            Metric::Par5Scoring => "Par 5 Scoring Average",
            Metric::EaglesPerHole => "Eagles per Hole",
            Metric::BirdieAvg => "Birdie Average",
            Metric::BirdieOrBetterPct => "Birdie or Better %",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // serde's identifier is the stable name
        write!(f, "{self:?}")
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct MetricWeight {
    pub metric: Metric,
    /// Percentage points; a full model nominally sums to 100.
    pub weight: f64,
}

/// An active scoring model. Each metric appears at most once.
///
/// Weights are not normalized: a set summing to 80 or 130 is scored as given.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "Vec<MetricWeight>", into = "Vec<MetricWeight>")]
pub struct WeightSet {
    weights: Vec<MetricWeight>,
}

impl WeightSet {
    /// # Errors
    ///
    /// Will return `Err` if a metric is listed twice or a weight is negative or not finite
    pub fn new(weights: Vec<MetricWeight>) -> Result<Self, CoreError> {
        for (idx, w) in weights.iter().enumerate() {
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(CoreError::InvalidWeight {
                    metric: w.metric,
                    weight: w.weight,
                });
            }
            if weights[..idx].iter().any(|prev| prev.metric == w.metric) {
                return Err(CoreError::DuplicateMetric(w.metric));
            }
        }
        let set = Self { weights };
        if !set.is_full_weight() {
            tracing::warn!(total = set.total(), "metric weights do not sum to 100");
        }
        Ok(set)
    }

    #[must_use]
    pub fn weights(&self) -> &[MetricWeight] {
        &self.weights
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().map(|w| w.weight).sum()
    }

    #[must_use]
    pub fn is_full_weight(&self) -> bool {
        (self.total() - 100.0).abs() < 1e-9
    }

    #[must_use]
    pub fn weight_of(&self, metric: Metric) -> Option<f64> {
        self.weights
            .iter()
            .find(|w| w.metric == metric)
            .map(|w| w.weight)
    }

    /// Metrics from the catalogue not yet in this set.
    #[must_use]
    pub fn unused_metrics(&self) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.weight_of(*m).is_none())
            .collect()
    }

    /// Stable textual key, used for cache fingerprints.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.weights
            .iter()
            .map(|w| format!("{}={}", w.metric, w.weight))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        let weights = vec![
            MetricWeight {
                metric: Metric::OTT,
                weight: 15.0,
            },
            MetricWeight {
                metric: Metric::P,
                weight: 15.0,
            },
            MetricWeight {
                metric: Metric::T2G,
                weight: 10.0,
            },
            MetricWeight {
                metric: Metric::DrivingDist,
                weight: 5.0,
            },
            MetricWeight {
                metric: Metric::Prox100_125,
                weight: 5.0,
            },
            MetricWeight {
                metric: Metric::Prox125_150,
                weight: 5.0,
            },
            MetricWeight {
                metric: Metric::BogeyAvoid,
                weight: 10.0,
            },
            MetricWeight {
                metric: Metric::BirdieConversion,
                weight: 10.0,
            },
            MetricWeight {
                metric: Metric::Par3Scoring,
                weight: 5.0,
            },
        ];
        Self { weights }
    }
}

impl TryFrom<Vec<MetricWeight>> for WeightSet {
    type Error = CoreError;

    fn try_from(weights: Vec<MetricWeight>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<WeightSet> for Vec<MetricWeight> {
    fn from(set: WeightSet) -> Self {
        set.weights
    }
}
