use serde::{Deserialize, Serialize};

/// Categorical mastery label derived from attempt history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum MasteryLevel {
    #[default]
    Learning,
    Reviewing,
    Mastered,
}

impl MasteryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learning => "learning",
            Self::Reviewing => "reviewing",
            Self::Mastered => "mastered",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mastered" => Self::Mastered,
            "reviewing" => Self::Reviewing,
            _ => Self::Learning,
        }
    }
}

/// Next action recommended by the performance predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    IntensiveStudy,
    Practice,
    Review,
}

impl RecommendedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntensiveStudy => "intensive_study",
            Self::Practice => "practice",
            Self::Review => "review",
        }
    }
}
