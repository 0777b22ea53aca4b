use serde::Serialize;

pub const MAX_FILE_STRUCTURE: u32 = 20;
pub const MAX_DEPENDENCIES: u32 = 15;
pub const MAX_GIT_HEALTH: u32 = 15;
pub const MAX_CI_CD: u32 = 15;
pub const MAX_SECURITY: u32 = 15;
pub const MAX_DOCUMENTATION: u32 = 10;
pub const TEST_BONUS: u32 = 5;

/// Qualitative health tier derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthTier {
    Excellent,
    Good,
    Regular,
    Critical,
}

impl HealthTier {
    pub fn from_score(score: u32) -> Self {
        match score {
            85..=u32::MAX => HealthTier::Excellent,
            70..=84 => HealthTier::Good,
            50..=69 => HealthTier::Regular,
            _ => HealthTier::Critical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthTier::Excellent => "Excellent",
            HealthTier::Good => "Good",
            HealthTier::Regular => "Regular",
            HealthTier::Critical => "Critical",
        }
    }
}

/// Per-category sub-scores, each already clamped to its category maximum.
/// The total is the clamped sum and is what the exit code is derived from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBreakdown {
    pub file_structure: u32,
    pub dependencies: u32,
    pub git_health: u32,
    pub ci_cd: u32,
    pub security: u32,
    pub documentation: u32,
    pub test_bonus: u32,
    pub total: u32,
}

impl ScoreBreakdown {
    pub fn tier(&self) -> HealthTier {
        HealthTier::from_score(self.total)
    }
}
