use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    HighRisk,
    ModerateRisk,
    LowRisk,
    MinimalRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Ok,
}

// most severe first
pub fn tier_order() -> &'static [RiskTier] {
    &[
        RiskTier::HighRisk,
        RiskTier::ModerateRisk,
        RiskTier::LowRisk,
        RiskTier::MinimalRisk,
    ]
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::HighRisk => "HIGH_RISK",
            RiskTier::ModerateRisk => "MODERATE_RISK",
            RiskTier::LowRisk => "LOW_RISK",
            RiskTier::MinimalRisk => "MINIMAL_RISK",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            RiskTier::HighRisk => "seek specialist consultation immediately",
            RiskTier::ModerateRisk => "recommend further examination within 1–2 weeks",
            RiskTier::LowRisk => "monitor health condition routinely",
            RiskTier::MinimalRisk => "maintain healthy lifestyle",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RiskTier::HighRisk => Severity::Critical,
            RiskTier::ModerateRisk => Severity::Warning,
            RiskTier::LowRisk | RiskTier::MinimalRisk => Severity::Ok,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            RiskTier::HighRisk => "high",
            RiskTier::ModerateRisk => "moderate",
            RiskTier::LowRisk => "low",
            RiskTier::MinimalRisk => "minimal",
        }
    }
}

impl Severity {
    pub fn name(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Ok => "ok",
        }
    }
}
