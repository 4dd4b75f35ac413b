//! Economic analysis result types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Return-on-investment analysis for a cropping season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAnalysis {
    /// Expected revenue per hectare
    pub expected_revenue: Decimal,
    /// Net profit per hectare (revenue minus input costs)
    pub net_profit: Decimal,
    /// Return on investment as a percentage of input costs
    pub roi_percentage: Decimal,
    /// Yield (tons/ha) at which revenue covers input costs
    pub break_even_yield: Decimal,
}

/// Fertilizer usage recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerPlan {
    /// Recommended application in kg/ha, capped by budget
    pub recommended_fertilizer: Decimal,
    /// Expected yield improvement in percent (capped at 50)
    pub yield_improvement_percent: Decimal,
    /// Extra spend versus current usage
    pub additional_cost: Decimal,
    /// Whether the extra spend fits within the stated budget
    pub cost_effective: bool,
}

/// Water-use efficiency report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEfficiencyReport {
    /// Tons of yield per cubic meter of water
    pub water_efficiency: Decimal,
    /// Benchmark efficiency for the crop
    pub benchmark: Decimal,
    /// Efficiency relative to the benchmark
    pub efficiency_ratio: Decimal,
    /// Efficiency ratio as a percentage, capped at 200
    pub efficiency_percentage: Decimal,
}
