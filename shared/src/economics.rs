//! Economic analysis for crop production
//!
//! ROI, fertilizer optimization, and water-use efficiency calculations.
//! All monetary math uses `Decimal` to avoid float drift in reports.

use rust_decimal::Decimal;

use crate::models::{FertilizerPlan, RoiAnalysis, WaterEfficiencyReport};

/// Maximum yield improvement a fertilizer adjustment is credited with, in percent
fn max_yield_improvement() -> Decimal {
    Decimal::from(50)
}

/// Cap on the reported water-efficiency percentage
fn max_efficiency_percent() -> Decimal {
    Decimal::from(200)
}

/// Calculate return on investment for crop production
///
/// `expected_yield` is in tons/ha, `input_costs` in currency per hectare,
/// `market_price` in currency per ton. Zero costs yield a 0% ROI and a zero
/// market price yields a break-even of zero rather than dividing by zero.
pub fn calculate_roi(
    expected_yield: Decimal,
    input_costs: Decimal,
    market_price: Decimal,
) -> RoiAnalysis {
    let expected_revenue = expected_yield * market_price;
    let net_profit = expected_revenue - input_costs;

    let roi_percentage = if input_costs > Decimal::ZERO {
        (net_profit / input_costs) * Decimal::from(100)
    } else {
        Decimal::ZERO
    };

    let break_even_yield = if market_price > Decimal::ZERO {
        input_costs / market_price
    } else {
        Decimal::ZERO
    };

    RoiAnalysis {
        expected_revenue,
        net_profit,
        roi_percentage,
        break_even_yield,
    }
}

/// Crop-specific optimal fertilizer application in kg/ha
fn optimal_fertilizer(crop_type: &str) -> Decimal {
    let optimal = if crop_type.eq_ignore_ascii_case("wheat") {
        120
    } else if crop_type.eq_ignore_ascii_case("rice") {
        100
    } else if crop_type.eq_ignore_ascii_case("corn") {
        140
    } else if crop_type.eq_ignore_ascii_case("soybean") {
        80
    } else {
        100
    };
    Decimal::from(optimal)
}

/// Recommend a fertilizer application for maximum return
///
/// The recommendation is the crop's optimal rate capped by what the budget
/// can buy. The credited yield improvement scales with how far current usage
/// sits below the recommendation and is capped at 50%.
pub fn optimize_fertilizer(
    current_fertilizer: Decimal,
    fertilizer_price: Decimal,
    crop_type: &str,
    max_budget: Decimal,
) -> FertilizerPlan {
    let optimal = optimal_fertilizer(crop_type);

    let recommended_fertilizer = if fertilizer_price > Decimal::ZERO {
        optimal.min(max_budget / fertilizer_price)
    } else {
        optimal
    }
    .round_dp(1);

    let yield_improvement_percent = if current_fertilizer < recommended_fertilizer {
        if current_fertilizer > Decimal::ZERO {
            let improvement_ratio =
                (recommended_fertilizer - current_fertilizer) / current_fertilizer;
            (improvement_ratio * Decimal::from(25)).min(max_yield_improvement())
        } else {
            // Nothing applied today: credit the full capped improvement
            max_yield_improvement()
        }
    } else {
        Decimal::ZERO
    };

    let additional_cost = (recommended_fertilizer - current_fertilizer) * fertilizer_price;

    FertilizerPlan {
        recommended_fertilizer,
        yield_improvement_percent,
        additional_cost,
        cost_effective: additional_cost <= max_budget,
    }
}

/// Benchmark water efficiency in tons per cubic meter
fn water_benchmark(crop_type: &str) -> Decimal {
    if crop_type.eq_ignore_ascii_case("wheat") {
        Decimal::new(15, 4) // 0.0015
    } else if crop_type.eq_ignore_ascii_case("rice") {
        Decimal::new(12, 4)
    } else if crop_type.eq_ignore_ascii_case("corn") {
        Decimal::new(18, 4)
    } else if crop_type.eq_ignore_ascii_case("soybean") {
        Decimal::new(10, 4)
    } else {
        Decimal::new(13, 4)
    }
}

/// Calculate water-use efficiency against the crop benchmark
pub fn water_efficiency(
    water_used: Decimal,
    yield_obtained: Decimal,
    crop_type: &str,
) -> WaterEfficiencyReport {
    let efficiency = if water_used > Decimal::ZERO {
        yield_obtained / water_used
    } else {
        Decimal::ZERO
    };

    let benchmark = water_benchmark(crop_type);
    let efficiency_ratio = if benchmark > Decimal::ZERO {
        efficiency / benchmark
    } else {
        Decimal::ZERO
    };

    WaterEfficiencyReport {
        water_efficiency: efficiency,
        benchmark,
        efficiency_ratio,
        efficiency_percentage: (efficiency_ratio * Decimal::from(100)).min(max_efficiency_percent()),
    }
}
