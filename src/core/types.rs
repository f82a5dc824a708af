use serde::Serialize;

/// Annual growth rates the retirement fund is projected under.
pub const RETIREMENT_GROWTH_RATES: [f64; 3] = [0.04, 0.08, 0.10];

/// Annual return assumed when solving for the growth-adjusted education saving.
pub const EDUCATION_GROWTH_RATE: f64 = 0.06;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInputs {
    pub age: u32,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_savings: f64,
    pub life_insurance_coverage: f64,
    pub current_health_coverage: f64,
    pub desired_health_coverage_per_person: f64,
    pub num_dependents: u32,
    pub child_age: u32,
    pub college_start_age: u32,
    pub current_annual_tuition: f64,
    pub tuition_inflation_rate: f64,
    pub college_years: u32,
    pub retirement_age: u32,
    pub years_in_retirement: u32,
    pub inflation_rate: f64,
    pub monthly_retirement_saving: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationFund {
    pub years_until_college: u32,
    pub tuition_projection: Vec<f64>,
    pub total_fund_needed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    pub existing_savings: f64,
    pub needs: f64,
    pub wants: f64,
    pub savings_goal: f64,
    pub emergency_fund_needed: f64,
    pub recommended_life_coverage: f64,
    pub insurance_gap: f64,
    pub total_desired_health: f64,
    pub health_coverage_gap: f64,
    pub years_until_college: u32,
    pub total_education_fund: f64,
    pub tuition_projection: Vec<f64>,
    pub education_monthly_level: f64,
    pub education_monthly_with_growth: f64,
    pub years_to_retirement: u32,
    pub inflated_annual_expenses: f64,
    pub retirement_fund_target: f64,
    pub fund_4: f64,
    pub fund_8: f64,
    pub fund_10: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthCurve {
    pub annual_rate: f64,
    pub values: Vec<f64>,
}

/// Year-indexed retirement fund curves for charting. `years` runs from 1 to
/// `years_to_retirement` and every curve, like `target_line`, has its length.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSeries {
    pub years: Vec<u32>,
    pub curves: Vec<GrowthCurve>,
    pub target_line: Vec<f64>,
}

impl ProjectionSeries {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionOutput {
    pub report: ProjectionReport,
    pub series: ProjectionSeries,
}
