use super::error::EngineError;
use super::types::{
    EDUCATION_GROWTH_RATE, EducationFund, GrowthCurve, ProfileInputs, ProjectionOutput,
    ProjectionReport, ProjectionSeries, RETIREMENT_GROWTH_RATES,
};

const NEEDS_SHARE: f64 = 0.50;
const WANTS_SHARE: f64 = 0.30;
const SAVINGS_SHARE: f64 = 0.20;
const EMERGENCY_FUND_MONTHS: f64 = 6.0;
const LIFE_COVERAGE_YEARS: f64 = 10.0;

/// Future value of `months` equal end-of-month contributions of `pmt`,
/// compounding monthly at `annual_rate / 12`.
pub fn future_value_monthly(pmt: f64, annual_rate: f64, months: u32) -> f64 {
    let r = annual_rate / 12.0;
    if r == 0.0 {
        return pmt * months as f64;
    }
    pmt * (((1.0 + r).powf(months as f64) - 1.0) / r)
}

/// Level monthly contribution whose [`future_value_monthly`] equals `target`.
///
/// A zero-month horizon has no finite answer and is reported as
/// [`EngineError::ZeroHorizon`] in both the zero-rate and compounding branch.
pub fn required_monthly_saving(target: f64, rate: f64, months: u32) -> Result<f64, EngineError> {
    if months == 0 {
        return Err(EngineError::ZeroHorizon { target });
    }
    let r = rate / 12.0;
    if r == 0.0 {
        return Ok(target / months as f64);
    }
    Ok(target * r / ((1.0 + r).powf(months as f64) - 1.0))
}

pub fn project_education_fund(
    child_age: u32,
    college_start_age: u32,
    current_annual_tuition: f64,
    tuition_inflation: f64,
    college_years: u32,
) -> EducationFund {
    let years_until_college = college_start_age.saturating_sub(child_age);
    let tuition_projection: Vec<f64> = (0..college_years)
        .map(|year| {
            let year_of_college = years_until_college.saturating_add(year);
            current_annual_tuition * (1.0 + tuition_inflation).powf(year_of_college as f64)
        })
        .collect();
    let total_fund_needed = tuition_projection.iter().sum();

    EducationFund {
        years_until_college,
        tuition_projection,
        total_fund_needed,
    }
}

pub fn run_projection(inputs: &ProfileInputs) -> Result<ProjectionOutput, EngineError> {
    let income = inputs.monthly_income;
    let expenses = inputs.monthly_expenses;

    let recommended_life_coverage = income * 12.0 * LIFE_COVERAGE_YEARS;
    let insurance_gap = (recommended_life_coverage - inputs.life_insurance_coverage).max(0.0);

    let total_desired_health =
        inputs.desired_health_coverage_per_person * inputs.num_dependents as f64;
    let health_coverage_gap = (total_desired_health - inputs.current_health_coverage).max(0.0);

    let education = project_education_fund(
        inputs.child_age,
        inputs.college_start_age,
        inputs.current_annual_tuition,
        inputs.tuition_inflation_rate,
        inputs.college_years,
    );
    let months_to_college = education.years_until_college.saturating_mul(12);
    let (education_monthly_level, education_monthly_with_growth) = if months_to_college > 0 {
        (
            education.total_fund_needed / months_to_college as f64,
            required_monthly_saving(
                education.total_fund_needed,
                EDUCATION_GROWTH_RATE,
                months_to_college,
            )?,
        )
    } else {
        (0.0, 0.0)
    };

    let years_to_retirement = inputs.retirement_age.saturating_sub(inputs.age);
    let months_to_retirement = years_to_retirement.saturating_mul(12);
    let inflated_annual_expenses =
        expenses * 12.0 * (1.0 + inputs.inflation_rate).powf(years_to_retirement as f64);
    let retirement_fund_target = inflated_annual_expenses * inputs.years_in_retirement as f64;
    let [fund_4, fund_8, fund_10] = RETIREMENT_GROWTH_RATES.map(|rate| {
        future_value_monthly(inputs.monthly_retirement_saving, rate, months_to_retirement)
    });

    let series = build_series(
        inputs.monthly_retirement_saving,
        years_to_retirement,
        retirement_fund_target,
    );

    log::debug!(
        "projection: insurance_gap={insurance_gap:.2} education_total={:.2} \
         retirement_target={retirement_fund_target:.2} years_to_retirement={years_to_retirement}",
        education.total_fund_needed
    );

    let report = ProjectionReport {
        existing_savings: inputs.existing_savings,
        needs: income * NEEDS_SHARE,
        wants: income * WANTS_SHARE,
        savings_goal: income * SAVINGS_SHARE,
        emergency_fund_needed: expenses * EMERGENCY_FUND_MONTHS,
        recommended_life_coverage,
        insurance_gap,
        total_desired_health,
        health_coverage_gap,
        years_until_college: education.years_until_college,
        total_education_fund: education.total_fund_needed,
        tuition_projection: education.tuition_projection,
        education_monthly_level,
        education_monthly_with_growth,
        years_to_retirement,
        inflated_annual_expenses,
        retirement_fund_target,
        fund_4,
        fund_8,
        fund_10,
    };

    Ok(ProjectionOutput { report, series })
}

fn build_series(monthly_saving: f64, years_to_retirement: u32, target: f64) -> ProjectionSeries {
    let years: Vec<u32> = (1..=years_to_retirement).collect();
    let curves = RETIREMENT_GROWTH_RATES
        .iter()
        .map(|&annual_rate| GrowthCurve {
            annual_rate,
            values: years
                .iter()
                .map(|&year| {
                    future_value_monthly(monthly_saving, annual_rate, year.saturating_mul(12))
                })
                .collect(),
        })
        .collect();
    let target_line = vec![target; years.len()];

    ProjectionSeries {
        years,
        curves,
        target_line,
    }
}
