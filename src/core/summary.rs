//! Presentation layer over [`ProjectionReport`]: display labels, currency
//! formatting, the on-screen summary, chart line descriptors and the
//! downloadable summary document.

use chrono::NaiveDate;
use serde::Serialize;

use super::types::{ProjectionReport, ProjectionSeries};

pub const CURRENCY_SYMBOL: &str = "₱";
const CHART_TITLE: &str = "Retirement Fund Growth";
pub const SUMMARY_FILE_NAME: &str = "fna_summary.txt";

/// Renders `value` as `₱1,234,567.89`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("{CURRENCY_SYMBOL}{value}");
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{cents}")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Money(f64),
    MoneyList(&'a [f64]),
    Years(u32),
}

impl FieldValue<'_> {
    pub fn render(self) -> String {
        match self {
            FieldValue::Money(v) => format_currency(v),
            FieldValue::MoneyList(values) => values
                .iter()
                .map(|&v| format_currency(v))
                .collect::<Vec<_>>()
                .join(", "),
            FieldValue::Years(1) => "1 year".to_string(),
            FieldValue::Years(years) => format!("{years} years"),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReportField {
    Needs,
    Wants,
    SavingsGoal,
    EmergencyFundNeeded,
    RecommendedLifeCoverage,
    InsuranceGap,
    TotalDesiredHealth,
    HealthCoverageGap,
    YearsUntilCollege,
    TotalEducationFund,
    TuitionProjection,
    EducationMonthlyLevel,
    EducationMonthlyWithGrowth,
    YearsToRetirement,
    InflatedAnnualExpenses,
    RetirementFundTarget,
    Fund4,
    Fund8,
    Fund10,
}

impl ReportField {
    /// Document order.
    pub const ALL: [ReportField; 19] = [
        ReportField::Needs,
        ReportField::Wants,
        ReportField::SavingsGoal,
        ReportField::EmergencyFundNeeded,
        ReportField::RecommendedLifeCoverage,
        ReportField::InsuranceGap,
        ReportField::TotalDesiredHealth,
        ReportField::HealthCoverageGap,
        ReportField::YearsUntilCollege,
        ReportField::TotalEducationFund,
        ReportField::TuitionProjection,
        ReportField::EducationMonthlyLevel,
        ReportField::EducationMonthlyWithGrowth,
        ReportField::YearsToRetirement,
        ReportField::InflatedAnnualExpenses,
        ReportField::RetirementFundTarget,
        ReportField::Fund4,
        ReportField::Fund8,
        ReportField::Fund10,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ReportField::Needs => "needs",
            ReportField::Wants => "wants",
            ReportField::SavingsGoal => "savings_goal",
            ReportField::EmergencyFundNeeded => "emergency_fund_needed",
            ReportField::RecommendedLifeCoverage => "recommended_life_coverage",
            ReportField::InsuranceGap => "insurance_gap",
            ReportField::TotalDesiredHealth => "total_desired_health",
            ReportField::HealthCoverageGap => "health_coverage_gap",
            ReportField::YearsUntilCollege => "years_until_college",
            ReportField::TotalEducationFund => "total_education_fund",
            ReportField::TuitionProjection => "tuition_projection",
            ReportField::EducationMonthlyLevel => "education_monthly_level",
            ReportField::EducationMonthlyWithGrowth => "education_monthly_with_growth",
            ReportField::YearsToRetirement => "years_to_retirement",
            ReportField::InflatedAnnualExpenses => "inflated_annual_expenses",
            ReportField::RetirementFundTarget => "retirement_fund_target",
            ReportField::Fund4 => "fund_4",
            ReportField::Fund8 => "fund_8",
            ReportField::Fund10 => "fund_10",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportField::Needs => "Needs",
            ReportField::Wants => "Wants",
            ReportField::SavingsGoal => "Savings Goal",
            ReportField::EmergencyFundNeeded => "Emergency Fund Needed",
            ReportField::RecommendedLifeCoverage => "Recommended Life Coverage",
            ReportField::InsuranceGap => "Insurance Gap",
            ReportField::TotalDesiredHealth => "Total Desired Health",
            ReportField::HealthCoverageGap => "Health Coverage Gap",
            ReportField::YearsUntilCollege => "Years Until College",
            ReportField::TotalEducationFund => "Total Education Fund",
            ReportField::TuitionProjection => "Tuition Projection",
            ReportField::EducationMonthlyLevel => "Education Monthly Level",
            ReportField::EducationMonthlyWithGrowth => "Education Monthly With Growth",
            ReportField::YearsToRetirement => "Years To Retirement",
            ReportField::InflatedAnnualExpenses => "Inflated Annual Expenses",
            ReportField::RetirementFundTarget => "Retirement Fund Target",
            ReportField::Fund4 => "Retirement Fund At 4%",
            ReportField::Fund8 => "Retirement Fund At 8%",
            ReportField::Fund10 => "Retirement Fund At 10%",
        }
    }

    pub fn value(self, report: &ProjectionReport) -> FieldValue<'_> {
        match self {
            ReportField::Needs => FieldValue::Money(report.needs),
            ReportField::Wants => FieldValue::Money(report.wants),
            ReportField::SavingsGoal => FieldValue::Money(report.savings_goal),
            ReportField::EmergencyFundNeeded => FieldValue::Money(report.emergency_fund_needed),
            ReportField::RecommendedLifeCoverage => {
                FieldValue::Money(report.recommended_life_coverage)
            }
            ReportField::InsuranceGap => FieldValue::Money(report.insurance_gap),
            ReportField::TotalDesiredHealth => FieldValue::Money(report.total_desired_health),
            ReportField::HealthCoverageGap => FieldValue::Money(report.health_coverage_gap),
            ReportField::YearsUntilCollege => FieldValue::Years(report.years_until_college),
            ReportField::TotalEducationFund => FieldValue::Money(report.total_education_fund),
            ReportField::TuitionProjection => FieldValue::MoneyList(&report.tuition_projection),
            ReportField::EducationMonthlyLevel => {
                FieldValue::Money(report.education_monthly_level)
            }
            ReportField::EducationMonthlyWithGrowth => {
                FieldValue::Money(report.education_monthly_with_growth)
            }
            ReportField::YearsToRetirement => FieldValue::Years(report.years_to_retirement),
            ReportField::InflatedAnnualExpenses => {
                FieldValue::Money(report.inflated_annual_expenses)
            }
            ReportField::RetirementFundTarget => FieldValue::Money(report.retirement_fund_target),
            ReportField::Fund4 => FieldValue::Money(report.fund_4),
            ReportField::Fund8 => FieldValue::Money(report.fund_8),
            ReportField::Fund10 => FieldValue::Money(report.fund_10),
        }
    }

    pub fn line(self, report: &ProjectionReport) -> String {
        format!("{}: {}", self.label(), self.value(report).render())
    }
}

/// One rendered report field, addressable by its snake-case key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryField {
    pub key: &'static str,
    pub label: &'static str,
    pub display: String,
}

pub fn summary_fields(report: &ProjectionReport) -> Vec<SummaryField> {
    ReportField::ALL
        .iter()
        .map(|&field| SummaryField {
            key: field.key(),
            label: field.label(),
            display: field.value(report).render(),
        })
        .collect()
}

pub fn summary_lines(report: &ProjectionReport) -> Vec<String> {
    let c = format_currency;
    vec![
        format!(
            "• Needs: {} | Wants: {} | Savings: {}",
            c(report.needs),
            c(report.wants),
            c(report.savings_goal)
        ),
        format!(
            "• Life Insurance Gap: {} | Health Gap: {}",
            c(report.insurance_gap),
            c(report.health_coverage_gap)
        ),
        format!(
            "• Total Education Fund: {} | Monthly Save: {}",
            c(report.total_education_fund),
            c(report.education_monthly_with_growth)
        ),
        format!("• Retirement Goal: {}", c(report.retirement_fund_target)),
        format!(
            "• Retirement Fund at 4%: {} | 8%: {} | 10%: {}",
            c(report.fund_4),
            c(report.fund_8),
            c(report.fund_10)
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartLine {
    pub name: String,
    pub values: Vec<f64>,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub years: Vec<u32>,
    pub lines: Vec<ChartLine>,
}

/// One solid line per growth curve followed by the dashed target line.
pub fn chart_spec(series: &ProjectionSeries) -> ChartSpec {
    let mut lines: Vec<ChartLine> = series
        .curves
        .iter()
        .map(|curve| ChartLine {
            name: format!("{}% Return", (curve.annual_rate * 100.0).round()),
            values: curve.values.clone(),
            dashed: false,
        })
        .collect();
    lines.push(ChartLine {
        name: "Target Fund".to_string(),
        values: series.target_line.clone(),
        dashed: true,
    });

    ChartSpec {
        title: CHART_TITLE,
        x_axis_title: "Years",
        y_axis_title: CURRENCY_SYMBOL,
        years: series.years.clone(),
        lines,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryDocument {
    title: String,
    generated_on: NaiveDate,
    lines: Vec<String>,
}

impl SummaryDocument {
    pub fn new(display_name: &str, generated_on: NaiveDate, report: &ProjectionReport) -> Self {
        let name = display_name.trim();
        let title = if name.is_empty() {
            "FNA Summary".to_string()
        } else {
            format!("FNA Summary for {name}")
        };
        let lines = ReportField::ALL
            .iter()
            .map(|field| field.line(report))
            .collect();
        Self {
            title,
            generated_on,
            lines,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn file_name(&self) -> &'static str {
        SUMMARY_FILE_NAME
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{}\nGenerated on: {}\n\n",
            self.title,
            self.generated_on.format("%Y-%m-%d")
        );
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
