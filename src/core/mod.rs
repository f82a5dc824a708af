mod engine;
mod error;
mod summary;
mod types;

pub use engine::{
    future_value_monthly, project_education_fund, required_monthly_saving, run_projection,
};
pub use error::EngineError;
pub use summary::{
    CURRENCY_SYMBOL, ChartLine, ChartSpec, FieldValue, ReportField, SUMMARY_FILE_NAME,
    SummaryDocument, SummaryField, chart_spec, format_currency, summary_fields, summary_lines,
};
pub use types::{
    EDUCATION_GROWTH_RATE, EducationFund, GrowthCurve, ProfileInputs, ProjectionOutput,
    ProjectionReport, ProjectionSeries, RETIREMENT_GROWTH_RATES,
};
