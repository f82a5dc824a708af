use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Local;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::core::{
    ChartSpec, ProfileInputs, ProjectionOutput, ProjectionReport, ProjectionSeries,
    SummaryDocument, SummaryField, chart_spec, run_projection, summary_fields, summary_lines,
};

/// Upper bound of the inflation sliders, in percent.
const MAX_RATE_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("{field} must be a finite amount >= 0, got {value}")]
    InvalidMoney { field: &'static str, value: f64 },
    #[error("{field} must be between 0 and 10 percent, got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("Invalid request payload: {0}")]
    Malformed(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ReportPayload {
    name: Option<String>,
    age: Option<u32>,
    monthly_income: Option<f64>,
    monthly_expenses: Option<f64>,
    existing_savings: Option<f64>,
    life_insurance_coverage: Option<f64>,
    current_health_coverage: Option<f64>,
    desired_coverage_per_person: Option<f64>,
    num_dependents: Option<u32>,
    child_age: Option<u32>,
    college_age: Option<u32>,
    current_annual_tuition: Option<f64>,
    tuition_inflation: Option<f64>,
    college_years: Option<u32>,
    retirement_age: Option<u32>,
    years_in_retirement: Option<u32>,
    inflation_rate: Option<f64>,
    monthly_retirement_saving: Option<f64>,
}

/// Raw form values. Rates are percentages; money is in pesos.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ReportArgs {
    #[arg(long, default_value = "", help = "Display name printed on the summary")]
    pub name: String,
    #[arg(long, default_value_t = 30)]
    pub age: u32,
    #[arg(long, default_value_t = 50_000.0)]
    pub monthly_income: f64,
    #[arg(long, default_value_t = 20_000.0)]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 100_000.0)]
    pub existing_savings: f64,
    #[arg(long, default_value_t = 250_000.0)]
    pub life_insurance_coverage: f64,
    #[arg(long, default_value_t = 100_000.0)]
    pub current_health_coverage: f64,
    #[arg(long, default_value_t = 500_000.0)]
    pub desired_coverage_per_person: f64,
    #[arg(long, default_value_t = 4, help = "People to cover, including yourself")]
    pub num_dependents: u32,
    #[arg(long, default_value_t = 5)]
    pub child_age: u32,
    #[arg(long, default_value_t = 18, help = "Age the child starts college")]
    pub college_age: u32,
    #[arg(long, default_value_t = 60_000.0)]
    pub current_annual_tuition: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Annual tuition inflation in percent, e.g. 5"
    )]
    pub tuition_inflation: f64,
    #[arg(long, default_value_t = 4)]
    pub college_years: u32,
    #[arg(long, default_value_t = 60)]
    pub retirement_age: u32,
    #[arg(long, default_value_t = 20)]
    pub years_in_retirement: u32,
    #[arg(
        long,
        default_value_t = 1.5,
        help = "General annual inflation in percent, e.g. 1.5"
    )]
    pub inflation_rate: f64,
    #[arg(long, default_value_t = 8_000.0)]
    pub monthly_retirement_saving: f64,
}

#[derive(Debug)]
struct ApiRequest {
    name: String,
    inputs: ProfileInputs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub name: String,
    pub report: ProjectionReport,
    pub series: ProjectionSeries,
    pub chart: ChartSpec,
    pub summary_lines: Vec<String>,
    pub summary_fields: Vec<SummaryField>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn non_negative_money(field: &'static str, value: f64) -> Result<f64, PayloadError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PayloadError::InvalidMoney { field, value });
    }
    Ok(value)
}

fn percent_to_rate(field: &'static str, percent: f64) -> Result<f64, PayloadError> {
    if !(0.0..=MAX_RATE_PERCENT).contains(&percent) {
        return Err(PayloadError::RateOutOfRange {
            field,
            value: percent,
        });
    }
    Ok(percent / 100.0)
}

/// Applies the form's bounds and converts percentages to fractions.
pub fn build_inputs(args: &ReportArgs) -> Result<ProfileInputs, PayloadError> {
    let current_annual_tuition =
        non_negative_money("currentAnnualTuition", args.current_annual_tuition)?
            .clamp(10_000.0, 1_000_000.0);

    Ok(ProfileInputs {
        age: args.age.clamp(18, 100),
        monthly_income: non_negative_money("monthlyIncome", args.monthly_income)?,
        monthly_expenses: non_negative_money("monthlyExpenses", args.monthly_expenses)?,
        existing_savings: non_negative_money("existingSavings", args.existing_savings)?,
        life_insurance_coverage: non_negative_money(
            "lifeInsuranceCoverage",
            args.life_insurance_coverage,
        )?,
        current_health_coverage: non_negative_money(
            "currentHealthCoverage",
            args.current_health_coverage,
        )?,
        desired_health_coverage_per_person: non_negative_money(
            "desiredCoveragePerPerson",
            args.desired_coverage_per_person,
        )?,
        num_dependents: args.num_dependents.clamp(1, 10),
        child_age: args.child_age.min(17),
        college_start_age: args.college_age.clamp(15, 25),
        current_annual_tuition,
        tuition_inflation_rate: percent_to_rate("tuitionInflation", args.tuition_inflation)?,
        college_years: args.college_years.clamp(2, 6),
        retirement_age: args.retirement_age.clamp(50, 70),
        years_in_retirement: args.years_in_retirement.clamp(10, 30),
        inflation_rate: percent_to_rate("inflationRate", args.inflation_rate)?,
        monthly_retirement_saving: non_negative_money(
            "monthlyRetirementSaving",
            args.monthly_retirement_saving,
        )?,
    })
}

pub fn default_args_for_api() -> ReportArgs {
    ReportArgs {
        name: String::new(),
        age: 30,
        monthly_income: 50_000.0,
        monthly_expenses: 20_000.0,
        existing_savings: 100_000.0,
        life_insurance_coverage: 250_000.0,
        current_health_coverage: 100_000.0,
        desired_coverage_per_person: 500_000.0,
        num_dependents: 4,
        child_age: 5,
        college_age: 18,
        current_annual_tuition: 60_000.0,
        tuition_inflation: 5.0,
        college_years: 4,
        retirement_age: 60,
        years_in_retirement: 20,
        inflation_rate: 1.5,
        monthly_retirement_saving: 8_000.0,
    }
}

pub fn build_report_response(name: String, output: ProjectionOutput) -> ReportResponse {
    ReportResponse {
        name,
        chart: chart_spec(&output.series),
        summary_lines: summary_lines(&output.report),
        summary_fields: summary_fields(&output.report),
        report: output.report,
        series: output.series,
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/api/report", get(report_get_handler).post(report_post_handler))
        .route(
            "/api/summary",
            get(summary_get_handler).post(summary_post_handler),
        )
        .route("/healthz", get(health_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("FNA HTTP API listening on http://{addr}");
    log::info!("Local access: http://127.0.0.1:{}/api/report", addr.port());

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    with_cache_control("ok")
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn report_get_handler(
    payload: Result<Query<ReportPayload>, QueryRejection>,
) -> Response {
    report_handler_impl(payload.map(|Query(p)| p).map_err(query_rejection))
}

async fn report_post_handler(payload: Result<Json<ReportPayload>, JsonRejection>) -> Response {
    report_handler_impl(payload.map(|Json(p)| p).map_err(json_rejection))
}

async fn summary_get_handler(
    payload: Result<Query<ReportPayload>, QueryRejection>,
) -> Response {
    summary_handler_impl(payload.map(|Query(p)| p).map_err(query_rejection))
}

async fn summary_post_handler(payload: Result<Json<ReportPayload>, JsonRejection>) -> Response {
    summary_handler_impl(payload.map(|Json(p)| p).map_err(json_rejection))
}

fn query_rejection(rejection: QueryRejection) -> PayloadError {
    PayloadError::Malformed(rejection.body_text())
}

fn json_rejection(rejection: JsonRejection) -> PayloadError {
    PayloadError::Malformed(rejection.body_text())
}

fn bad_request(err: PayloadError) -> Response {
    log::warn!("rejected report payload: {err}");
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn compute(
    payload: Result<ReportPayload, PayloadError>,
) -> Result<(String, ProjectionOutput), Response> {
    let request = payload
        .and_then(api_request_from_payload)
        .map_err(bad_request)?;
    let output = run_projection(&request.inputs).map_err(|err| {
        log::error!("projection failed: {err}");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
    })?;
    Ok((request.name, output))
}

fn report_handler_impl(payload: Result<ReportPayload, PayloadError>) -> Response {
    match compute(payload) {
        Ok((name, output)) => json_response(StatusCode::OK, build_report_response(name, output)),
        Err(response) => response,
    }
}

fn summary_handler_impl(payload: Result<ReportPayload, PayloadError>) -> Response {
    let (name, output) = match compute(payload) {
        Ok(computed) => computed,
        Err(response) => return response,
    };
    let document = SummaryDocument::new(&name, Local::now().date_naive(), &output.report);
    let disposition = format!("attachment; filename=\"{}\"", document.file_name());

    with_cache_control((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.render(),
    ))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str) -> Result<ApiRequest, PayloadError> {
    let payload = serde_json::from_str::<ReportPayload>(json)
        .map_err(|e| PayloadError::Malformed(e.to_string()))?;
    api_request_from_payload(payload)
}

fn api_request_from_payload(payload: ReportPayload) -> Result<ApiRequest, PayloadError> {
    let mut args = default_args_for_api();

    if let Some(v) = payload.name {
        args.name = v;
    }
    if let Some(v) = payload.age {
        args.age = v;
    }
    if let Some(v) = payload.monthly_income {
        args.monthly_income = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.existing_savings {
        args.existing_savings = v;
    }
    if let Some(v) = payload.life_insurance_coverage {
        args.life_insurance_coverage = v;
    }
    if let Some(v) = payload.current_health_coverage {
        args.current_health_coverage = v;
    }
    if let Some(v) = payload.desired_coverage_per_person {
        args.desired_coverage_per_person = v;
    }
    if let Some(v) = payload.num_dependents {
        args.num_dependents = v;
    }
    if let Some(v) = payload.child_age {
        args.child_age = v;
    }
    if let Some(v) = payload.college_age {
        args.college_age = v;
    }
    if let Some(v) = payload.current_annual_tuition {
        args.current_annual_tuition = v;
    }
    if let Some(v) = payload.tuition_inflation {
        args.tuition_inflation = v;
    }
    if let Some(v) = payload.college_years {
        args.college_years = v;
    }
    if let Some(v) = payload.retirement_age {
        args.retirement_age = v;
    }
    if let Some(v) = payload.years_in_retirement {
        args.years_in_retirement = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    if let Some(v) = payload.monthly_retirement_saving {
        args.monthly_retirement_saving = v;
    }

    let inputs = build_inputs(&args)?;
    Ok(ApiRequest {
        name: args.name,
        inputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use chrono::NaiveDate;
    use std::fs;
    use std::path::Path;
    use tower::ServiceExt;

    fn sample_args() -> ReportArgs {
        default_args_for_api()
    }

    fn assert_golden_snapshot(path: &str, actual: &str) {
        let update = matches!(
            std::env::var("UPDATE_GOLDEN").as_deref(),
            Ok("1") | Ok("true") | Ok("TRUE")
        );
        let snapshot_path = Path::new(path);

        if update {
            if let Some(parent) = snapshot_path.parent() {
                fs::create_dir_all(parent).expect("failed to create snapshot directory");
            }
            fs::write(snapshot_path, actual).expect("failed to write golden snapshot");
            return;
        }

        let expected = fs::read_to_string(snapshot_path).unwrap_or_else(|_| {
            panic!("missing golden snapshot at {path}; run with UPDATE_GOLDEN=1 to generate")
        });
        assert_eq!(
            actual, expected,
            "snapshot mismatch for {path}; run with UPDATE_GOLDEN=1 to refresh if expected"
        );
    }

    async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (
            status,
            headers,
            String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        )
    }

    #[test]
    fn build_inputs_converts_percentages_to_fractions() {
        let inputs = build_inputs(&sample_args()).expect("valid inputs");
        assert_abs_diff_eq!(inputs.tuition_inflation_rate, 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(inputs.inflation_rate, 0.015, epsilon = 1e-12);
        assert_eq!(inputs.college_start_age, 18);
        assert_eq!(inputs.num_dependents, 4);
    }

    #[test]
    fn build_inputs_clamps_integer_fields_to_form_bounds() {
        let mut args = sample_args();
        args.age = 5;
        args.num_dependents = 0;
        args.child_age = 30;
        args.college_age = 40;
        args.college_years = 9;
        args.retirement_age = 90;
        args.years_in_retirement = 1;
        args.current_annual_tuition = 500.0;

        let inputs = build_inputs(&args).expect("valid inputs");
        assert_eq!(inputs.age, 18);
        assert_eq!(inputs.num_dependents, 1);
        assert_eq!(inputs.child_age, 17);
        assert_eq!(inputs.college_start_age, 25);
        assert_eq!(inputs.college_years, 6);
        assert_eq!(inputs.retirement_age, 70);
        assert_eq!(inputs.years_in_retirement, 10);
        assert_abs_diff_eq!(inputs.current_annual_tuition, 10_000.0, epsilon = 1e-12);
    }

    #[test]
    fn build_inputs_rejects_negative_money() {
        let mut args = sample_args();
        args.monthly_expenses = -1.0;

        let err = build_inputs(&args).expect_err("must reject negative expenses");
        assert_eq!(
            err,
            PayloadError::InvalidMoney {
                field: "monthlyExpenses",
                value: -1.0
            }
        );
    }

    #[test]
    fn build_inputs_rejects_non_finite_money() {
        let mut args = sample_args();
        args.monthly_retirement_saving = f64::INFINITY;

        let err = build_inputs(&args).expect_err("must reject infinite saving");
        assert!(err.to_string().contains("monthlyRetirementSaving"));
    }

    #[test]
    fn build_inputs_rejects_rates_above_slider_range() {
        let mut args = sample_args();
        args.inflation_rate = 12.5;

        let err = build_inputs(&args).expect_err("must reject 12.5%");
        assert!(err.to_string().contains("inflationRate"));
        assert!(err.to_string().contains("between 0 and 10"));
    }

    #[test]
    fn api_request_from_json_parses_form_keys() {
        let json = r#"{
          "name": "Maria",
          "age": 40,
          "monthlyIncome": 80000,
          "monthlyExpenses": 30000,
          "desiredCoveragePerPerson": 300000,
          "numDependents": 3,
          "childAge": 10,
          "collegeAge": 19,
          "tuitionInflation": 6,
          "retirementAge": 65,
          "inflationRate": 2,
          "monthlyRetirementSaving": 12000
        }"#;
        let request = api_request_from_json(json).expect("json should parse");
        let inputs = request.inputs;

        assert_eq!(request.name, "Maria");
        assert_eq!(inputs.age, 40);
        assert_abs_diff_eq!(inputs.monthly_income, 80_000.0, epsilon = 1e-12);
        assert_abs_diff_eq!(inputs.monthly_expenses, 30_000.0, epsilon = 1e-12);
        assert_abs_diff_eq!(inputs.desired_health_coverage_per_person, 300_000.0, epsilon = 1e-12);
        assert_eq!(inputs.num_dependents, 3);
        assert_eq!(inputs.child_age, 10);
        assert_eq!(inputs.college_start_age, 19);
        assert_abs_diff_eq!(inputs.tuition_inflation_rate, 0.06, epsilon = 1e-12);
        assert_eq!(inputs.retirement_age, 65);
        assert_abs_diff_eq!(inputs.inflation_rate, 0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(inputs.monthly_retirement_saving, 12_000.0, epsilon = 1e-12);
        // Untouched fields keep the form defaults.
        assert_abs_diff_eq!(inputs.existing_savings, 100_000.0, epsilon = 1e-12);
        assert_eq!(inputs.college_years, 4);
    }

    #[test]
    fn api_request_from_json_reports_malformed_payload() {
        let err = api_request_from_json(r#"{"age": "thirty"}"#).expect_err("must reject");
        assert!(matches!(err, PayloadError::Malformed(_)));
        assert!(err.to_string().starts_with("Invalid request payload"));
    }

    #[test]
    fn report_response_serialization_contains_expected_fields() {
        let inputs = build_inputs(&sample_args()).expect("valid inputs");
        let output = run_projection(&inputs).expect("projection");
        let response = build_report_response("Ana".to_string(), output);
        let json = serde_json::to_string(&response).expect("response should serialize");

        assert!(json.contains("\"report\""));
        assert!(json.contains("\"series\""));
        assert!(json.contains("\"targetLine\""));
        assert!(json.contains("\"summaryLines\""));
        assert!(json.contains("\"tuitionProjection\""));
        assert!(json.contains("\"retirementFundTarget\""));
        assert!(json.contains("\"fund4\""));
        assert!(json.contains("\"Target Fund\""));
        assert_eq!(response.series.len(), 30);
        assert_eq!(response.chart.lines.len(), 4);
    }

    #[test]
    fn golden_snapshot_default_summary_document() {
        let mut payload = ReportPayload::default();
        payload.name = Some("Juan Dela Cruz".to_string());
        let request = api_request_from_payload(payload).expect("defaults");
        let output = run_projection(&request.inputs).expect("projection");
        let generated_on = NaiveDate::from_ymd_opt(2026, 10, 14).expect("valid date");
        let document = SummaryDocument::new(&request.name, generated_on, &output.report);

        assert_golden_snapshot("tests/golden/default_summary.txt", &document.render());
    }

    #[test]
    fn report_response_carries_keyed_summary_fields() {
        let request = api_request_from_payload(ReportPayload::default()).expect("defaults");
        let output = run_projection(&request.inputs).expect("projection");
        let response = build_report_response(request.name, output);
        let value = serde_json::to_value(&response).expect("response should serialize");

        let fields = value["summaryFields"].as_array().expect("summaryFields array");
        assert_eq!(fields.len(), 19);
        assert_eq!(fields[0]["key"], "needs");
        assert_eq!(fields[0]["label"], "Needs");
        assert_eq!(fields[0]["display"], "₱25,000.00");
        assert!(
            fields
                .iter()
                .any(|f| f["key"] == "years_until_college" && f["display"] == "13 years")
        );
    }

    #[tokio::test]
    async fn report_route_accepts_query_parameters() {
        let request = Request::builder()
            .uri("/api/report?age=65&retirementAge=60&name=Lito")
            .body(Body::empty())
            .expect("request");
        let (status, headers, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        let value: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(value["name"], "Lito");
        assert_eq!(value["report"]["yearsToRetirement"], 0);
        assert_eq!(value["series"]["years"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn report_route_accepts_json_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"monthlyIncome": 50000, "monthlyExpenses": 20000}"#))
            .expect("request");
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert_eq!(value["report"]["needs"], 25_000.0);
        assert_eq!(value["report"]["emergencyFundNeeded"], 120_000.0);
        assert_eq!(value["summaryLines"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn report_route_rejects_out_of_range_rates() {
        let request = Request::builder()
            .uri("/api/report?tuitionInflation=25")
            .body(Body::empty())
            .expect("request");
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert!(
            value["error"]
                .as_str()
                .is_some_and(|msg| msg.contains("tuitionInflation"))
        );
    }

    #[tokio::test]
    async fn summary_route_streams_text_attachment() {
        let request = Request::builder()
            .uri("/api/summary?name=Juan")
            .body(Body::empty())
            .expect("request");
        let (status, headers, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"fna_summary.txt\""
        );
        let mut lines = body.lines();
        assert_eq!(lines.next(), Some("FNA Summary for Juan"));
        assert!(lines.next().is_some_and(|l| l.starts_with("Generated on: ")));
        assert!(body.contains("Needs: ₱25,000.00"));
        assert!(body.contains("Years Until College: 13 years"));
    }

    #[tokio::test]
    async fn report_route_rejects_malformed_json_body_as_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/report")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"age":"thirty"}"#))
            .expect("request");
        let (status, headers, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        let value: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert!(
            value["error"]
                .as_str()
                .is_some_and(|msg| msg.starts_with("Invalid request payload"))
        );
    }

    #[tokio::test]
    async fn report_route_rejects_malformed_query_as_bad_request() {
        let request = Request::builder()
            .uri("/api/report?age=abc")
            .body(Body::empty())
            .expect("request");
        let (status, headers, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        let value: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn summary_route_rejects_body_without_json_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/summary")
            .body(Body::from(r#"{"age":40}"#))
            .expect("request");
        let (status, headers, body) = send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        let value: serde_json::Value = serde_json::from_str(&body).expect("json body");
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let request = Request::builder()
            .uri("/nope")
            .body(Body::empty())
            .expect("request");
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"Not found"}"#);
    }

    #[tokio::test]
    async fn health_route_answers_ok() {
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .expect("request");
        let (status, _, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }
}
