use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EngineError {
    /// A required-saving calculation was asked to reach `target` in zero months.
    #[error("cannot spread a target of {target} over a zero-month horizon")]
    ZeroHorizon { target: f64 },
}
