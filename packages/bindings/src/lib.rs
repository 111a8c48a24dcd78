use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Bond pricing
// ---------------------------------------------------------------------------

#[napi]
pub fn price_bond(input_json: String) -> NapiResult<String> {
    let input: valuation_core::fixed_income::bonds::BondPricingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        valuation_core::fixed_income::bonds::price_bond(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Mortgage amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_amortization(input_json: String) -> NapiResult<String> {
    let input: valuation_core::mortgage::amortization::AmortizationInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = valuation_core::mortgage::amortization::calculate_amortization(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Dividend discount models
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_ddm(input_json: String) -> NapiResult<String> {
    let input: valuation_core::dividends::ddm::DdmInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = valuation_core::dividends::ddm::calculate_ddm(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
