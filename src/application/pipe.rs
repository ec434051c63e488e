//! Non-interactive mode: one JSON patient in, one JSON result out.

use std::io::{Read, Write};

use serde::Serialize;

use super::calculator::CalculatorService;
use super::input::PatientInput;

/// Response written for one patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipeResponse {
    Ok {
        probability: f64,
        percent: f64,
        linear_predictor: f64,
        computed_at: chrono::DateTime<chrono::Utc>,
    },
    Error {
        kind: &'static str,
        message: String,
    },
}

impl PipeResponse {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// Read a `PatientInput` from `reader`, score it, and write the response as
/// one JSON line to `writer`.
///
/// Input and model errors are reported in the response, not as `Err`.
///
/// # Errors
/// Returns error if the input is not valid JSON for `PatientInput` or the
/// response cannot be written.
pub fn run<R: Read, W: Write>(reader: R, mut writer: W) -> crate::Result<PipeResponse> {
    let input: PatientInput = serde_json::from_reader(reader)?;

    let mut service = CalculatorService::new();
    let response = match service.submit(&input) {
        Ok(estimate) => PipeResponse::Ok {
            probability: estimate.probability,
            percent: estimate.percent(),
            linear_predictor: estimate.linear_predictor,
            computed_at: estimate.computed_at,
        },
        Err(e) => PipeResponse::Error {
            kind: e.kind(),
            message: e.user_message(),
        },
    };

    serde_json::to_writer(&mut writer, &response)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "age": 10, "ais_severity": 3, "glasgow_coma_score": 15,
        "injury_severity_score": 9, "systolic_bp": 110, "pulse_rate": 88,
        "body_temperature": 37.0, "oxygen_saturation": 98, "race": "White"
    }"#;

    #[test]
    fn test_scores_valid_patient() {
        let mut out = Vec::new();
        let response = run(SAMPLE.as_bytes(), &mut out).expect("pipe run");
        assert!(response.is_ok());

        let json: serde_json::Value = serde_json::from_slice(&out).expect("json output");
        assert_eq!(json["status"], "ok");
        let p = json["probability"].as_f64().expect("probability");
        assert!(p > 0.0 && p < 1.0);
        assert!((json["percent"].as_f64().expect("percent") - p * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reports_unparsable_field() {
        let mut out = Vec::new();
        let response = run(r#"{"age": "ten"}"#.as_bytes(), &mut out).expect("pipe run");
        match response {
            PipeResponse::Error { kind, message } => {
                assert_eq!(kind, "unparsable");
                assert!(message.contains("Age"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
        let json: serde_json::Value = serde_json::from_slice(&out).expect("json output");
        assert_eq!(json["status"], "error");
    }

    #[test]
    fn test_reports_invalid_value() {
        let input = SAMPLE.replace("\"glasgow_coma_score\": 15", "\"glasgow_coma_score\": 2");
        let response = run(input.as_bytes(), Vec::new()).expect("pipe run");
        assert!(matches!(response, PipeResponse::Error { kind: "invalid", .. }));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(run("not json".as_bytes(), Vec::new()).is_err());
    }
}
