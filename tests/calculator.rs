//! Integration tests for the public calculator API.

use tbi_mortality::domain::{coefficients::*, logistic, Bound, CategoricalVariable};
use tbi_mortality::{
    CalculatorService, InputError, ModelError, MortalityModel, PatientInput, TbiError,
};

fn example_patient() -> Result<MortalityModel, ModelError> {
    let mut model = MortalityModel::new();
    model.set_age(10.0)?;
    model.set_ais_severity(3)?;
    model.set_glasgow_coma_score(15)?;
    model.set_injury_severity_score(9)?;
    model.set_systolic_bp(110.0)?;
    model.set_pulse_rate(88.0)?;
    model.set_body_temperature(37.0)?;
    model.set_oxygen_saturation(98.0)?;
    model.set_gender("Female")?;
    model.set_supplemental_oxygen("No")?;
    model.set_drug_use("No")?;
    model.set_race("White")?;
    model.set_injury_type("Blunt")?;
    Ok(model)
}

#[test]
fn end_to_end_example_matches_formula() -> Result<(), TbiError> {
    let model = example_patient()?;

    let linear = INTERCEPT
        + AGE_COEF * 10.0
        + AIS_SEVERITY_COEF * 3.0
        + GCS_COEF * 15.0
        + ISS_COEF * 9.0
        + SBP_COEF * 110.0
        + PULSE_COEF * 88.0
        + BODY_TEMP_COEF * 37.0
        + OXY_SAT_COEF * 98.0
        + WHITE_COEF
        + PAC_ISLNDR_COEF;
    let expected = 1.0 / (1.0 + (-linear).exp());

    let p = model.compute_mortality_probability();
    assert!((p - expected).abs() < 1e-9, "{p} != {expected}");
    assert!(p > 0.0 && p < 1.0);
    Ok(())
}

#[test]
fn continuous_boundaries_are_inclusive() {
    type Setter = fn(&mut MortalityModel, f64) -> Result<(), ModelError>;
    let cases: [(&'static str, Setter, f64, Option<f64>); 8] = [
        ("Age", |m, v| m.set_age(v), 0.0, Some(14.0)),
        ("AIS Severity", |m, v| m.set_ais_severity(v as i32), 1.0, Some(6.0)),
        ("Glasgow Coma Score", |m, v| m.set_glasgow_coma_score(v as i32), 3.0, Some(15.0)),
        ("Injury Severity Score", |m, v| m.set_injury_severity_score(v as i32), 3.0, Some(75.0)),
        ("Systolic Blood Pressure", |m, v| m.set_systolic_bp(v), 0.0, None),
        ("Pulse Rate", |m, v| m.set_pulse_rate(v), 0.0, None),
        ("Body Temperature", |m, v| m.set_body_temperature(v), 0.0, None),
        ("Blood Oxygen Saturation", |m, v| m.set_oxygen_saturation(v), 0.0, Some(100.0)),
    ];

    for (field, set, min, max) in cases {
        let mut model = MortalityModel::new();
        assert!(set(&mut model, min).is_ok(), "{field} min");
        assert_eq!(
            set(&mut model, min - 1.0),
            Err(ModelError::OutOfRange {
                field,
                value: min - 1.0,
                bound: Bound::Min(min),
            })
        );
        if let Some(max) = max {
            assert!(set(&mut model, max).is_ok(), "{field} max");
            let err = set(&mut model, max + 1.0).expect_err("above max");
            assert_eq!(err.field(), Some(field));
            assert!(matches!(err, ModelError::OutOfRange { bound: Bound::Max(m), .. } if m == max));
        }
    }
}

#[test]
fn rejected_value_keeps_previous() {
    let mut model = MortalityModel::new();
    model.set_glasgow_coma_score(12).expect("valid");
    assert!(model.set_glasgow_coma_score(2).is_err());
    assert!(model.set_glasgow_coma_score(16).is_err());
    assert_eq!(model.glasgow_coma_score(), 12);

    model.set_body_temperature(36.5).expect("valid");
    assert!(model.set_body_temperature(f64::NAN).is_err());
    assert_eq!(model.body_temperature(), 36.5);
}

#[test]
fn every_category_option_is_accepted() {
    let mut model = MortalityModel::new();
    for (index, var) in CategoricalVariable::ALL.into_iter().enumerate() {
        let options = model.category_options(index).expect("in range");
        assert_eq!(options, var.options());
        for option in options {
            model.set_category(var, option).expect("listed option");
        }
        let err = model.set_category(var, "Unknown").expect_err("not listed");
        assert!(matches!(err, ModelError::InvalidCategory { .. }));
    }
}

#[test]
fn every_option_moves_log_odds_by_its_coefficient() {
    let mut model = example_patient().expect("valid");
    model.set_race("African American").expect("valid");
    let baseline = model.estimate().linear_predictor;

    let cases: [(CategoricalVariable, &str, &str, f64); 10] = [
        (CategoricalVariable::Gender, "Male", "Female", GENDER_COEF),
        (CategoricalVariable::SupplementalOxygen, "Yes", "No", SUPP_OXY_COEF),
        (CategoricalVariable::DrugUse, "Yes", "No", DRUG_USE_COEF),
        (CategoricalVariable::Race, "White", "African American", WHITE_COEF),
        (CategoricalVariable::Race, "American Indian", "African American", AMER_IND_COEF),
        (CategoricalVariable::Race, "Asian", "African American", ASIAN_COEF),
        (CategoricalVariable::Race, "Pacific Islander", "African American", 1.0),
        (CategoricalVariable::Race, "Other", "African American", OTHER_RACE_COEF),
        (CategoricalVariable::InjuryType, "Penetrating", "Blunt", PEN_INJ_COEF),
        (CategoricalVariable::InjuryType, "Other", "Blunt", OTHER_INJ_COEF),
    ];

    for (variable, option, default, coef) in cases {
        model.set_category(variable, option).expect("listed option");
        let shift = model.estimate().linear_predictor - baseline;
        assert!(
            (shift - coef).abs() < 1e-12,
            "{option}: shift {shift}, expected {coef}"
        );
        model.set_category(variable, default).expect("default option");
        assert_eq!(model.estimate().linear_predictor, baseline);
    }
}

#[test]
fn metadata_lookups() {
    let model = MortalityModel::new();
    assert_eq!(model.variable_count(), 13);
    assert_eq!(model.continuous_variable_count(), 8);
    assert_eq!(model.categorical_variable_count(), 5);

    for index in 0..13 {
        assert!(model.variable_name(index).is_ok());
    }
    assert_eq!(model.variable_name(0), Ok("Gender"));
    assert_eq!(model.variable_name(12), Ok("Blood Oxygen Saturation"));
    assert_eq!(
        model.variable_name(13),
        Err(ModelError::IndexOutOfRange { index: 13, len: 13 })
    );
    assert_eq!(
        model.category_options(5),
        Err(ModelError::IndexOutOfRange { index: 5, len: 5 })
    );
}

#[test]
fn reset_restores_baseline() {
    let baseline = MortalityModel::new().compute_mortality_probability();
    let mut model = example_patient().expect("valid");
    model.set_injury_type("Penetrating").expect("valid");
    model.reset();

    assert_eq!(model.age(), 0.0);
    assert_eq!(model.glasgow_coma_score(), 0);
    assert_eq!(model.gender(), "Female");
    assert_eq!(model.race(), "African American");
    assert_eq!(model.injury_type(), "Blunt");
    assert_eq!(model.compute_mortality_probability(), baseline);
    assert!((baseline - logistic(INTERCEPT + PAC_ISLNDR_COEF)).abs() < 1e-12);
}

#[test]
fn service_distinguishes_unparsable_from_invalid() {
    let mut service = CalculatorService::new();
    let mut input: PatientInput = serde_json::from_str(
        r#"{"age": 10, "ais_severity": 3, "glasgow_coma_score": "15",
            "injury_severity_score": 9, "systolic_bp": 110, "pulse_rate": 88,
            "body_temperature": 37.0, "oxygen_saturation": 98, "race": "White"}"#,
    )
    .expect("json");

    let estimate = service.submit(&input).expect("valid patient");
    let expected = example_patient()
        .expect("valid")
        .compute_mortality_probability();
    assert!((estimate.probability - expected).abs() < 1e-12);

    input.pulse_rate = "fast".to_string();
    let err = service.submit(&input).expect_err("text in numeric field");
    assert!(err.is_unparsable());

    input.pulse_rate = "88".to_string();
    input.oxygen_saturation = "101".to_string();
    let err = service.submit(&input).expect_err("above range");
    assert!(matches!(err, InputError::Invalid(ModelError::OutOfRange { .. })));
    assert!(err
        .user_message()
        .starts_with("Ensure that all fields have a valid entry!"));
}
