//! Validation of user-edited parameter text

use springbody_core::{round_display, Body, BodyError, Parameter, ParameterError, ParameterPolicy};

#[test]
fn test_parse_accepts_valid_text() {
    let policy = ParameterPolicy::default();
    assert_eq!(policy.parse(Parameter::Mass, "2.5"), Ok(2.5));
    assert_eq!(policy.parse(Parameter::SpringRate, " 0 "), Ok(0.0));
    assert_eq!(policy.parse(Parameter::Drag, "80"), Ok(80.0));
    assert_eq!(policy.parse(Parameter::GravityY, "-9.81"), Ok(-9.81));
}

#[test]
fn test_parse_rejects_out_of_range() {
    let policy = ParameterPolicy::default();
    let rejected = [
        (Parameter::Mass, "0"),
        (Parameter::Mass, "-1"),
        (Parameter::SpringRate, "-0.5"),
        (Parameter::Drag, "80.5"),
        (Parameter::Drag, "-1"),
        (Parameter::GravityX, "inf"),
        (Parameter::GravityY, "NaN"),
    ];
    for (param, text) in rejected {
        let err = policy.parse(param, text).unwrap_err();
        assert!(
            matches!(err, ParameterError::OutOfRange { .. }),
            "{} = {} should be out of range, got {:?}",
            param,
            text,
            err
        );
    }
}

#[test]
fn test_parse_rejects_garbage() {
    let policy = ParameterPolicy::default();
    let err = policy.parse(Parameter::SpringRate, "3O").unwrap_err();
    assert_eq!(
        err,
        ParameterError::Unparsable {
            param: Parameter::SpringRate,
            text: "3O".to_string(),
        }
    );
    assert!(policy.parse(Parameter::Mass, "").is_err());
}

#[test]
fn test_custom_drag_limit() {
    let policy = ParameterPolicy { max_drag: 200.0 };
    assert_eq!(policy.parse(Parameter::Drag, "150"), Ok(150.0));
}

#[test]
fn test_apply_text_leaves_body_untouched_on_error() {
    let policy = ParameterPolicy::default();
    let mut body = Body::new();

    assert_eq!(policy.apply_text(&mut body, Parameter::Drag, "4"), Ok(4.0));
    assert_eq!(body.drag(), 4.0);

    assert!(policy.apply_text(&mut body, Parameter::Drag, "400").is_err());
    assert_eq!(body.drag(), 4.0);

    policy.apply_text(&mut body, Parameter::GravityX, "1.5").unwrap();
    assert_eq!(body.gravity_acceleration_x(), 1.5);
    assert_eq!(body.gravity_acceleration_y(), 0.0);
}

#[test]
fn test_read_matches_apply() {
    let mut body = Body::new();
    for (i, param) in Parameter::ALL.iter().enumerate() {
        let value = (i + 1) as f32;
        param.apply(&mut body, value).unwrap();
        assert_eq!(param.read(&body), value);
    }
}

#[test]
fn test_round_display() {
    assert_eq!(round_display(14.499_999), 14.5);
    assert_eq!(round_display(-9.81), -9.81);
    assert_eq!(round_display(0.123_456), 0.1235);
}

#[test]
fn test_policy_looser_than_body_surfaces_body_error() {
    let policy = ParameterPolicy {
        max_drag: f32::INFINITY,
    };
    let mut body = Body::new();
    body.set_drag(4.0).unwrap();

    let err = policy.apply_text(&mut body, Parameter::Drag, "inf").unwrap_err();
    assert_eq!(
        err,
        ParameterError::Body(BodyError::InvalidDrag(f32::INFINITY))
    );
    assert_eq!(body.drag(), 4.0);
}
