use super::{FeatureVector, HouseFeatures};
use crate::Result;
use serde_json::Value;
use tracing::debug;

/// Builds the model-facing feature vector from a decoded request.
pub fn assemble(input: &HouseFeatures) -> Result<FeatureVector> {
    let features = FeatureVector {
        area: input.area.to_f64("area")?,
        bedrooms: input.bedrooms.to_f64("bedrooms")?,
        bathrooms: input.bathrooms.to_f64("bathrooms")?,
        mainroad: encode_mainroad(&input.mainroad),
    };

    debug!("Assembled feature vector: {:?}", features.to_array());

    Ok(features)
}

/// `1.0` for exactly `"yes"`, `0.0` for anything else.
pub fn encode_mainroad(value: &Value) -> f64 {
    match value {
        Value::String(s) if s == "yes" => 1.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, features::NumericValue};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn house(area: f64, bedrooms: f64, bathrooms: f64, mainroad: Value) -> HouseFeatures {
        HouseFeatures {
            area: area.into(),
            bedrooms: bedrooms.into(),
            bathrooms: bathrooms.into(),
            mainroad,
        }
    }

    #[rstest]
    #[case(json!("yes"), 1.0)]
    #[case(json!("no"), 0.0)]
    #[case(json!("Yes"), 0.0)]
    #[case(json!("YES"), 0.0)]
    #[case(json!(" yes"), 0.0)]
    #[case(json!(""), 0.0)]
    #[case(json!(null), 0.0)]
    #[case(json!(1), 0.0)]
    #[case(json!(true), 0.0)]
    #[case(json!(["yes"]), 0.0)]
    fn test_encode_mainroad(#[case] value: Value, #[case] expected: f64) {
        assert_eq!(encode_mainroad(&value), expected);
    }

    #[test]
    fn test_assemble_house_on_main_road() {
        let input = house(7420.0, 4.0, 2.0, json!("yes"));

        let features = assemble(&input).unwrap();

        assert_eq!(features.to_array(), [7420.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn test_assemble_house_off_main_road() {
        let input = house(3000.0, 2.0, 1.0, json!("no"));

        let features = assemble(&input).unwrap();

        assert_eq!(features.to_array(), [3000.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_assemble_accepts_numeric_strings() {
        let input: HouseFeatures = serde_json::from_value(json!({
            "area": "7420",
            "bedrooms": " 4 ",
            "bathrooms": "2.5",
            "mainroad": "yes"
        }))
        .unwrap();

        let features = assemble(&input).unwrap();

        assert_eq!(features.to_array(), [7420.0, 4.0, 2.5, 1.0]);
    }

    #[rstest]
    #[case("large")]
    #[case("")]
    #[case("NaN")]
    #[case("inf")]
    fn test_assemble_rejects_non_numeric_area(#[case] area: &str) {
        let input = HouseFeatures {
            area: NumericValue::Text(area.to_string()),
            bedrooms: 3.0.into(),
            bathrooms: 1.0.into(),
            mainroad: json!("yes"),
        };

        let err = assemble(&input).unwrap_err();

        match err {
            Error::InvalidFeature { field, .. } => assert_eq!(field, "area"),
            other => panic!("expected InvalidFeature, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_has_named_columns_in_order() {
        let frame = assemble(&house(3000.0, 2.0, 1.0, json!("no")))
            .unwrap()
            .to_frame();

        assert_eq!(frame.columns(), ["area", "bedrooms", "bathrooms", "mainroad"]);
        assert_eq!(frame.rows(), [vec![3000.0, 2.0, 1.0, 0.0]]);
        assert_eq!(frame.column_index("mainroad"), Some(3));
        assert_eq!(frame.column_index("price"), None);
    }

    #[test]
    fn test_missing_field_fails_to_decode() {
        for missing in ["area", "bedrooms", "bathrooms", "mainroad"] {
            let mut body = json!({
                "area": 7420,
                "bedrooms": 4,
                "bathrooms": 2,
                "mainroad": "yes"
            });
            body.as_object_mut().unwrap().remove(missing);

            let result = serde_json::from_value::<HouseFeatures>(body);

            assert!(result.is_err(), "decoding without '{missing}' should fail");
        }
    }

    #[test]
    fn test_null_mainroad_is_present_and_encodes_to_zero() {
        let input: HouseFeatures = serde_json::from_value(json!({
            "area": 3000,
            "bedrooms": 2,
            "bathrooms": 1,
            "mainroad": null
        }))
        .unwrap();

        assert_eq!(assemble(&input).unwrap().mainroad, 0.0);
    }
}
