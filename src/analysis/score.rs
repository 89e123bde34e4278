use crate::results::CategoryScores;

/// Categories scoring below this receive a recommendation
pub const RECOMMENDATION_THRESHOLD: u8 = 60;

/// Weights in tenths: schema 0.4, metadata 0.4, accessibility 0.2
const SCHEMA_WEIGHT: u32 = 4;
const METADATA_WEIGHT: u32 = 4;
const ACCESSIBILITY_WEIGHT: u32 = 2;

pub const SCHEMA_RECOMMENDATION: &str = "Add more structured data using JSON-LD schema markup";
pub const METADATA_RECOMMENDATION: &str = "Improve metadata by adding missing meta tags";
pub const ACCESSIBILITY_RECOMMENDATION: &str =
    "Enhance accessibility by adding ARIA labels and alt text";

/// Weighted overall score, rounded half up.
///
/// Computed in tenths so the rounding is exact.
pub fn overall_score(scores: &CategoryScores) -> u8 {
    let tenths = SCHEMA_WEIGHT * u32::from(scores.schema)
        + METADATA_WEIGHT * u32::from(scores.metadata)
        + ACCESSIBILITY_WEIGHT * u32::from(scores.accessibility);
    ((tenths + 5) / 10).min(100) as u8
}

/// One recommendation per weak category, always in schema, metadata, accessibility order
pub fn recommendations(scores: &CategoryScores) -> Vec<String> {
    [
        (scores.schema, SCHEMA_RECOMMENDATION),
        (scores.metadata, METADATA_RECOMMENDATION),
        (scores.accessibility, ACCESSIBILITY_RECOMMENDATION),
    ]
    .into_iter()
    .filter(|(score, _)| *score < RECOMMENDATION_THRESHOLD)
    .map(|(_, message)| message.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(schema: u8, metadata: u8, accessibility: u8) -> CategoryScores {
        CategoryScores {
            schema,
            metadata,
            accessibility,
        }
    }

    #[test]
    fn test_overall_score() {
        assert_eq!(overall_score(&scores(0, 65, 100)), 46);
        assert_eq!(overall_score(&scores(100, 100, 100)), 100);
        assert_eq!(overall_score(&scores(0, 0, 0)), 0);
        // 0.4*20 + 0.4*25 + 0.2*75 = 33
        assert_eq!(overall_score(&scores(20, 25, 75)), 33);
        // 0.4*0 + 0.4*0 + 0.2*25 = 5
        assert_eq!(overall_score(&scores(0, 0, 25)), 5);
        // 0.4*20 + 0.4*20 + 0.2*10 = 18
        assert_eq!(overall_score(&scores(20, 20, 10)), 18);
    }

    #[test]
    fn test_rounds_to_nearest() {
        // 0.8 -> 1
        assert_eq!(overall_score(&scores(1, 1, 0)), 1);
        // 1.4 -> 1
        assert_eq!(overall_score(&scores(1, 0, 5)), 1);
        // 2.6 -> 3
        assert_eq!(overall_score(&scores(0, 0, 13)), 3);
        // 23.0 -> 23
        assert_eq!(overall_score(&scores(0, 10, 95)), 23);
    }

    #[test]
    fn test_recommendations_order_and_threshold() {
        assert_eq!(
            recommendations(&scores(0, 59, 10)),
            vec![
                SCHEMA_RECOMMENDATION,
                METADATA_RECOMMENDATION,
                ACCESSIBILITY_RECOMMENDATION
            ]
        );
        assert_eq!(
            recommendations(&scores(60, 40, 100)),
            vec![METADATA_RECOMMENDATION]
        );
        assert!(recommendations(&scores(60, 60, 60)).is_empty());
    }
}
