use crate::config::Thresholds;
use crate::model::Outcome;

/// Map an accumulated score onto PASS / REVIEW / FAIL.
pub fn classify(score: u32, thresholds: &Thresholds) -> Outcome {
    if score >= thresholds.pass {
        Outcome::Pass
    } else if score >= thresholds.review {
        Outcome::Review
    } else {
        Outcome::Fail
    }
}
