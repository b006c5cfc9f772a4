use crate::aggregate::DistinctValues;
use crate::classify::classify;
use crate::config::ScoringConfig;
use crate::evidence::Evidence;
use crate::mask::mask_identifier;
use crate::model::{FieldRecord, Preview, Source, Submission, Verdict};
use crate::similarity::NameSimilarity;

pub const REASON_ID_MATCH: &str = "identifier matches across sources.";
pub const REASON_ID_MISSING: &str = "identifier missing.";
pub const REASON_ID_MISMATCH: &str = "identifier mismatch across sources.";
pub const REASON_CHECKSUM_VALID: &str = "checksum valid.";
pub const REASON_CHECKSUM_NOT_VALIDATED: &str = "checksum not validated.";
pub const REASON_BIRTH_MATCH: &str = "birth date/year matches.";
pub const REASON_BIRTH_DIFFERS: &str = "birth date/year differs across sources.";
pub const REASON_BIRTH_INSUFFICIENT: &str = "birth date/year insufficient data.";

/// Decide with the default scoring policy and token-set name similarity.
pub fn decide(
    ocr: Option<&FieldRecord>,
    qr: Option<&FieldRecord>,
    xml: Option<&FieldRecord>,
) -> Verdict {
    Engine::default().decide(ocr, qr, xml)
}

/// Stateless reconciliation engine. Safe to share across threads.
pub struct Engine {
    config: ScoringConfig,
    similarity: Box<dyn NameSimilarity>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// The three channels of one invocation, indexed in check order.
struct Inputs<'a>([Option<&'a FieldRecord>; 3]);

impl<'a> Inputs<'a> {
    fn present(&self) -> impl Iterator<Item = (Source, &'a FieldRecord)> + '_ {
        Source::ALL
            .iter()
            .zip(self.0.iter())
            .filter_map(|(s, r)| r.map(|r| (*s, r)))
    }

    fn each<T>(&self, f: impl Fn(&'a FieldRecord) -> Option<T>) -> [Option<T>; 3] {
        self.0.map(|r| r.and_then(&f))
    }
}

impl Engine {
    /// Engine using the similarity algorithm named in `config`.
    pub fn new(config: ScoringConfig) -> Self {
        let similarity = config.similarity.algorithm.build();
        Self { config, similarity }
    }

    /// Engine with a caller-supplied similarity implementation.
    pub fn with_similarity(config: ScoringConfig, similarity: Box<dyn NameSimilarity>) -> Self {
        Self { config, similarity }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn decide_submission(&self, submission: &Submission) -> Verdict {
        self.decide(
            submission.record(Source::Ocr),
            submission.record(Source::Qr),
            submission.record(Source::Xml),
        )
    }

    /// Cross-check up to three records and produce a verdict.
    ///
    /// Every absent record or field falls through to the check's
    /// missing/insufficient branch; this never fails.
    pub fn decide(
        &self,
        ocr: Option<&FieldRecord>,
        qr: Option<&FieldRecord>,
        xml: Option<&FieldRecord>,
    ) -> Verdict {
        let inputs = Inputs([ocr, qr, xml]);
        let mut evidence = Evidence::new();

        let identifiers = DistinctValues::collect(inputs.each(FieldRecord::identifier));
        self.check_identifier(&identifiers, &mut evidence);
        self.check_checksum(&inputs, &mut evidence);
        self.check_name(&inputs, &mut evidence);
        self.check_birth(&inputs, &mut evidence);

        let (score, reasons) = evidence.into_parts();
        let outcome = classify(score, &self.config.thresholds);
        let names = inputs.each(|r| r.name.clone());
        let [name_ocr, name_qr, name_xml] = names;
        let preview = Preview {
            // On disagreement the lowest value is shown.
            identifier: identifiers.iter().next().map(mask_identifier),
            name_ocr,
            name_qr,
            name_xml,
        };

        log::debug!(
            "verdict {outcome} (score {score}/{}) for identifier {}",
            self.config.max_score(),
            preview.identifier.as_deref().unwrap_or("-"),
        );

        Verdict {
            outcome,
            score,
            reasons,
            preview,
        }
    }

    /// Exact string agreement; a single supplier counts as agreement.
    fn check_identifier(&self, identifiers: &DistinctValues<'_>, evidence: &mut Evidence) {
        if identifiers.is_empty() {
            evidence.note(REASON_ID_MISSING);
        } else if identifiers.len() == 1 {
            evidence.award(self.config.weights.identifier, REASON_ID_MATCH);
        } else {
            evidence.note(REASON_ID_MISMATCH);
        }
    }

    /// Only QR and XML checksum results are trusted.
    fn check_checksum(&self, inputs: &Inputs<'_>, evidence: &mut Evidence) {
        let validated = inputs
            .present()
            .any(|(source, r)| source.is_machine_readable() && r.checksum_valid());
        if validated {
            evidence.award(self.config.weights.checksum, REASON_CHECKSUM_VALID);
        } else {
            evidence.note(REASON_CHECKSUM_NOT_VALIDATED);
        }
    }

    /// Compares the first two available names in OCR, QR, XML order.
    /// Silent when fewer than two names exist. The threshold applies to the
    /// unrounded score; the reason shows it rounded.
    fn check_name(&self, inputs: &Inputs<'_>, evidence: &mut Evidence) {
        let mut names = inputs.present().filter_map(|(_, r)| r.name());
        let (Some(first), Some(second)) = (names.next(), names.next()) else {
            return;
        };

        let score = self.similarity.similarity(first, second);
        let shown = score.round() as u32;
        if score >= f64::from(self.config.thresholds.name_similarity) {
            evidence.award(self.config.weights.name, format!("name match high ({shown})."));
        } else {
            evidence.note(format!("name mismatch ({shown})."));
        }
    }

    /// Raw string comparison: a full date never equals a bare year.
    fn check_birth(&self, inputs: &Inputs<'_>, evidence: &mut Evidence) {
        let values = DistinctValues::collect(inputs.each(FieldRecord::birth_value));
        if values.contributors() < 2 {
            evidence.note(REASON_BIRTH_INSUFFICIENT);
        } else if values.len() == 1 {
            evidence.award(self.config.weights.birth, REASON_BIRTH_MATCH);
        } else {
            evidence.note(REASON_BIRTH_DIFFERS);
        }
    }
}
