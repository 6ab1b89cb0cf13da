//! Batch padding with synthetic exposures
//!
//! Small real-case counts must not leak through archive size, so short
//! batches are extended with synthetic keys up to a jittered minimum.
//! Synthetic keys get cryptographically random key material; interval
//! fields are sampled from the real pool so the published file is
//! statistically indistinguishable from an all-real one.

use crate::domain::exposure::{DiagnosisType, Exposure};
use crate::domain::interval::KEY_LENGTH;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};

const PADDING_DIAGNOSIS_TYPES: [DiagnosisType; 2] =
    [DiagnosisType::RedWarning, DiagnosisType::YellowWarning];

/// Extends `exposures` to at least `min_length` entries, plus a uniform
/// jitter of `[0, jitter)` extra entries.
///
/// An empty input is returned untouched: a batch is never fabricated from
/// nothing. Only the key bytes are security-critical and come from the OS
/// CSPRNG; jitter and index sampling use the thread-local fast PRNG.
pub fn ensure_min_exposures(
    exposures: &mut Vec<Exposure>,
    region: &str,
    min_length: usize,
    jitter: usize,
) {
    if exposures.is_empty() {
        return;
    }

    let mut rng = rand::thread_rng();
    let extra = if jitter > 0 { rng.gen_range(0..jitter) } else { 0 };
    let target = min_length + extra;

    // Interval fields are sampled from the real pool only, two independent
    // draws per synthetic key.
    let real_len = exposures.len();

    while exposures.len() < target {
        let mut key = [0u8; KEY_LENGTH];
        OsRng.fill_bytes(&mut key);

        let interval_number = exposures[rng.gen_range(0..real_len)].interval_number;
        let interval_count = exposures[rng.gen_range(0..real_len)].interval_count;
        let diagnosis_type = PADDING_DIAGNOSIS_TYPES[rng.gen_range(0..PADDING_DIAGNOSIS_TYPES.len())];

        exposures.push(Exposure {
            exposure_key: Exposure::encode_key(&key),
            transmission_risk: 0,
            interval_number,
            interval_count,
            region: region.to_string(),
            diagnosis_type,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn real_exposure(key_byte: u8, interval_number: i32, interval_count: i32) -> Exposure {
        Exposure {
            exposure_key: Exposure::encode_key(&[key_byte; 16]),
            transmission_risk: 3,
            interval_number: Some(interval_number),
            interval_count: Some(interval_count),
            region: "AT".to_string(),
            diagnosis_type: DiagnosisType::RedWarning,
        }
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let mut exposures = Vec::new();
        ensure_min_exposures(&mut exposures, "AT", 10, 4);
        assert!(exposures.is_empty());
    }

    #[test]
    fn test_padding_reaches_jittered_minimum() {
        for _ in 0..20 {
            let mut exposures = vec![
                real_exposure(0x01, 100, 144),
                real_exposure(0x02, 200, 100),
                real_exposure(0x03, 300, 50),
            ];
            ensure_min_exposures(&mut exposures, "AT", 10, 4);
            assert!(exposures.len() >= 10);
            assert!(exposures.len() < 10 + 4);
        }
    }

    #[test]
    fn test_input_at_or_above_minimum_unchanged_when_no_jitter() {
        let mut exposures: Vec<Exposure> =
            (0..12).map(|i| real_exposure(i as u8, 100, 144)).collect();
        ensure_min_exposures(&mut exposures, "AT", 10, 0);
        assert_eq!(exposures.len(), 12);
    }

    #[test]
    fn test_synthetic_fields_sampled_from_real_pool() {
        let mut exposures = vec![real_exposure(0x01, 100, 144), real_exposure(0x02, 200, 100)];
        ensure_min_exposures(&mut exposures, "AT", 20, 1);

        let interval_numbers: HashSet<Option<i32>> = [Some(100), Some(200)].into_iter().collect();
        let interval_counts: HashSet<Option<i32>> = [Some(144), Some(100)].into_iter().collect();

        for synthetic in &exposures[2..] {
            assert!(interval_numbers.contains(&synthetic.interval_number));
            assert!(interval_counts.contains(&synthetic.interval_count));
            assert_eq!(synthetic.region, "AT");
            assert_ne!(synthetic.diagnosis_type, DiagnosisType::GreenWarning);
            assert_eq!(synthetic.key_data().unwrap().len(), KEY_LENGTH);
        }
    }

    #[test]
    fn test_synthetic_keys_are_distinct() {
        let mut exposures = vec![real_exposure(0x01, 100, 144)];
        ensure_min_exposures(&mut exposures, "AT", 50, 1);

        let keys: HashSet<&str> = exposures.iter().map(|e| e.exposure_key.as_str()).collect();
        assert_eq!(keys.len(), exposures.len());
    }
}
