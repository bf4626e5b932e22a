use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use mes_core::ModelIdentifier;
use mes_material_flow_resources::NumberGenerator;

const DEFAULT_WIDTH: usize = 6;

/// Zero-padded per-model sequence numbers (`000001`, `000002`, ...).
///
/// Each model counts independently; numbers are never reused within a process.
#[derive(Debug)]
pub struct SequenceNumberGenerator {
    counters: Mutex<HashMap<ModelIdentifier, u64>>,
    width: usize,
}

impl SequenceNumberGenerator {
    pub fn new() -> Self {
        Self::with_width(DEFAULT_WIDTH)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            width,
        }
    }
}

impl Default for SequenceNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberGenerator for SequenceNumberGenerator {
    fn generate_number(&self, model: ModelIdentifier) -> String {
        let mut counters = self.counters.lock().unwrap_or_else(PoisonError::into_inner);
        let next = counters.entry(model).or_insert(0);
        *next += 1;

        let number = format!("{:0width$}", *next, width = self.width);
        tracing::debug!(model = %model, number = %number, "generated number");
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const RESOURCE: ModelIdentifier = ModelIdentifier::new("materialFlowResources", "resource");
    const CORRECTION: ModelIdentifier =
        ModelIdentifier::new("materialFlowResources", "resourceCorrection");

    #[test]
    fn numbers_are_zero_padded_and_increasing() {
        let numbers = SequenceNumberGenerator::new();
        assert_eq!(numbers.generate_number(RESOURCE), "000001");
        assert_eq!(numbers.generate_number(RESOURCE), "000002");
    }

    #[test]
    fn models_count_independently() {
        let numbers = SequenceNumberGenerator::new();
        numbers.generate_number(RESOURCE);
        numbers.generate_number(RESOURCE);
        assert_eq!(numbers.generate_number(CORRECTION), "000001");
    }

    #[test]
    fn numbers_stay_unique_across_threads() {
        let numbers = Arc::new(SequenceNumberGenerator::with_width(4));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let numbers = numbers.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| numbers.generate_number(CORRECTION))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 100);
        assert_eq!(all.last().map(String::as_str), Some("0100"));
    }
}
