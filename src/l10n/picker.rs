//! Random index sources for variant selection.

use std::sync::{
    LazyLock,
    Mutex,
    PoisonError,
};
use std::time::{
    SystemTime,
    UNIX_EPOCH,
};

use rand::rngs::SmallRng;
use rand::{
    Rng,
    SeedableRng,
};

/// Draws an index in `[0, len)`. `len` is always at least 2 when called by
/// the snippet store.
pub trait VariantPicker {
    /// Returns an index in `[0, len)`.
    fn pick(&self, len: usize) -> usize;
}

/// Process-wide generator, seeded once from the wall clock on first use.
static PROCESS_RNG: LazyLock<Mutex<SmallRng>> = LazyLock::new(|| {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX));
    tracing::debug!("Seeding variant picker");
    Mutex::new(SmallRng::seed_from_u64(seed))
});

/// Default picker backed by the process-wide generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessPicker;

impl VariantPicker for ProcessPicker {
    fn pick(&self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let mut rng = PROCESS_RNG.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(0..len)
    }
}

/// Deterministic picker that always draws the same index (modulo `len`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPicker(pub usize);

impl VariantPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        if len == 0 { 0 } else { self.0 % len }
    }
}

impl<F> VariantPicker for F
where
    F: Fn(usize) -> usize,
{
    fn pick(&self, len: usize) -> usize {
        self(len)
    }
}

/// Selects the variant for a single draw. Out-of-range draws wrap around.
#[must_use]
pub fn select_variant(variants: &[String], draw: usize) -> Option<&str> {
    if variants.is_empty() {
        return None;
    }
    variants.get(draw % variants.len()).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn variants() -> Vec<String> {
        vec!["Hallo!".to_string(), "Guten Tag!".to_string(), "Servus!".to_string()]
    }

    #[rstest]
    #[case(0, "Hallo!")]
    #[case(1, "Guten Tag!")]
    #[case(2, "Servus!")]
    #[case(4, "Guten Tag!")]
    fn select_variant_uses_draw(#[case] draw: usize, #[case] expected: &str) {
        let variants = variants();

        assert_that!(select_variant(&variants, draw), some(eq(expected)));
    }

    #[rstest]
    fn select_variant_empty_is_none() {
        assert_that!(select_variant(&[], 0), none());
    }

    #[rstest]
    fn process_picker_stays_in_range() {
        let picker = ProcessPicker;
        for _ in 0..200 {
            assert_that!(picker.pick(3), lt(3));
        }
    }

    #[rstest]
    fn fixed_picker_wraps() {
        assert_that!(FixedPicker(5).pick(2), eq(1));
        assert_that!(FixedPicker(5).pick(0), eq(0));
    }

    #[rstest]
    fn closures_are_pickers() {
        let last = |len: usize| len - 1;

        assert_that!(last.pick(4), eq(3));
    }
}
