use std::time::Duration;

/// What the engine needs to drive a ticker: how many stages and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerPlan {
    pub stage_count: usize,
    pub interval: Duration,
}

/// Cosmetic stage progress for one unresolved request.
///
/// Only lives inside an in-flight result area or a loading chat message; the
/// terminal render replaces that container, which drops this value with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProgress {
    stages: &'static [&'static str],
    initial_label: &'static str,
    current_index: Option<usize>,
}

impl StageProgress {
    pub fn pending(stages: &'static [&'static str], initial_label: &'static str) -> Self {
        Self {
            stages,
            initial_label,
            current_index: None,
        }
    }

    /// Moves to `stage_index` if it is a later stage than the current one.
    /// Returns false for repeated, out-of-order or out-of-range ticks.
    pub fn advance_to(&mut self, stage_index: usize) -> bool {
        if stage_index >= self.stages.len() {
            return false;
        }
        if self.current_index.is_some_and(|current| stage_index <= current) {
            return false;
        }
        self.current_index = Some(stage_index);
        true
    }

    pub fn label(&self) -> &'static str {
        match self.current_index {
            Some(idx) => self.stages[idx],
            None => self.initial_label,
        }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of stages shown so far.
    pub fn stages_shown(&self) -> usize {
        self.current_index.map_or(0, |idx| idx + 1)
    }

    /// Whole-number percentage, `(stageIndex + 1) / N`.
    pub fn percent(&self) -> u8 {
        if self.stages.is_empty() {
            return 0;
        }
        ((self.stages_shown() * 100) / self.stages.len()) as u8
    }

    pub fn is_exhausted(&self) -> bool {
        self.stages_shown() == self.stages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAGES: &[&str] = &["one", "two", "three", "four"];

    #[test]
    fn starts_at_zero_with_initial_label() {
        let progress = StageProgress::pending(STAGES, "starting");
        assert_eq!(progress.label(), "starting");
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.stages_shown(), 0);
    }

    #[test]
    fn pins_at_last_stage() {
        let mut progress = StageProgress::pending(STAGES, "starting");
        for idx in 0..STAGES.len() {
            assert!(progress.advance_to(idx));
        }
        assert!(progress.is_exhausted());
        assert_eq!(progress.percent(), 100);
        assert!(!progress.advance_to(STAGES.len()));
        assert_eq!(progress.label(), "four");
    }

    #[test]
    fn ignores_stale_and_repeated_ticks() {
        let mut progress = StageProgress::pending(STAGES, "starting");
        assert!(progress.advance_to(1));
        assert!(!progress.advance_to(1));
        assert!(!progress.advance_to(0));
        assert_eq!(progress.label(), "two");
        assert_eq!(progress.percent(), 50);
    }
}
