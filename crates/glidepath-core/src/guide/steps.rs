//! Discrete step states derived from a continuous step coordinate

use serde::{Deserialize, Serialize};

/// Activation state of one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Pending,
    Active,
    Complete,
}

impl StepState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepState::Pending => "pending",
            StepState::Active => "active",
            StepState::Complete => "complete",
        }
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of step `index` at `coordinate`
///
/// complete iff `coordinate >= index + 1`, active iff
/// `index <= coordinate < index + 1`, pending otherwise.
#[inline]
pub fn state_of(coordinate: f64, index: usize) -> StepState {
    let start = index as f64;
    if coordinate >= start + 1.0 {
        StepState::Complete
    } else if coordinate >= start {
        StepState::Active
    } else {
        StepState::Pending
    }
}

/// States of all `count` steps at `coordinate`
pub fn states_of(coordinate: f64, count: usize) -> Vec<StepState> {
    (0..count).map(|i| state_of(coordinate, i)).collect()
}

/// Index of the active step, if any
///
/// `None` below the first step and once the last step is complete.
pub fn active_step(coordinate: f64, count: usize) -> Option<usize> {
    if count == 0 || !(coordinate >= 0.0) || coordinate >= count as f64 {
        return None;
    }
    Some((coordinate.floor() as usize).min(count - 1))
}

/// Step a host should highlight: `clamp(floor(coordinate), 0, count - 1)`
pub fn focused_step(coordinate: f64, count: usize) -> usize {
    if count == 0 || !(coordinate > 0.0) {
        return 0;
    }
    (coordinate.floor() as usize).min(count - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_rules() {
        assert_eq!(state_of(0.0, 0), StepState::Active);
        assert_eq!(state_of(0.999, 0), StepState::Active);
        assert_eq!(state_of(1.0, 0), StepState::Complete);
        assert_eq!(state_of(0.5, 1), StepState::Pending);
        assert_eq!(state_of(-1.0, 0), StepState::Pending);
    }

    #[test]
    fn test_fractional_coordinate_scenario() {
        let states = states_of(4.0 / 3.0, 4);
        assert_eq!(
            states,
            vec![
                StepState::Complete,
                StepState::Active,
                StepState::Pending,
                StepState::Pending,
            ]
        );
        assert_eq!(active_step(4.0 / 3.0, 4), Some(1));
    }

    #[test]
    fn test_end_of_guide_has_no_active_step() {
        let states = states_of(4.0, 4);
        assert!(states.iter().all(|s| *s == StepState::Complete));
        assert_eq!(active_step(4.0, 4), None);
        assert_eq!(focused_step(4.0, 4), 3);
    }

    #[test]
    fn test_exactly_one_active_inside_domain() {
        let count = 5;
        for i in 0..500 {
            let coordinate = i as f64 / 100.0;
            let active: Vec<usize> = states_of(coordinate, count)
                .iter()
                .enumerate()
                .filter(|(_, s)| **s == StepState::Active)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(active.len(), 1, "coordinate {}", coordinate);
            assert_eq!(Some(active[0]), active_step(coordinate, count));
            assert_eq!(active[0], focused_step(coordinate, count));
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let forward = states_of(2.4, 4);
        let _ = states_of(3.9, 4);
        let _ = states_of(0.1, 4);
        assert_eq!(states_of(2.4, 4), forward);
    }

    #[test]
    fn test_empty_guide() {
        assert!(states_of(1.0, 0).is_empty());
        assert_eq!(active_step(0.0, 0), None);
        assert_eq!(focused_step(0.0, 0), 0);
        assert_eq!(active_step(f64::NAN, 3), None);
    }
}
