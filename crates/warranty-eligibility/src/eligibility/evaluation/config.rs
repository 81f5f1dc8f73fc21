use serde::{Deserialize, Serialize};

use super::policy::EvaluationPolicy;
use crate::eligibility::timing::TimingWindows;

/// Engine settings: which evaluation policy applies by default and the statutory windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub policy: EvaluationPolicy,
    pub windows: TimingWindows,
}
