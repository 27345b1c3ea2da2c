use std::path::PathBuf;

use crate::diagram::Figure;
use crate::fk::KinematicChain;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ArmConfig {
    pub(crate) link_lengths: (f64, f64),
    pub(crate) joint_angles: (f64, f64),
}

impl Default for ArmConfig {
    fn default() -> Self {
        return ArmConfig {
            link_lengths: (1.0, 1.0),
            joint_angles: (0.0, 0.0),
        };
    }
}

impl ArmConfig {
    pub(crate) fn chain(&self) -> KinematicChain {
        return KinematicChain::new(self.link_lengths, self.joint_angles);
    }
}

#[derive(Debug, Clone)]
pub(crate) struct DrawConfig {
    pub(crate) arm: ArmConfig,
    /// Samples per angle marker.
    pub(crate) arc_points: usize,
    pub(crate) figures: Vec<Figure>,
    pub(crate) output: PathBuf,
    pub(crate) dry_run: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct SweepConfig {
    pub(crate) link_lengths: (f64, f64),
    /// Grid resolution per joint, ignored when `random` is set.
    pub(crate) steps: usize,
    pub(crate) random: Option<usize>,
    pub(crate) output: PathBuf,
}
