use std::f64::consts::PI;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use indicatif::ProgressBar;
use rand::{thread_rng, Rng};
use rayon::prelude::*;

use crate::fk::{Joints, KinematicChain};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Sample {
    pub(crate) joint_angles: (f64, f64),
    pub(crate) joints: Joints,
}

/// Upper bound on configurations a single sweep may hold in memory.
pub(crate) const MAX_SAMPLES: usize = 50_000_000;

impl Sample {
    pub(crate) fn reach(&self) -> f64 {
        return self.joints.reach();
    }
}

pub(crate) fn check_sample_count(count: usize) -> anyhow::Result<()> {
    anyhow::ensure!(
        count <= MAX_SAMPLES,
        "{} configurations exceed the limit of {}",
        count,
        MAX_SAMPLES
    );
    return Ok(());
}

pub(crate) fn grid_angles(steps0: usize, steps1: usize) -> anyhow::Result<Vec<(f64, f64)>> {
    let count = steps0
        .checked_mul(steps1)
        .with_context(|| format!("grid of {}x{} steps overflows", steps0, steps1))?;
    check_sample_count(count)?;

    let mut output = Vec::with_capacity(count);

    for i in 0..steps0 {
        for j in 0..steps1 {
            output.push((
                -PI + 2.0 * PI / (steps0 as f64) * (i as f64),
                -PI + 2.0 * PI / (steps1 as f64) * (j as f64),
            ));
        }
    }

    return Ok(output);
}

pub(crate) fn random_angles(n: usize) -> Vec<(f64, f64)> {
    let mut rng = thread_rng();
    return (0..n)
        .map(|_| (rng.gen_range(-PI..PI), rng.gen_range(-PI..PI)))
        .collect();
}

pub(crate) fn sweep(
    link_lengths: (f64, f64),
    angles: &[(f64, f64)],
    bar: &ProgressBar,
) -> Vec<Sample> {
    let arm = KinematicChain::new(link_lengths, (0.0, 0.0));

    return angles
        .par_iter()
        .map_with(arm, |arm, joint_angles| {
            arm.update_joints(*joint_angles);
            bar.inc(1);
            return Sample {
                joint_angles: *joint_angles,
                joints: arm.forward_kinematics(),
            };
        })
        .collect();
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Summary {
    pub(crate) count: usize,
    pub(crate) min_reach: f64,
    pub(crate) max_reach: f64,
    pub(crate) mean_reach: f64,
}

impl Summary {
    pub(crate) fn of(samples: &[Sample]) -> Option<Summary> {
        if samples.is_empty() {
            return None;
        }

        let mut min_reach = f64::INFINITY;
        let mut max_reach = f64::NEG_INFINITY;
        let mut total = 0.0;
        for sample in samples {
            let reach = sample.reach();
            min_reach = min_reach.min(reach);
            max_reach = max_reach.max(reach);
            total += reach;
        }

        return Some(Summary {
            count: samples.len(),
            min_reach,
            max_reach,
            mean_reach: total / (samples.len() as f64),
        });
    }
}

pub(crate) fn write_csv<W: Write>(mut out: W, samples: &[Sample]) -> std::io::Result<()> {
    writeln!(out, "theta0,theta1,elbow_x,elbow_y,wrist_x,wrist_y,reach")?;
    for s in samples {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            s.joint_angles.0,
            s.joint_angles.1,
            s.joints.elbow.0,
            s.joints.elbow.1,
            s.joints.wrist.0,
            s.joints.wrist.1,
            s.reach()
        )?;
    }
    return Ok(());
}

pub(crate) fn save_csv(path: &Path, samples: &[Sample]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, samples).with_context(|| format!("failed to write {}", path.display()))?;
    out.flush()?;

    log::info!("Wrote {} samples to {}", samples.len(), path.display());
    return Ok(());
}
