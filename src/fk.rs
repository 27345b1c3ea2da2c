use std::f64::consts::PI;

use crate::geom::Point;

static SHOULDER: Point = (0.0, 0.0);

/// Joint positions of the arm for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Joints {
    pub(crate) shoulder: Point,
    pub(crate) elbow: Point,
    pub(crate) wrist: Point,
}

impl Joints {
    /// Distance from shoulder to wrist.
    pub(crate) fn reach(&self) -> f64 {
        let (x, y) = self.wrist;
        return (x - self.shoulder.0).hypot(y - self.shoulder.1);
    }
}

/// Planar arm with two revolute joints, shoulder pinned at the origin.
///
/// Joint angles are relative to the parent link, so link 1 points along
/// `theta0 + theta1`. Elbow and wrist are recomputed on every read.
#[derive(Debug, Clone, Copy)]
pub(crate) struct KinematicChain {
    link_lengths: (f64, f64),
    joint_angles: (f64, f64),
}

impl Default for KinematicChain {
    fn default() -> Self {
        return KinematicChain::new((1.0, 1.0), (0.0, 0.0));
    }
}

impl KinematicChain {
    pub(crate) fn new(link_lengths: (f64, f64), joint_angles: (f64, f64)) -> Self {
        return KinematicChain {
            link_lengths,
            joint_angles,
        };
    }

    pub(crate) fn update_joints(&mut self, joint_angles: (f64, f64)) {
        self.joint_angles = joint_angles;
    }

    pub(crate) fn link_lengths(&self) -> (f64, f64) {
        return self.link_lengths;
    }

    pub(crate) fn joint_angles(&self) -> (f64, f64) {
        return self.joint_angles;
    }

    pub(crate) fn forward_kinematics(&self) -> Joints {
        let (th_0, th_1) = self.joint_angles;
        let (l_0, l_1) = self.link_lengths;

        let elbow = (
            SHOULDER.0 + l_0 * th_0.cos(),
            SHOULDER.1 + l_0 * th_0.sin(),
        );
        let wrist = (
            elbow.0 + l_1 * (th_0 + th_1).cos(),
            elbow.1 + l_1 * (th_0 + th_1).sin(),
        );

        return Joints {
            shoulder: SHOULDER,
            elbow,
            wrist,
        };
    }

    pub(crate) fn shoulder(&self) -> Point {
        return SHOULDER;
    }

    pub(crate) fn elbow(&self) -> Point {
        return self.forward_kinematics().elbow;
    }

    pub(crate) fn wrist(&self) -> Point {
        return self.forward_kinematics().wrist;
    }

    /// Angle of the shoulder-to-wrist line against the x axis.
    pub(crate) fn wrist_bearing(&self) -> f64 {
        let (x, y) = self.wrist();
        return y.atan2(x);
    }

    /// Angle between link 0 and the shoulder-to-wrist line.
    pub(crate) fn wrist_offset(&self) -> f64 {
        return self.wrist_bearing() - self.joint_angles.0;
    }

    /// Interior angle at the elbow.
    pub(crate) fn elbow_interior(&self) -> f64 {
        return PI - self.joint_angles.1;
    }

    /// Foot of the perpendicular from the wrist onto the line through link 0.
    pub(crate) fn projection(&self) -> Point {
        let (th_0, th_1) = self.joint_angles;
        let (l_0, l_1) = self.link_lengths;
        let p = l_0 + l_1 * th_1.cos();

        return (p * th_0.cos(), p * th_0.sin());
    }

    pub(crate) fn reach(&self) -> f64 {
        return self.forward_kinematics().reach();
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use super::KinematicChain;

    const EPS: f64 = 1e-12;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        return (a.0 - b.0).abs() < EPS && (a.1 - b.1).abs() < EPS;
    }

    #[test]
    fn default_chain_is_stretched_along_x() {
        let arm = KinematicChain::default();
        let joints = arm.forward_kinematics();

        assert_eq!(joints.shoulder, (0.0, 0.0));
        assert_eq!(joints.elbow, (1.0, 0.0));
        assert_eq!(joints.wrist, (2.0, 0.0));
    }

    #[test]
    fn zero_angles_after_update() {
        let mut arm = KinematicChain::new((1.0, 1.0), (0.3, -0.7));
        arm.update_joints((0.0, 0.0));

        assert_eq!(arm.elbow(), (1.0, 0.0));
        assert_eq!(arm.wrist(), (2.0, 0.0));
    }

    #[test]
    fn right_angle_shoulder() {
        let mut arm = KinematicChain::default();
        arm.update_joints((FRAC_PI_2, 0.0));

        assert!(close(arm.elbow(), (0.0, 1.0)));
        assert!(close(arm.wrist(), (0.0, 2.0)));
    }

    #[test]
    fn matches_closed_form() {
        let configs = [
            ((1.0, 1.0), (0.5, 1.0)),
            ((0.7, 2.3), (-1.2, 2.9)),
            ((3.0, 0.25), (PI, -PI / 3.0)),
            ((0.0, 1.5), (0.9, 0.1)),
            ((-1.0, 1.0), (0.4, 0.4)),
        ];

        for ((l_0, l_1), (th_0, th_1)) in configs {
            let arm = KinematicChain::new((l_0, l_1), (th_0, th_1));
            let elbow = (l_0 * th_0.cos(), l_0 * th_0.sin());
            let wrist = (
                elbow.0 + l_1 * (th_0 + th_1).cos(),
                elbow.1 + l_1 * (th_0 + th_1).sin(),
            );

            assert!(close(arm.elbow(), elbow));
            assert!(close(arm.wrist(), wrist));
        }
    }

    #[test]
    fn update_is_idempotent() {
        let mut once = KinematicChain::new((1.2, 0.8), (0.0, 0.0));
        once.update_joints((0.4, 1.1));

        let mut twice = KinematicChain::new((1.2, 0.8), (0.0, 0.0));
        twice.update_joints((0.4, 1.1));
        twice.update_joints((0.4, 1.1));

        assert_eq!(once.forward_kinematics(), twice.forward_kinematics());
    }

    #[test]
    fn update_replaces_previous_configuration() {
        let mut arm = KinematicChain::default();
        arm.update_joints((1.0, 1.0));
        arm.update_joints((0.5, 1.0));

        assert_eq!(arm.joint_angles(), (0.5, 1.0));
        assert_eq!(
            arm.forward_kinematics(),
            KinematicChain::new((1.0, 1.0), (0.5, 1.0)).forward_kinematics()
        );
    }

    #[test]
    fn zero_length_collapses_elbow() {
        let arm = KinematicChain::new((0.0, 1.0), (1.3, 0.0));
        assert!(close(arm.elbow(), arm.shoulder()));
    }

    #[test]
    fn nan_propagates() {
        let arm = KinematicChain::new((1.0, 1.0), (f64::NAN, 0.0));
        assert!(arm.elbow().0.is_nan());
        assert!(arm.wrist().1.is_nan());
    }

    #[test]
    fn derived_angles() {
        let arm = KinematicChain::new((1.0, 1.0), (0.5, 1.0));

        assert!((arm.elbow_interior() - (PI - 1.0)).abs() < EPS);
        // Equal links: the shoulder-wrist line bisects the elbow bend.
        assert!((arm.wrist_offset() - 0.5).abs() < EPS);
        assert!((arm.wrist_bearing() - 1.0).abs() < EPS);
        assert!((arm.reach() - 2.0 * 0.5f64.cos()).abs() < EPS);
    }

    #[test]
    fn reach_of_snapshot_matches_chain() {
        let arm = KinematicChain::new((1.3, 0.6), (0.2, 0.9));
        let joints = arm.forward_kinematics();
        let (wx, wy) = joints.wrist;

        assert_eq!(joints.reach(), arm.reach());
        assert!((joints.reach() - (wx * wx + wy * wy).sqrt()).abs() < EPS);
        assert!((KinematicChain::new((1.0, 1.0), (0.0, PI)).reach()).abs() < EPS);
    }

    #[test]
    fn projection_is_perpendicular_foot() {
        let arm = KinematicChain::new((1.3, 0.6), (0.2, 0.9));
        let (px, py) = arm.projection();
        let (wx, wy) = arm.wrist();
        let (dx, dy) = (0.2f64.cos(), 0.2f64.sin());

        // wrist - projection is orthogonal to link 0
        assert!(((wx - px) * dx + (wy - py) * dy).abs() < EPS);
        // and the projection lies on the line of link 0
        assert!((px * dy - py * dx).abs() < EPS);
    }
}
