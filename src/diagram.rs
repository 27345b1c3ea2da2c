use crate::fk::{Joints, KinematicChain};
use crate::geom::{angle_marker, Point};
use crate::render::{Color, Primitive, Style, Surface};

/// The figures of the inverse kinematics derivation, in reading order.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Figure {
    /// Labelled arm with joint callouts.
    Arm,
    /// Cartesian legs x, y, the reach r and the elbow angle alpha.
    Equations,
    /// Projection of the wrist onto link 0 and the angle beta.
    Beta,
    /// Bearing gamma of the wrist next to beta.
    Gamma,
}

impl Figure {
    pub(crate) const ALL: [Figure; 4] = [
        Figure::Arm,
        Figure::Equations,
        Figure::Beta,
        Figure::Gamma,
    ];

    pub(crate) fn name(self) -> &'static str {
        return match self {
            Figure::Arm => "arm",
            Figure::Equations => "equations",
            Figure::Beta => "beta",
            Figure::Gamma => "gamma",
        };
    }
}

fn polar(origin: Point, r: f64, angle: f64) -> Point {
    return (origin.0 + r * angle.cos(), origin.1 + r * angle.sin());
}

fn midpoint(a: Point, b: Point) -> Point {
    return (0.5 * (a.0 + b.0), 0.5 * (a.1 + b.1));
}

struct Sketch<'a> {
    arm: &'a KinematicChain,
    joints: Joints,
    surface: &'a mut dyn Surface,
    arc_points: usize,
}

impl<'a> Sketch<'a> {
    fn line(&mut self, from: Point, to: Point, style: Style) {
        self.surface.draw(Primitive::Line { from, to, style });
    }

    fn label(&mut self, at: Point, text: &str, color: Color) {
        self.surface.draw(Primitive::Label {
            at,
            text: text.to_string(),
            style: Style::solid(color),
        });
    }

    fn angle(&mut self, angle: f64, offset: f64, origin: Point, r: f64) {
        let points = angle_marker(angle, offset, origin, r, self.arc_points);
        log::trace!(
            "Angle marker {:.3}rad at ({:.3}, {:.3}) offset {:.3}",
            angle,
            origin.0,
            origin.1,
            offset
        );
        self.surface.draw(Primitive::Polyline {
            points,
            style: Style::solid(Color::Black),
        });
    }

    fn links(&mut self) {
        let Joints {
            shoulder,
            elbow,
            wrist,
        } = self.joints;

        self.line(shoulder, elbow, Style::solid(Color::Red));
        self.line(elbow, wrist, Style::solid(Color::Red));
        for at in [shoulder, elbow, wrist] {
            self.surface.draw(Primitive::Marker { at });
        }
    }

    fn labels(&mut self) {
        let (th_0, th_1) = self.arm.joint_angles();
        let Joints {
            shoulder,
            elbow,
            wrist,
        } = self.joints;

        self.line(shoulder, (0.5, 0.0), Style::dashed(Color::Black));
        self.line(elbow, polar(elbow, 0.5, th_0), Style::dashed(Color::Black));

        self.angle(th_0, 0.0, shoulder, 0.25);
        self.angle(th_1, th_0, elbow, 0.25);

        let normal_0 = th_0 + std::f64::consts::FRAC_PI_2;
        let normal_1 = th_0 + th_1 + std::f64::consts::FRAC_PI_2;
        self.label(polar(midpoint(shoulder, elbow), 0.1, normal_0), "l₀", Color::Red);
        self.label(polar(midpoint(elbow, wrist), 0.1, normal_1), "l₁", Color::Red);

        self.label(polar(shoulder, 0.35, 0.5 * th_0), "θ₀", Color::Black);
        self.label(polar(elbow, 0.35, th_0 + 0.5 * th_1), "θ₁", Color::Black);
    }

    fn reach(&mut self) {
        let Joints {
            shoulder, wrist, ..
        } = self.joints;

        self.line(shoulder, wrist, Style::dashed(Color::Black));
        let normal = self.arm.wrist_bearing() + std::f64::consts::FRAC_PI_2;
        self.label(polar(midpoint(shoulder, wrist), 0.1, normal), "r", Color::Black);
    }

    fn legs(&mut self) {
        let wrist = self.joints.wrist;

        self.line((wrist.0, 0.0), wrist, Style::dashed(Color::Blue));
        self.line((0.0, 0.0), (wrist.0, 0.0), Style::dashed(Color::Blue));
        self.label((0.5 * wrist.0, 0.05), "x", Color::Blue);
        self.label((wrist.0 + 0.05, 0.5 * wrist.1), "y", Color::Blue);
    }

    fn figure(&mut self, figure: Figure) {
        let (th_0, th_1) = self.arm.joint_angles();
        let Joints {
            shoulder,
            elbow,
            wrist,
        } = self.joints;

        match figure {
            Figure::Arm => {
                self.links();
                self.labels();
                self.surface.draw(Primitive::Callout {
                    text: "Shoulder".to_string(),
                    target: shoulder,
                    text_at: (shoulder.0 + 0.15, shoulder.1 + 0.5),
                });
                self.surface.draw(Primitive::Callout {
                    text: "Elbow".to_string(),
                    target: elbow,
                    text_at: (elbow.0 + 0.37, elbow.1 - 0.23),
                });
                self.surface.draw(Primitive::Callout {
                    text: "Wrist".to_string(),
                    target: wrist,
                    text_at: (wrist.0 + 0.05, wrist.1 + 0.27),
                });
            }
            Figure::Equations => {
                self.links();
                self.labels();
                self.reach();
                self.legs();

                let alpha = self.arm.elbow_interior();
                self.angle(alpha, th_0 + th_1, elbow, 0.1);
                let alpha_at = polar(elbow, 0.15, th_0 + th_1 + 0.5 * alpha);
                self.label(alpha_at, "α", Color::Black);
            }
            Figure::Beta => {
                self.links();
                self.reach();

                let projection = self.arm.projection();
                let thick = Style::dashed(Color::Blue).with_width(3.0);
                self.line(elbow, projection, thick);
                self.line(wrist, projection, thick);

                let beta = self.arm.wrist_offset();
                self.angle(beta, th_0, shoulder, 0.45);
                self.label(polar(shoulder, 0.5, th_0 + 0.5 * beta), "β", Color::Black);

                let sin_at = polar(midpoint(wrist, projection), 0.1, th_0);
                let cos_at = polar(
                    midpoint(elbow, projection),
                    0.15,
                    th_0 - std::f64::consts::FRAC_PI_2,
                );
                self.label(sin_at, "l₁sin(θ₁)", Color::Blue);
                self.label(cos_at, "l₁cos(θ₁)", Color::Blue);

                self.labels();
            }
            Figure::Gamma => {
                self.links();
                self.labels();
                self.reach();
                self.legs();

                let beta = self.arm.wrist_offset();
                let gamma = self.arm.wrist_bearing();
                self.angle(beta, th_0, shoulder, 0.2);
                self.angle(gamma, 0.0, shoulder, 0.6);
                self.label(polar(shoulder, 0.28, th_0 + 0.5 * beta), "β", Color::Black);
                self.label(polar(shoulder, 0.65, 0.5 * gamma), "γ", Color::Black);
            }
        }
    }
}

/// Draws one figure for `arm` and finishes it on `surface`.
pub(crate) fn draw_figure(
    figure: Figure,
    arm: &KinematicChain,
    arc_points: usize,
    surface: &mut dyn Surface,
) -> anyhow::Result<()> {
    log::debug!("Drawing figure {}", figure.name());

    let mut sketch = Sketch {
        arm,
        joints: arm.forward_kinematics(),
        surface,
        arc_points,
    };
    sketch.figure(figure);

    return sketch.surface.show();
}
