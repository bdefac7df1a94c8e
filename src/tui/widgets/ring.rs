use std::f64::consts::{FRAC_PI_2, TAU};

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Painter, Shape};
use ratatui::widgets::Widget;

use crate::timer::progress::{ring_fill, RING_RADIUS};

/// Canvas half-extent; leaves some room around the ring.
const BOUND: f64 = 100.0;
/// Points sampled along a full turn.
const ARC_STEPS: usize = 720;
/// Radial offsets that make up the thick progress stroke.
const STROKE: [f64; 5] = [-3.0, -1.5, 0.0, 1.5, 3.0];
/// How far the arc fades toward the background on the out-breath.
const EXHALE: f32 = 0.45;

/// Circular progress indicator: a thin track plus an accent arc that shrinks
/// clockwise from 12 o'clock as time runs out.
pub struct ProgressRing {
    remaining_secs: u32,
    total_secs: u32,
    accent: Color,
    track: Color,
    background: Color,
    breathing: bool,
}

impl ProgressRing {
    pub fn new(remaining_secs: u32, total_secs: u32) -> Self {
        Self {
            remaining_secs,
            total_secs,
            accent: Color::Green,
            track: Color::DarkGray,
            background: Color::Reset,
            breathing: false,
        }
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = color;
        self
    }

    pub fn track(mut self, color: Color) -> Self {
        self.track = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Pulse the arc once every two seconds while the countdown runs.
    pub fn breathing(mut self, breathing: bool) -> Self {
        self.breathing = breathing;
        self
    }

    fn arc_color(&self) -> Color {
        if self.breathing && self.remaining_secs % 2 == 1 {
            blend(self.accent, self.background, EXHALE)
        } else {
            self.accent
        }
    }
}

/// Mix `t` of `to` into `from`. Only RGB pairs can be mixed.
fn blend(from: Color, to: Color, t: f32) -> Color {
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ => from,
    }
}

/// Arc of a circle centred on the origin, `fill` of a full turn long.
struct Arc {
    radius: f64,
    fill: f64,
    color: Color,
}

impl Shape for Arc {
    fn draw(&self, painter: &mut Painter) {
        if self.fill <= 0.0 {
            return;
        }
        let steps = (self.fill * ARC_STEPS as f64).round() as usize;
        for i in 0..=steps {
            let angle = FRAC_PI_2 - (i as f64 / ARC_STEPS as f64) * TAU;
            let (x, y) = (self.radius * angle.cos(), self.radius * angle.sin());
            if let Some((px, py)) = painter.get_point(x, y) {
                painter.paint(px, py, self.color);
            }
        }
    }
}

impl Widget for ProgressRing {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fill = ring_fill(self.remaining_secs, self.total_secs);
        let color = self.arc_color();
        let area = square(area);

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.background)
            .x_bounds([-BOUND, BOUND])
            .y_bounds([-BOUND, BOUND])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: RING_RADIUS,
                    color: self.track,
                });
                ctx.layer();
                for offset in STROKE {
                    ctx.draw(&Arc {
                        radius: RING_RADIUS + offset,
                        fill,
                        color,
                    });
                }
            })
            .render(area, buf);
    }
}

/// Largest centred sub-rect that looks square, given cells are about twice
/// as tall as they are wide.
pub fn square(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = height * 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
