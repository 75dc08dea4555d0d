// Gauge panel - draws the half-donut on a braille canvas
//
// The geometry module decides angles, radii, and zone color; this
// component only projects them onto the canvas. ratatui redraws the
// whole frame every pass, so each render fully replaces the previous
// arcs (clear-then-redraw comes for free).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Paragraph,
    },
    Frame,
};

use crate::gauge::{self, GaugeGeometry};
use crate::theme::Theme;
use crate::tui::app::App;

/// Unit drawing space handed to the geometry: a 2.0 x 1.0 box, so the
/// outer radius comes out as 1.0 and the canvas bounds below fit it.
const UNIT_WIDTH: f64 = 2.0;
const UNIT_HEIGHT: f64 = 1.0;

/// Angle step between radial samples; small enough that the braille
/// dots form a closed band at typical panel sizes.
const ARC_SAMPLES: usize = 160;

/// Render the gauge panel
pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Gauge ")
        .border_style(theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 3 || inner.width < 8 {
        return; // Too small to draw anything meaningful
    }

    let Some(value) = app.gauge_value else {
        let waiting = Paragraph::new("waiting for first sample...")
            .style(theme.dim)
            .centered();
        frame.render_widget(waiting, center_line(inner));
        return;
    };

    let spec = app.widget.gauge_spec(value);
    let geometry = match gauge::layout(&spec, UNIT_WIDTH, UNIT_HEIGHT) {
        Ok(geometry) => geometry,
        Err(invalid) => {
            // Fatal to this render call only; polling continues
            tracing::debug!("Skipping gauge render: {}", invalid);
            let message = Paragraph::new(format!("cannot render: {}", invalid))
                .style(theme.error)
                .centered();
            frame.render_widget(message, center_line(inner));
            return;
        }
    };

    // Canvas above, one centered label line below
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    draw_arcs(frame, chunks[0], &geometry, theme);

    let label = Paragraph::new(geometry.label.clone())
        .style(Style::default().fg(theme.zone_color(geometry.zone)))
        .centered();
    frame.render_widget(label, chunks[1]);
}

/// Middle line of an area, for short centered messages.
fn center_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    }
}

fn draw_arcs(frame: &mut Frame, area: Rect, geometry: &GaugeGeometry, theme: &Theme) {
    let fill_color = theme.zone_color(geometry.zone);
    let track_color = theme.track;
    let geometry = geometry.clone();

    let canvas = Canvas::default()
        .x_bounds([-1.05, 1.05])
        .y_bounds([0.0, 1.05])
        .paint(move |ctx| {
            arc_band(
                ctx,
                geometry.start_angle,
                gauge::FULL_ANGLE,
                geometry.inner_radius,
                geometry.outer_radius,
                track_color,
            );
            arc_band(
                ctx,
                geometry.start_angle,
                geometry.fill_angle,
                geometry.inner_radius,
                geometry.outer_radius,
                fill_color,
            );
        });
    frame.render_widget(canvas, area);
}

/// Paint an arc band as radial segments between the inner and outer
/// radius. Gauge angles run -pi/2 (left) to +pi/2 (right), so x is
/// sin(angle) and y is cos(angle) with the apex straight up.
fn arc_band(
    ctx: &mut ratatui::widgets::canvas::Context<'_>,
    from: f64,
    to: f64,
    inner: f64,
    outer: f64,
    color: ratatui::style::Color,
) {
    if to <= from {
        return;
    }
    let span = to - from;
    let samples = ((span / std::f64::consts::PI) * ARC_SAMPLES as f64).ceil() as usize;
    for i in 0..=samples.max(1) {
        let angle = from + span * (i as f64 / samples.max(1) as f64);
        let (x, y) = (angle.sin(), angle.cos());
        ctx.draw(&CanvasLine {
            x1: inner * x,
            y1: inner * y,
            x2: outer * x,
            y2: outer * y,
            color,
        });
    }
}
