//! Composed visual state of the control

use serde::Serialize;

use super::{
    format::format_time,
    geometry::{describe_arc, widget_arc, CENTER_X, CENTER_Y, RADIUS, VIEWBOX},
    theme::{Color, Theme},
};
use crate::state::{Snapshot, TimerSession, TimerState};

/// Stroke width of the background track ring
const TRACK_WIDTH: f64 = 8.0;

/// Paint order of the sector and the background track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layering {
    /// Track painted over the sector
    TrackAbove,
    /// Sector painted over the track, so a full circle hides it
    SectorAbove,
}

/// Everything a surface needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub state: TimerState,
    pub dark_mode: bool,
    pub color: Color,
    pub track_color: Color,
    pub layering: Layering,
    pub path: String,
    pub sector_visible: bool,
    pub text: String,
    pub total_seconds: f64,
    pub remaining_seconds: f64,
}

impl Frame {
    /// Build a frame from a session snapshot.
    ///
    /// The steps run in paint order: color, then layering, then the arc, then
    /// the text. Layering must be settled before the full-circle path of a
    /// finished run is applied.
    pub fn compose(snapshot: &Snapshot) -> Self {
        let theme = Theme::from_dark_mode(snapshot.dark_mode);

        let color = theme.resolve(snapshot.state);

        let layering = if snapshot.state == TimerState::Finished {
            Layering::SectorAbove
        } else {
            Layering::TrackAbove
        };

        // A finished run always shows the full circle, whatever is left.
        let path = if snapshot.state == TimerState::Finished {
            describe_arc(CENTER_X, CENTER_Y, RADIUS, 360.0)
        } else {
            widget_arc(snapshot.remaining, snapshot.total)
        };
        let sector_visible = !path.is_empty();

        let text = format_time(snapshot.remaining_seconds());

        Self {
            state: snapshot.state,
            dark_mode: snapshot.dark_mode,
            color,
            track_color: theme.track(),
            layering,
            path,
            sector_visible,
            text,
            total_seconds: snapshot.total_seconds(),
            remaining_seconds: snapshot.remaining_seconds(),
        }
    }

    /// Render the control as a standalone SVG document
    pub fn to_svg(&self) -> String {
        let theme = Theme::from_dark_mode(self.dark_mode);

        let track = format!(
            r#"<circle cx="{CENTER_X}" cy="{CENTER_Y}" r="{RADIUS}" fill="none" stroke="{}" stroke-width="{TRACK_WIDTH}"/>"#,
            self.track_color
        );
        let sector = if self.sector_visible {
            format!(r#"<path d="{}" fill="{}"/>"#, self.path, self.color)
        } else {
            String::new()
        };

        let (lower, upper) = match self.layering {
            Layering::TrackAbove => (sector, track),
            Layering::SectorAbove => (track, sector),
        };

        format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {v} {v}" width="{v}" height="{v}">"#,
                r#"<rect width="{v}" height="{v}" fill="{bg}"/>"#,
                "{lower}{upper}",
                r#"<text x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="central" font-family="sans-serif" font-size="36" fill="{fg}">{text}</text>"#,
                "</svg>"
            ),
            v = VIEWBOX,
            bg = theme.background(),
            lower = lower,
            upper = upper,
            cx = CENTER_X,
            cy = CENTER_Y,
            fg = theme.text(),
            text = self.text,
        )
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::compose(&TimerSession::default().snapshot())
    }
}
