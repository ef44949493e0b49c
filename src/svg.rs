//! SVG snapshot of a solved flow.
//!
//! Draws the container, the padding inset, and every child box with its id
//! and size. Boxes placed by an instruction are filled; boxes that no
//! instruction touched are dashed at their corner anchor. Handy for eyeballing
//! a rule set.
//!
//! # Example
//!
//! ```
//! use boxflow::Rect;
//! use boxflow::scene::Scene;
//!
//! let mut scene = Scene::new();
//! let root = scene.add_flow(None, Rect::new(0, 0, 200, 100));
//! let button = scene.add_box(Some(root), Rect::new(0, 0, 50, 20));
//! scene.rule(root, button, "<^");
//! scene.draw(root);
//!
//! let svg = scene.render_svg(root).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

use core::fmt::Debug;

use num_traits::ToPrimitive;

use crate::flow::Flow;
use crate::geometry::{Coord, Rect};
use crate::host::Host;
use crate::scene::{NodeId, Scene};

/// Largest drawn width of the container, in SVG units.
const MAX_PANEL_W: f64 = 600.0;
/// Largest drawn height of the container, in SVG units.
const MAX_PANEL_H: f64 = 400.0;
/// Margin around the container.
const MARGIN: f64 = 20.0;
/// Height of the title line above the container.
const LABEL_H: f64 = 22.0;

/// Render the current layout of `flow` as a complete SVG document.
///
/// Child geometry is read from `host`, so call this after the flow has been
/// solved.
pub fn render_flow_svg<H>(flow: &Flow<H::Id, H::Coord>, host: &H) -> String
where
    H: Host + ?Sized,
{
    let bounds = flow.bounds();
    let (panel_w, panel_h, scale) = scale_to_fit(bounds);
    let total_w = panel_w + 2.0 * MARGIN;
    let total_h = panel_h + 2.0 * MARGIN + LABEL_H;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 10px; fill: #222; }
  .container { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .inset { fill: none; stroke: #bbb; stroke-width: 1; stroke-dasharray: 3,3; }
  .placed { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .anchored { fill: none; stroke: #aa6b2c; stroke-width: 1; stroke-dasharray: 4,2; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #eee; }
    .container { fill: #2d2d2d; stroke: #555; }
    .inset { stroke: #666; }
    .placed { fill: #3a72a4; stroke: #5a9fd4; }
    .anchored { stroke: #d49a5a; }
  }
</style>
"##);

    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label">{}</text>"#,
        MARGIN,
        MARGIN + 14.0,
        escape_xml(&format!(
            "Flow  {}×{}  padding {}  {} instructions",
            to_f64(bounds.width),
            to_f64(bounds.height),
            to_f64(flow.padding()),
            flow.instructions().len()
        ))
    ));
    svg.push('\n');

    let origin_x = MARGIN;
    let origin_y = MARGIN + LABEL_H;
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="container"/>"#,
        origin_x, origin_y, panel_w, panel_h
    ));
    svg.push('\n');

    let padding = to_f64(flow.padding()) * scale;
    if padding > 0.0 && 2.0 * padding < panel_w && 2.0 * padding < panel_h {
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inset"/>"#,
            origin_x + padding,
            origin_y + padding,
            panel_w - 2.0 * padding,
            panel_h - 2.0 * padding
        ));
        svg.push('\n');
    }

    for state in flow.states() {
        if !host.is_child(state.id) {
            continue;
        }
        let rect = host.bounds(state.id);
        let x = origin_x + (to_f64(rect.x) - to_f64(bounds.x)) * scale;
        let y = origin_y + (to_f64(rect.y) - to_f64(bounds.y)) * scale;
        let w = to_f64(rect.width) * scale;
        let h = to_f64(rect.height) * scale;
        let class = if state.placed { "placed" } else { "anchored" };

        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}"/>"#,
            x, y, w, h, class
        ));
        svg.push('\n');

        if w >= 24.0 && h >= 10.0 {
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" class="annotation">{}</text>"#,
                x + 2.0,
                y + 10.0,
                escape_xml(&label(&state.id, rect))
            ));
            svg.push('\n');
        }
    }

    svg.push_str("</svg>\n");
    svg
}

impl Scene {
    /// Render the flow at `id` as SVG. `None` when `id` has no flow.
    pub fn render_svg(&mut self, id: NodeId) -> Option<String> {
        self.with_flow(id, |flow, host| render_flow_svg(flow, &*host))
    }
}

fn label<Id: Debug, T: Coord>(id: &Id, rect: Rect<T>) -> String {
    format!("{:?} {}×{}", id, to_f64(rect.width), to_f64(rect.height))
}

/// Scale the container to fit within MAX_PANEL_W × MAX_PANEL_H, preserving
/// aspect ratio.
fn scale_to_fit<T: Coord>(bounds: Rect<T>) -> (f64, f64, f64) {
    let w = to_f64(bounds.width);
    let h = to_f64(bounds.height);
    if w <= 0.0 || h <= 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

fn to_f64<T: Coord>(v: T) -> f64 {
    v.to_f64().unwrap_or(0.0)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_like_scene() -> (Scene, NodeId) {
        let mut scene = Scene::new();
        let root = scene.add_flow(None, Rect::new(0, 0, 300, 200));
        let a = scene.add_box(Some(root), Rect::new(0, 0, 40, 20));
        let b = scene.add_box(Some(root), Rect::new(0, 0, 40, 20));
        scene.add_box(Some(root), Rect::new(0, 0, 40, 20));
        scene.rule(root, a, "<^");
        scene.rule(root, b, "^");
        scene.draw(root);
        (scene, root)
    }

    #[test]
    fn svg_is_a_document() {
        let (mut scene, root) = login_like_scene();
        let svg = scene.render_svg(root).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert!(svg.contains("Flow  300×200  padding 5  3 instructions"));
    }

    #[test]
    fn svg_marks_unplaced_boxes() {
        let (mut scene, root) = login_like_scene();
        let svg = scene.render_svg(root).unwrap();
        assert_eq!(svg.matches(r#"class="placed""#).count(), 2);
        assert_eq!(svg.matches(r#"class="anchored""#).count(), 1);
    }

    #[test]
    fn svg_labels_are_escaped() {
        let (mut scene, root) = login_like_scene();
        let svg = scene.render_svg(root).unwrap();
        assert!(svg.contains("NodeId(1) 40×20"));
        assert!(!svg.contains("<<"));
    }

    #[test]
    fn render_svg_without_flow() {
        let mut scene = Scene::new();
        let plain = scene.add_box(None, Rect::new(0, 0, 10, 10));
        assert_eq!(scene.render_svg(plain), None);
    }

    #[test]
    fn degenerate_container_still_renders() {
        let mut scene = Scene::new();
        let root = scene.add_flow(None, Rect::new(0, 0, 0, 0));
        let svg = scene.render_svg(root).unwrap();
        assert!(svg.contains(r#"class="container""#));
    }
}
