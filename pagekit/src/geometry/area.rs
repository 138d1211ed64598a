//! Crop area resolution.
//!
//! An [`AreaSpec`] describes a crop either as insets from the page's
//! presented edges or as a literal rectangle in the presented frame.
//! [`AreaSpec::resolve`] turns it into a rectangle in the page's storage
//! frame, the only frame a document store understands.

use serde::{Deserialize, Serialize};

use crate::error::{PageKitError, Result};
use crate::geometry::{Angle, Rect};

/// Smallest accepted scale factor.
pub const MIN_SCALE: f64 = 0.01;
/// Largest accepted scale factor.
pub const MAX_SCALE: f64 = 100.0;

/// Adjustment applied to one edge of a page box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Inset {
    /// Move the edge inwards by this many points (outwards when negative).
    Points(f64),
    /// Scale the extent measured from the opposite edge by this factor.
    Scale(f64),
    /// Leave the edge where it is.
    #[default]
    Passthrough,
}

/// Crop region for a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaSpec {
    /// Per-edge insets relative to the presented page.
    Insets {
        /// Presented top edge.
        #[serde(default)]
        top: Inset,
        /// Presented left edge.
        #[serde(default)]
        leading: Inset,
        /// Presented bottom edge.
        #[serde(default)]
        bottom: Inset,
        /// Presented right edge.
        #[serde(default)]
        trailing: Inset,
    },
    /// Literal rectangle in the presented frame, whose origin is the
    /// lower-left corner of the source box.
    Rect(Rect),
}

/// Which box a crop is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropMode {
    /// Start from the page's current crop box, or its media box if it has none.
    #[default]
    Relative,
    /// Always start from the full media box.
    Absolute,
}

/// Storage-frame edges, in the order quarter turns cycle through them.
#[derive(Debug, Clone, Copy)]
enum Edge {
    Top,
    Leading,
    Bottom,
    Trailing,
}

const EDGES: [Edge; 4] = [Edge::Top, Edge::Leading, Edge::Bottom, Edge::Trailing];

impl AreaSpec {
    /// Insets applied uniformly to every edge.
    pub fn uniform(inset: Inset) -> Self {
        Self::Insets {
            top: inset,
            leading: inset,
            bottom: inset,
            trailing: inset,
        }
    }

    /// Resolve against `source` (storage frame) for a page presented with `rotation`.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::InvalidArea`] when the result has no area.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::geometry::{Angle, AreaSpec, Inset, Rect};
    ///
    /// let media = Rect::new(0.0, 0.0, 600.0, 800.0);
    /// let area = AreaSpec::uniform(Inset::Points(50.0));
    /// let crop = area.resolve(media, Angle::Deg0).unwrap();
    /// assert_eq!(crop, Rect::new(50.0, 50.0, 500.0, 700.0));
    /// ```
    pub fn resolve(&self, source: Rect, rotation: Angle) -> Result<Rect> {
        let resolved = match *self {
            Self::Insets {
                top,
                leading,
                bottom,
                trailing,
            } => {
                let presented = [top, leading, bottom, trailing];
                let turns = rotation.quarter_turns();
                EDGES
                    .iter()
                    .enumerate()
                    .fold(source, |rect, (slot, edge)| {
                        apply_inset(rect, *edge, presented[(slot + 4 - turns) % 4])
                    })
            }
            Self::Rect(rect) => presented_to_storage(rect, source, rotation),
        };

        if resolved.is_empty() {
            return Err(PageKitError::invalid_area(format!(
                "{resolved:?} has no area (source box {source:?}, rotation {rotation})"
            )));
        }
        Ok(resolved)
    }
}

fn apply_inset(mut rect: Rect, edge: Edge, inset: Inset) -> Rect {
    match inset {
        Inset::Passthrough => {}
        Inset::Points(points) => match edge {
            Edge::Top => rect.height -= points,
            Edge::Bottom => {
                rect.y += points;
                rect.height -= points;
            }
            Edge::Leading => {
                rect.x += points;
                rect.width -= points;
            }
            Edge::Trailing => rect.width -= points,
        },
        Inset::Scale(factor) => {
            let factor = factor.clamp(MIN_SCALE, MAX_SCALE);
            match edge {
                Edge::Top => rect.height *= factor,
                Edge::Bottom => {
                    let height = rect.height * factor;
                    rect.y += rect.height - height;
                    rect.height = height;
                }
                Edge::Leading => {
                    let width = rect.width * factor;
                    rect.x += rect.width - width;
                    rect.width = width;
                }
                Edge::Trailing => rect.width *= factor,
            }
        }
    }
    rect
}

/// Map a rectangle from the presented frame back into the storage frame.
///
/// Both frames share the lower-left corner of `source`; the steps run on
/// coordinates relative to that corner.
fn presented_to_storage(rect: Rect, source: Rect, rotation: Angle) -> Rect {
    let extent = Rect::new(0.0, 0.0, source.width, source.height);
    let mut area = if rotation.is_sideways() {
        extent.transposed()
    } else {
        extent
    };
    let steps = (4 - rotation.quarter_turns()) % 4;

    let mut rect = Rect {
        x: rect.x - source.x,
        y: rect.y - source.y,
        ..rect
    };
    for _ in 0..steps {
        rect = quarter_step(area, rect);
        area = quarter_step(area, area);
    }
    Rect {
        x: rect.x + source.x,
        y: rect.y + source.y,
        ..rect
    }
}

/// One clockwise quarter turn of `rect` inside `area`.
fn quarter_step(area: Rect, rect: Rect) -> Rect {
    Rect {
        x: rect.y,
        y: area.y + area.width - rect.width - (rect.x - area.x),
        width: rect.height,
        height: rect.width,
    }
}
