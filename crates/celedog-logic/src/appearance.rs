//! Appearance plan: the sprite layer stack a dog's genes describe.
//!
//! Pure data: shapes are given in fractions of the sprite's edge length with
//! the origin at the top-left corner, so a renderer multiplies by its pixel
//! size and draws the layers in order. Nothing here touches a texture.

use serde::Serialize;

use crate::catalog::{BodyType, EarType, MarkingPattern, TailType};
use crate::dog::DogId;
use crate::genes::{Color, GeneSet};

/// Influence above which the celebrity badge is drawn.
pub const BADGE_INFLUENCE_THRESHOLD: f64 = 0.7;
pub const MARKING_ALPHA: f64 = 0.7;
pub const BADGE_FILL: Color = Color::new(0xFF, 0xD7, 0x00);
pub const BADGE_OUTLINE: Color = Color::new(0xFF, 0xFF, 0xFF);
/// Outline width in pixels; not scaled with the sprite.
pub const BADGE_OUTLINE_WIDTH: f64 = 2.0;
pub const DEFAULT_SPRITE_SIZE: f64 = 100.0;

const CENTER: f64 = 0.5;
const BADGE_RADIUS: f64 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LayerKind {
    Body,
    Ears,
    Tail,
    Markings,
    CelebrityBadge,
}

/// One filled primitive. Ellipses take full width and height, rects their
/// top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "camelCase")]
pub enum Shape {
    Circle { cx: f64, cy: f64, r: f64 },
    Ellipse { cx: f64, cy: f64, w: f64, h: f64 },
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Polygon { points: Vec<(f64, f64)> },
}

impl Shape {
    /// The same shape at `size` pixels per edge.
    pub fn scaled(&self, size: f64) -> Shape {
        match self {
            Shape::Circle { cx, cy, r } => Shape::Circle {
                cx: cx * size,
                cy: cy * size,
                r: r * size,
            },
            Shape::Ellipse { cx, cy, w, h } => Shape::Ellipse {
                cx: cx * size,
                cy: cy * size,
                w: w * size,
                h: h * size,
            },
            Shape::Rect { x, y, w, h } => Shape::Rect {
                x: x * size,
                y: y * size,
                w: w * size,
                h: h * size,
            },
            Shape::Polygon { points } => Shape::Polygon {
                points: points.iter().map(|(x, y)| (x * size, y * size)).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteLayer {
    pub kind: LayerKind,
    /// The gene token that picked the shapes (`"athletic"`, `"spotted"`, ...).
    pub token: String,
    pub fill: Color,
    pub alpha: f64,
    pub outline: Option<Color>,
    pub shapes: Vec<Shape>,
}

impl SpriteLayer {
    fn opaque(kind: LayerKind, token: &str, fill: Color, shapes: Vec<Shape>) -> Self {
        Self {
            kind,
            token: token.to_string(),
            fill,
            alpha: 1.0,
            outline: None,
            shapes,
        }
    }
}

/// Cache key a renderer stores the composed texture under.
pub fn texture_key(id: &DogId) -> String {
    format!("dog_{}", id)
}

/// Layers in draw order: body, ears, tail, markings, badge. Markings are
/// omitted for solid coats and the badge below the influence threshold.
pub fn compose_layers(genes: &GeneSet) -> Vec<SpriteLayer> {
    let coat = genes.coat_color;
    let mut layers = vec![
        SpriteLayer::opaque(
            LayerKind::Body,
            genes.body_type.as_str(),
            coat,
            vec![body_shape(genes.body_type)],
        ),
        SpriteLayer::opaque(
            LayerKind::Ears,
            genes.ear_type.as_str(),
            coat,
            ear_shapes(genes.ear_type),
        ),
        SpriteLayer::opaque(
            LayerKind::Tail,
            genes.tail_type.as_str(),
            coat,
            vec![tail_shape(genes.tail_type)],
        ),
    ];

    let markings = marking_shapes(genes.marking_pattern);
    if !markings.is_empty() {
        layers.push(SpriteLayer {
            kind: LayerKind::Markings,
            token: genes.marking_pattern.as_str().to_string(),
            fill: genes.marking_color,
            alpha: MARKING_ALPHA,
            outline: None,
            shapes: markings,
        });
    }

    if genes.celebrity_influence > BADGE_INFLUENCE_THRESHOLD {
        layers.push(SpriteLayer {
            kind: LayerKind::CelebrityBadge,
            token: genes.celebrity_head_id.clone(),
            fill: BADGE_FILL,
            alpha: 1.0,
            outline: Some(BADGE_OUTLINE),
            shapes: vec![badge_star()],
        });
    }

    layers
}

// ── Shape tables ────────────────────────────────────────────────────────

fn body_shape(body: BodyType) -> Shape {
    let ellipse = |w, h| Shape::Ellipse {
        cx: CENTER,
        cy: CENTER,
        w,
        h,
    };
    let circle = |r| Shape::Circle {
        cx: CENTER,
        cy: CENTER,
        r,
    };
    match body {
        BodyType::Athletic => ellipse(0.5, 0.6),
        BodyType::Slim => ellipse(0.4, 0.65),
        BodyType::Stocky => ellipse(0.6, 0.55),
        BodyType::Fluffy => circle(0.35),
        BodyType::Tiny => circle(0.3),
    }
}

/// Left ear first; the right is its mirror.
fn ear_shapes(ears: EarType) -> Vec<Shape> {
    let pair = |dx: f64, dy: f64, make: &dyn Fn(f64, f64) -> Shape| {
        vec![make(CENTER - dx, CENTER + dy), make(CENTER + dx, CENTER + dy)]
    };
    match ears {
        EarType::Pointed => {
            let tri = |sign: f64| Shape::Polygon {
                points: vec![
                    (CENTER + sign * 0.25, CENTER - 0.3),
                    (CENTER + sign * 0.35, CENTER - 0.5),
                    (CENTER + sign * 0.15, CENTER - 0.35),
                ],
            };
            vec![tri(-1.0), tri(1.0)]
        }
        EarType::Floppy => pair(0.28, -0.1, &|cx, cy| Shape::Ellipse {
            cx,
            cy,
            w: 0.15,
            h: 0.25,
        }),
        EarType::Large => pair(0.3, -0.25, &|cx, cy| Shape::Circle { cx, cy, r: 0.15 }),
        EarType::Small => pair(0.25, -0.3, &|cx, cy| Shape::Circle { cx, cy, r: 0.08 }),
    }
}

fn tail_shape(tail: TailType) -> Shape {
    match tail {
        TailType::Straight => Shape::Rect {
            x: CENTER - 0.35,
            y: CENTER + 0.15,
            w: 0.1,
            h: 0.3,
        },
        TailType::Curly => Shape::Circle {
            cx: CENTER - 0.35,
            cy: CENTER + 0.2,
            r: 0.12,
        },
        TailType::Bushy => Shape::Rect {
            x: CENTER - 0.4,
            y: CENTER + 0.1,
            w: 0.15,
            h: 0.35,
        },
        TailType::Short => Shape::Rect {
            x: CENTER - 0.35,
            y: CENTER + 0.2,
            w: 0.08,
            h: 0.15,
        },
    }
}

fn marking_shapes(pattern: MarkingPattern) -> Vec<Shape> {
    match pattern {
        MarkingPattern::Solid => Vec::new(),
        MarkingPattern::Spotted => vec![
            Shape::Circle {
                cx: CENTER + 0.1,
                cy: CENTER - 0.1,
                r: 0.08,
            },
            Shape::Circle {
                cx: CENTER - 0.15,
                cy: CENTER + 0.05,
                r: 0.06,
            },
            Shape::Circle {
                cx: CENTER + 0.05,
                cy: CENTER + 0.15,
                r: 0.07,
            },
        ],
        MarkingPattern::Striped => [-0.15, 0.05]
            .into_iter()
            .map(|dy| Shape::Rect {
                x: CENTER - 0.25,
                y: CENTER + dy,
                w: 0.5,
                h: 0.08,
            })
            .collect(),
        MarkingPattern::Patched => vec![Shape::Ellipse {
            cx: CENTER + 0.15,
            cy: CENTER,
            w: 0.2,
            h: 0.3,
        }],
    }
}

/// Five-point star above the head, stepping 144° per vertex with the
/// radius alternating between full and half.
fn badge_star() -> Shape {
    let (sx, sy) = (CENTER, CENTER - 0.4);
    let points = (0..5)
        .map(|i| {
            let angle = (i as f64 * 4.0 * std::f64::consts::PI) / 5.0 - std::f64::consts::FRAC_PI_2;
            let radius = if i % 2 == 0 {
                BADGE_RADIUS
            } else {
                BADGE_RADIUS * 0.5
            };
            (sx + angle.cos() * radius, sy + angle.sin() * radius)
        })
        .collect();
    Shape::Polygon { points }
}
