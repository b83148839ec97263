use crate::types::Color;

/// Kind of primitive a scene node draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Container for other nodes. Draws nothing itself.
    Group,
    Circle,
    Rect,
    Line,
    /// Closed polygon through `Attr::Points`.
    Path,
    Text,
}

impl ShapeKind {
    pub fn is_container(self) -> bool {
        matches!(self, ShapeKind::Group)
    }
}

/// Named visual attribute of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    Cx,
    Cy,
    R,
    X,
    Y,
    X2,
    Y2,
    Width,
    Height,
    Fill,
    Stroke,
    /// Outline width in pixels. Circles draw a ring when it is positive.
    StrokeWidth,
    Opacity,
    Points,
    Label,
    /// Text anchor keyword: `start`, `middle` or `end`.
    Anchor,
}

/// Value of a visual attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Color(Color),
    Points(Vec<(f64, f64)>),
    Text(String),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_points(&self) -> Option<&[(f64, f64)]> {
        match self {
            Self::Points(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Color> for AttrValue {
    fn from(c: Color) -> Self {
        Self::Color(c)
    }
}

impl From<Vec<(f64, f64)>> for AttrValue {
    fn from(points: Vec<(f64, f64)>) -> Self {
        Self::Points(points)
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
