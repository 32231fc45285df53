use std::fmt;
use std::str::FromStr;

use crate::error::{ParseError, Result};
use crate::geometry::Rect;

/// Horizontal component of a `transform-origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalAnchor {
    /// `left` (0%)
    Left,
    /// `center` (50%)
    Center,
    /// `right` (100%)
    Right,
    /// Percentage of the box width (0-100)
    Percent(f32),
    /// Pixel offset from the left edge
    Px(f32),
}

/// Vertical component of a `transform-origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalAnchor {
    /// `top` (0%)
    Top,
    /// `center` (50%)
    Center,
    /// `bottom` (100%)
    Bottom,
    /// Percentage of the box height (0-100)
    Percent(f32),
    /// Pixel offset from the top edge
    Px(f32),
}

/// A CSS `transform-origin` value.
///
/// The corrective transforms computed for a transition assume the origin is
/// the top-left corner ([`TransformOrigin::ZERO`], written as `"0 0"`), which
/// is what gets written to animated elements when transform-origin
/// normalization is enabled. Elements can override it per element.
///
/// # Example
/// ```ignore
/// let origin: TransformOrigin = "50% 100%".parse()?;
/// FlipAttributes::participant("card").transform_origin(origin)
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOrigin {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl TransformOrigin {
    /// Top-left corner expressed in pixels (`0 0`)
    pub const ZERO: Self = Self {
        horizontal: HorizontalAnchor::Px(0.0),
        vertical: VerticalAnchor::Px(0.0),
    };

    /// Center of the box (50%, 50%), the CSS initial value
    pub const CENTER: Self = Self {
        horizontal: HorizontalAnchor::Center,
        vertical: VerticalAnchor::Center,
    };

    pub const TOP_LEFT: Self = Self {
        horizontal: HorizontalAnchor::Left,
        vertical: VerticalAnchor::Top,
    };

    pub const TOP_RIGHT: Self = Self {
        horizontal: HorizontalAnchor::Right,
        vertical: VerticalAnchor::Top,
    };

    pub const BOTTOM_LEFT: Self = Self {
        horizontal: HorizontalAnchor::Left,
        vertical: VerticalAnchor::Bottom,
    };

    pub const BOTTOM_RIGHT: Self = Self {
        horizontal: HorizontalAnchor::Right,
        vertical: VerticalAnchor::Bottom,
    };

    pub fn new(horizontal: HorizontalAnchor, vertical: VerticalAnchor) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Origin from percentages (0-100 scale)
    pub fn percent(x_percent: f32, y_percent: f32) -> Self {
        Self {
            horizontal: HorizontalAnchor::Percent(x_percent),
            vertical: VerticalAnchor::Percent(y_percent),
        }
    }

    /// Origin from pixel offsets relative to the top-left corner
    pub fn px(x: f32, y: f32) -> Self {
        Self {
            horizontal: HorizontalAnchor::Px(x),
            vertical: VerticalAnchor::Px(y),
        }
    }

    /// Resolve to absolute coordinates within the given bounds.
    pub fn resolve(&self, bounds: Rect) -> (f32, f32) {
        let x = match self.horizontal {
            HorizontalAnchor::Left => bounds.x,
            HorizontalAnchor::Center => bounds.x + bounds.width / 2.0,
            HorizontalAnchor::Right => bounds.x + bounds.width,
            HorizontalAnchor::Percent(p) => bounds.x + bounds.width * (p / 100.0),
            HorizontalAnchor::Px(px) => bounds.x + px,
        };

        let y = match self.vertical {
            VerticalAnchor::Top => bounds.y,
            VerticalAnchor::Center => bounds.y + bounds.height / 2.0,
            VerticalAnchor::Bottom => bounds.y + bounds.height,
            VerticalAnchor::Percent(p) => bounds.y + bounds.height * (p / 100.0),
            VerticalAnchor::Px(px) => bounds.y + px,
        };

        (x, y)
    }

    /// Parse a style value, falling back to the CSS initial value when it
    /// cannot be understood.
    pub fn parse_lossy(css: &str) -> Self {
        css.parse().unwrap_or_else(|err| {
            log::warn!("Ignoring transform-origin {:?}: {}", css, err);
            Self::CENTER
        })
    }
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::CENTER
    }
}

enum Token {
    Left,
    Right,
    Top,
    Bottom,
    Center,
    Percent(f32),
    Px(f32),
}

fn parse_token(token: &str) -> Result<Token> {
    let err = || ParseError::Origin(token.to_string());
    Ok(match token {
        "left" => Token::Left,
        "right" => Token::Right,
        "top" => Token::Top,
        "bottom" => Token::Bottom,
        "center" => Token::Center,
        _ => {
            if let Some(p) = token.strip_suffix('%') {
                Token::Percent(p.parse().map_err(|_| err())?)
            } else {
                let n = token.strip_suffix("px").unwrap_or(token);
                Token::Px(n.parse().map_err(|_| err())?)
            }
        }
    })
}

fn horizontal(token: &Token) -> Option<HorizontalAnchor> {
    match *token {
        Token::Left => Some(HorizontalAnchor::Left),
        Token::Right => Some(HorizontalAnchor::Right),
        Token::Center => Some(HorizontalAnchor::Center),
        Token::Percent(p) => Some(HorizontalAnchor::Percent(p)),
        Token::Px(px) => Some(HorizontalAnchor::Px(px)),
        Token::Top | Token::Bottom => None,
    }
}

fn vertical(token: &Token) -> Option<VerticalAnchor> {
    match *token {
        Token::Top => Some(VerticalAnchor::Top),
        Token::Bottom => Some(VerticalAnchor::Bottom),
        Token::Center => Some(VerticalAnchor::Center),
        Token::Percent(p) => Some(VerticalAnchor::Percent(p)),
        Token::Px(px) => Some(VerticalAnchor::Px(px)),
        Token::Left | Token::Right => None,
    }
}

impl FromStr for TransformOrigin {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens = s
            .split_whitespace()
            .map(parse_token)
            .collect::<Result<Vec<_>>>()?;
        let err = || ParseError::Origin(s.to_string());

        match tokens.as_slice() {
            [single] => {
                // A lone keyword centers the other axis
                if let Some(v @ (VerticalAnchor::Top | VerticalAnchor::Bottom)) = vertical(single)
                {
                    return Ok(Self::new(HorizontalAnchor::Center, v));
                }
                let h = horizontal(single).ok_or_else(err)?;
                Ok(Self::new(h, VerticalAnchor::Center))
            }
            // A third (z) component is accepted and ignored
            [first, second] | [first, second, _] => {
                if let (Some(h), Some(v)) = (horizontal(first), vertical(second)) {
                    return Ok(Self::new(h, v));
                }
                // Keywords may come in either order ("top left")
                match (vertical(first), horizontal(second)) {
                    (Some(v), Some(h)) => Ok(Self::new(h, v)),
                    _ => Err(err()),
                }
            }
            _ => Err(err()),
        }
    }
}

fn fmt_length(f: &mut fmt::Formatter<'_>, px: f32) -> fmt::Result {
    if px == 0.0 {
        write!(f, "0")
    } else {
        write!(f, "{}px", px)
    }
}

impl fmt::Display for TransformOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.horizontal {
            HorizontalAnchor::Left => write!(f, "left")?,
            HorizontalAnchor::Center => write!(f, "center")?,
            HorizontalAnchor::Right => write!(f, "right")?,
            HorizontalAnchor::Percent(p) => write!(f, "{}%", p)?,
            HorizontalAnchor::Px(px) => fmt_length(f, px)?,
        }
        write!(f, " ")?;
        match self.vertical {
            VerticalAnchor::Top => write!(f, "top"),
            VerticalAnchor::Center => write!(f, "center"),
            VerticalAnchor::Bottom => write!(f, "bottom"),
            VerticalAnchor::Percent(p) => write!(f, "{}%", p),
            VerticalAnchor::Px(px) => fmt_length(f, px),
        }
    }
}
