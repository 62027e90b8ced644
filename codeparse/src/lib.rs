//! Tokenizer for the parameter-declaration mini-language shown in the
//! code editor.
//!
//! The buffer is free-form user text; a declaration is a line of the form
//! `identifier: value`. Extraction never fails: anything unresolvable
//! falls back to the caller-supplied default, so arbitrary edits degrade
//! to a failed goal check instead of an error. The first textual
//! occurrence of an identifier wins; later re-declarations are ignored.

use {
    bevy::{
        color::{palettes::css, Color},
        math::Vec3,
    },
    std::collections::HashMap,
};

/// Parsed view of a code buffer: identifier to raw value text, first
/// declaration wins. Lookups are case-insensitive.
#[derive(Debug, Default, Clone)]
pub struct Declarations {
    values: HashMap<String, String>,
}

impl Declarations {
    /// Scans the buffer line by line for `identifier: value` declarations.
    pub fn parse(source: &str) -> Self {
        let mut values = HashMap::new();

        for line in source.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let Some((ident, value)) = line.split_once(':') else {
                continue;
            };
            let ident = ident.trim();
            if !is_identifier(ident) {
                continue;
            }
            values
                .entry(ident.to_ascii_lowercase())
                .or_insert_with(|| value.trim().to_string());
        }

        Self { values }
    }

    fn raw(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// First numeric literal following the declaration marker. A vector
    /// literal like `position: [2, 0, 0]` therefore yields its first
    /// component.
    pub fn float(&self, name: &str, default: f32) -> f32 {
        self.raw(name)
            .and_then(|value| numeric_literals(value).first().copied())
            .unwrap_or(default)
    }

    /// Non-negative integer count declaration.
    pub fn count(&self, name: &str, default: u32) -> u32 {
        self.raw(name)
            .and_then(|value| numeric_literals(value).first().copied())
            .map(|value| value.max(0.0) as u32)
            .unwrap_or(default)
    }

    /// Bare identifier token of the declared value, lowercased, with any
    /// leading `.` stripped (`color: .yellow` yields `yellow`).
    pub fn ident(&self, name: &str) -> Option<String> {
        let raw = self.raw(name)?;
        let token: String = raw
            .trim_start_matches('.')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        (!token.is_empty()).then(|| token.to_ascii_lowercase())
    }

    /// Named color resolved through the palette table. Missing
    /// declarations and unknown names both resolve to `default`.
    pub fn color(&self, name: &str, default: NamedColor) -> NamedColor {
        self.ident(name)
            .and_then(|token| palette_lookup(&token))
            .unwrap_or(default)
    }

    /// Directional force vector. Only the depth component is kept; X and
    /// Y are forced to zero. Declarations with fewer than three
    /// components resolve to `default`.
    pub fn force(&self, name: &str, default: Vec3) -> Vec3 {
        match self.raw(name).map(numeric_literals) {
            Some(components) if components.len() >= 3 => Vec3::new(0.0, 0.0, components[2]),
            _ => default,
        }
    }

}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Collects every numeric literal in the value text, in order.
fn numeric_literals(text: &str) -> Vec<f32> {
    let mut literals = Vec::new();
    let mut token = String::new();

    let mut flush = |token: &mut String| {
        if let Ok(value) = token.parse::<f32>() {
            literals.push(value);
        }
        token.clear();
    };

    for c in text.chars() {
        let starts_number = token.is_empty() && (c == '-' || c == '+');
        if c.is_ascii_digit() || c == '.' || starts_number {
            token.push(c);
        } else if !token.is_empty() {
            flush(&mut token);
        }
    }
    if !token.is_empty() {
        flush(&mut token);
    }

    literals
}

// --- Color table ---

/// A palette entry: the canonical name the evaluator compares against,
/// and the concrete color the rendering layer applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Color,
}

/// Fallback for unknown color identifiers.
pub const FALLBACK_COLOR: NamedColor = NamedColor {
    name: "gray",
    color: Color::Srgba(css::GRAY),
};

const PALETTE: &[NamedColor] = &[
    NamedColor { name: "red", color: Color::Srgba(css::RED) },
    NamedColor { name: "orange", color: Color::Srgba(css::ORANGE) },
    NamedColor { name: "yellow", color: Color::Srgba(css::YELLOW) },
    NamedColor { name: "green", color: Color::Srgba(css::GREEN) },
    NamedColor { name: "blue", color: Color::Srgba(css::BLUE) },
    NamedColor { name: "purple", color: Color::Srgba(css::PURPLE) },
    NamedColor { name: "white", color: Color::Srgba(css::WHITE) },
    NamedColor { name: "black", color: Color::Srgba(css::BLACK) },
    NamedColor { name: "gray", color: Color::Srgba(css::GRAY) },
    NamedColor { name: "brown", color: Color::Srgba(css::BROWN) },
    NamedColor { name: "pink", color: Color::Srgba(css::PINK) },
    NamedColor { name: "gold", color: Color::Srgba(css::GOLD) },
];

/// Resolves a color identifier token (leading `.` tolerated) to its
/// palette entry.
pub fn palette_lookup(token: &str) -> Option<NamedColor> {
    let token = token.strip_prefix('.').unwrap_or(token);
    PALETTE
        .iter()
        .copied()
        .find(|entry| entry.name.eq_ignore_ascii_case(token))
}
