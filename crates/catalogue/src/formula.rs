//! Chemical formula registry: display colors and subscript formatting.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use engine_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;

const FORMULAS_RON: &str = include_str!("../assets/formulas.ron");

/// Hue step between generated palette entries (golden ratio conjugate).
const GOLDEN_RATIO: f32 = 0.618_034;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaInfo {
    pub name: String,
    pub color: String,
    pub category: String,
}

#[derive(Deserialize)]
struct FormulaFile {
    formulas: HashMap<String, FormulaInfo>,
    palette: Vec<String>,
}

/// Formula to color lookup with a generated fallback palette.
#[derive(Debug, Clone, Default)]
pub struct FormulaRegistry {
    formulas: HashMap<String, FormulaInfo>,
    generated: HashMap<String, Color>,
}

impl FormulaRegistry {
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_ron_str(FORMULAS_RON)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, CatalogueError> {
        let file: FormulaFile = ron::from_str(data).map_err(|source| CatalogueError::Parse {
            what: "formula registry",
            source,
        })?;
        for (formula, info) in &file.formulas {
            Color::from_hex(&info.color).map_err(|source| CatalogueError::BadColor {
                name: formula.clone(),
                source,
            })?;
        }
        Ok(Self {
            formulas: file.formulas,
            generated: generate_palette(&file.palette),
        })
    }

    pub fn info(&self, formula: &str) -> Option<&FormulaInfo> {
        self.formulas.get(formula)
    }

    /// Registry color, else generated palette color, else neutral gray.
    pub fn color(&self, formula: &str) -> Color {
        self.formulas
            .get(formula)
            .and_then(|info| Color::from_hex(&info.color).ok())
            .or_else(|| self.generated.get(formula).copied())
            .unwrap_or(Color::NEUTRAL_GRAY)
    }

    /// Formulas in a category, sorted.
    pub fn by_category(&self, category: &str) -> Vec<&str> {
        let mut found: Vec<&str> = self
            .formulas
            .iter()
            .filter(|(_, info)| info.category == category)
            .map(|(formula, _)| formula.as_str())
            .collect();
        found.sort_unstable();
        found
    }
}

/// Color for a formula using the built-in registry. Never fails.
pub fn formula_color(formula: &str) -> Color {
    static REGISTRY: OnceLock<FormulaRegistry> = OnceLock::new();
    REGISTRY
        .get_or_init(|| {
            FormulaRegistry::builtin().unwrap_or_else(|e| {
                log::error!("built-in formula registry is unusable: {e}");
                FormulaRegistry::default()
            })
        })
        .color(formula)
}

/// Saturation and lightness tuned to the kind of material.
fn palette_tone(formula: &str) -> (f32, f32) {
    if formula.contains("H2O") || formula.contains("N2") || formula.contains("CO") {
        // ices
        (0.65, 0.6)
    } else if formula == "H2" || formula == "He" {
        // gases
        (0.5, 0.75)
    } else if formula == "Ni" || formula.contains("Fe") {
        // metals
        (0.6, 0.45)
    } else {
        (0.7, 0.55)
    }
}

/// Spread hues around the wheel by the golden ratio, one per unique formula.
fn generate_palette(formulas: &[String]) -> HashMap<String, Color> {
    let mut seen = HashSet::new();
    formulas
        .iter()
        .filter(|f| !f.is_empty() && seen.insert(f.as_str()))
        .enumerate()
        .map(|(i, formula)| {
            let hue = (i as f32 * GOLDEN_RATIO).fract();
            let (saturation, lightness) = palette_tone(formula);
            (formula.clone(), Color::from_hsl(hue, saturation, lightness))
        })
        .collect()
}

fn subscript(digit: char) -> char {
    digit
        .to_digit(10)
        .and_then(|d| char::from_u32(0x2080 + d))
        .unwrap_or(digit)
}

/// Render digits that follow a letter as Unicode subscripts: `Fe2O3` → `Fe₂O₃`.
///
/// A decimal point inside such a run is kept (`Mg1.5` → `Mg₁.₅`); digits after
/// anything other than a letter, such as `(OH)2`, are left alone.
pub fn format_formula(formula: &str) -> String {
    let mut out = String::with_capacity(formula.len() * 2);
    let mut chars = formula.chars().peekable();
    let mut after_letter = false;

    while let Some(c) = chars.next() {
        if after_letter && c.is_ascii_digit() {
            out.push(subscript(c));
            while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                out.push(subscript(d));
                chars.next();
            }
            if chars.peek() == Some(&'.') {
                out.push('.');
                chars.next();
                while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    out.push(subscript(d));
                    chars.next();
                }
            }
            after_letter = false;
            continue;
        }
        after_letter = c.is_ascii_alphabetic();
        out.push(c);
    }
    out
}
