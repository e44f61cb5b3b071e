//! Material composition of bodies, layer by layer.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;

const COMPOSITIONS_RON: &str = include_str!("../assets/compositions.ron");

/// Percentages in one layer may overshoot 100 by this much (rounding in the sources).
const PERCENT_TOLERANCE: f64 = 0.1;

/// A material shell of a body, outermost first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    #[default]
    Surface,
    Mantle,
    Intermediate,
    Core,
}

impl Layer {
    /// Glyph shown in the layer indicator.
    pub fn symbol(self) -> &'static str {
        match self {
            Layer::Surface => "⬤",
            Layer::Mantle => "⨀",
            Layer::Intermediate => "⦾",
            Layer::Core => "⦿",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Layer::Surface => "Surface",
            Layer::Mantle => "Mantle",
            Layer::Intermediate => "Intermediate",
            Layer::Core => "Core",
        }
    }

    /// Indicator text, e.g. `⨀ Mantle`.
    pub fn indicator(self) -> String {
        format!("{} {}", self.symbol(), self.label())
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a layer breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    /// Human readable name.
    pub compound: String,
    pub percent: f64,
    /// Chemical formula; empty for "other" buckets.
    #[serde(default)]
    pub formula: String,
}

/// All layers of one body, in cycling order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyComposition {
    pub name: String,
    pub layers: Vec<(Layer, Vec<Compound>)>,
}

impl BodyComposition {
    pub fn layer(&self, layer: Layer) -> Option<&[Compound]> {
        self.layers
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, compounds)| compounds.as_slice())
    }

    pub fn available_layers(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().map(|(l, _)| *l)
    }

    /// The layer after `current`, wrapping. A layer the body lacks cycles to the first one.
    pub fn next_layer(&self, current: Layer) -> Layer {
        let n = self.layers.len();
        if n == 0 {
            return current;
        }
        let next = self
            .layers
            .iter()
            .position(|(l, _)| *l == current)
            .map_or(0, |i| (i + 1) % n);
        self.layers[next].0
    }

    fn validate(&self) -> Result<(), CatalogueError> {
        for (layer, compounds) in &self.layers {
            let out_of_range = |detail: String| CatalogueError::PercentOutOfRange {
                body: self.name.clone(),
                layer: layer.label(),
                detail,
            };
            if let Some(c) = compounds
                .iter()
                .find(|c| !(0.0..=100.0).contains(&c.percent))
            {
                return Err(out_of_range(format!("{} is {}%", c.compound, c.percent)));
            }
            let total: f64 = compounds.iter().map(|c| c.percent).sum();
            if total > 100.0 + PERCENT_TOLERANCE {
                return Err(out_of_range(format!("layer totals {total}%")));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct CompositionFile {
    bodies: Vec<BodyComposition>,
}

/// Compositions indexed by body name.
#[derive(Debug, Clone, Default)]
pub struct CompositionTable {
    bodies: HashMap<String, BodyComposition>,
}

impl CompositionTable {
    /// The built-in table.
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_ron_str(COMPOSITIONS_RON)
    }

    pub fn from_ron_str(data: &str) -> Result<Self, CatalogueError> {
        let file: CompositionFile = ron::from_str(data).map_err(|source| CatalogueError::Parse {
            what: "composition table",
            source,
        })?;
        let mut bodies = HashMap::with_capacity(file.bodies.len());
        for body in file.bodies {
            body.validate()?;
            if bodies.contains_key(&body.name) {
                return Err(CatalogueError::DuplicateName(body.name));
            }
            bodies.insert(body.name.clone(), body);
        }
        log::debug!("loaded compositions for {} bodies", bodies.len());
        Ok(Self { bodies })
    }

    pub fn get(&self, body: &str) -> Option<&BodyComposition> {
        self.bodies.get(body)
    }

    pub fn contains(&self, body: &str) -> bool {
        self.bodies.contains_key(body)
    }

    /// A layer's compounds; `None` when the body or layer is unknown or empty.
    pub fn layer(&self, body: &str, layer: Layer) -> Option<&[Compound]> {
        self.get(body)
            .and_then(|c| c.layer(layer))
            .filter(|compounds| !compounds.is_empty())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_sol() {
        let table = CompositionTable::builtin().unwrap();
        let sol = crate::StarSystem::sol().unwrap();
        for (body, _) in sol.bodies() {
            assert!(table.contains(&body.name), "no composition for {}", body.name);
        }
    }

    #[test]
    fn layer_lookup_and_misses() {
        let table = CompositionTable::builtin().unwrap();
        let surface = table.layer("Mercury", Layer::Surface).unwrap();
        assert_eq!(surface[0].formula, "SiO2");
        assert_eq!(surface[0].percent, 40.0);
        assert!(table.layer("Mercury", Layer::Intermediate).is_none());
        assert!(table.layer("Vulcan", Layer::Surface).is_none());
    }

    #[test]
    fn layers_cycle_in_table_order() {
        let table = CompositionTable::builtin().unwrap();
        let jupiter = table.get("Jupiter").unwrap();
        assert_eq!(jupiter.next_layer(Layer::Surface), Layer::Intermediate);
        assert_eq!(jupiter.next_layer(Layer::Intermediate), Layer::Core);
        assert_eq!(jupiter.next_layer(Layer::Core), Layer::Surface);
        // Jupiter has no mantle entry: restart from the first layer.
        assert_eq!(jupiter.next_layer(Layer::Mantle), Layer::Surface);

        let rhea = table.get("Rhea").unwrap();
        assert_eq!(rhea.available_layers().collect::<Vec<_>>(), vec![Layer::Surface, Layer::Core]);
    }

    #[test]
    fn indicator_text() {
        assert_eq!(Layer::Surface.indicator(), "⬤ Surface");
        assert_eq!(Layer::Core.indicator(), "⦿ Core");
        assert_eq!(Layer::default(), Layer::Surface);
    }

    #[test]
    fn rejects_overfull_layer() {
        let data = r#"(bodies: [(name: "Rock", layers: [(Core, [
            (compound: "Iron", percent: 80.0, formula: "Fe"),
            (compound: "Nickel", percent: 30.0, formula: "Ni"),
        ])])])"#;
        assert!(matches!(
            CompositionTable::from_ron_str(data),
            Err(CatalogueError::PercentOutOfRange { layer: "Core", .. })
        ));
    }

    #[test]
    fn rejects_negative_percent() {
        let data = r#"(bodies: [(name: "Rock", layers: [(Surface, [
            (compound: "Dust", percent: -5.0),
        ])])])"#;
        assert!(CompositionTable::from_ron_str(data).is_err());
    }
}
