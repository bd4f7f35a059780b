//! Graph rendering: rows into a node-link structure.
//!
//! For each row the renderer emits the primary node, then one node and one
//! link per entry of the row's secondary collection:
//!
//! | Primary | Column | Secondary column | Secondary kind |
//! |---------|--------|------------------|----------------|
//! | movie | `movie` | `actors` | person |
//! | person | `person` | `actedIn` | movie |
//!
//! Rows without the secondary column (list queries) yield primary nodes only.
//!
//! Properties stripped before emission: `version` always, `runtime` from
//! movie nodes, and `role` from the movie nodes of person rows. Links point
//! from the secondary id (`source`) to the primary id (`target`).
//!
//! Nodes are emitted once per appearance: an entity reached from two rows
//! shows up twice with the same id. Set [`PresentationOptions::dedupe_graph_nodes`]
//! to keep only the first appearance (and drop repeated links).

use crate::config::PresentationOptions;
use crate::models::{
    GraphData, GraphLink, GraphNode, NodeLabel, Properties, RgbColor, Row, node_properties,
    normalize_integer,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;

/// Keys owned by the presentation layer; node properties never override them.
const RESERVED_KEYS: &[&str] = &["label", "symbolType", "color"];

/// Source of the per-render color.
pub trait ColorPicker: Send + Sync {
    /// Picks the color for one render call.
    fn pick(&self) -> RgbColor;
}

/// Picks channels in `0..255` from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColors;

impl ColorPicker for RandomColors {
    fn pick(&self) -> RgbColor {
        let mut rng = rand::rng();
        RgbColor::new(
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(0..255),
        )
    }
}

/// Deterministic colors from a seeded generator.
#[derive(Debug)]
pub struct SeededColors {
    rng: Mutex<StdRng>,
}

impl SeededColors {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ColorPicker for SeededColors {
    fn pick(&self) -> RgbColor {
        let Ok(mut rng) = self.rng.lock() else {
            return RandomColors.pick();
        };
        RgbColor::new(
            rng.random_range(0..255),
            rng.random_range(0..255),
            rng.random_range(0..255),
        )
    }
}

/// Always the same color.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedColor(pub RgbColor);

impl ColorPicker for FixedColor {
    fn pick(&self) -> RgbColor {
        self.0
    }
}

/// Flattens rows into nodes and links.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphRenderer {
    dedupe_nodes: bool,
    drop_placeholders: bool,
}

impl GraphRenderer {
    /// Creates a renderer from presentation options.
    #[must_use]
    pub const fn new(options: &PresentationOptions) -> Self {
        Self {
            dedupe_nodes: options.dedupe_graph_nodes,
            drop_placeholders: options.drop_placeholders,
        }
    }

    /// Renders rows whose primary entity is `primary`, painting every node `color`.
    #[must_use]
    pub fn render(&self, rows: &[Row], primary: NodeLabel, color: RgbColor) -> GraphData {
        let (primary_column, secondary_column, secondary) = match primary {
            NodeLabel::Movie => ("movie", "actors", NodeLabel::Person),
            NodeLabel::Person => ("person", "actedIn", NodeLabel::Movie),
        };

        let mut graph = GraphData::default();
        let mut seen_nodes: HashSet<(NodeLabel, String)> = HashSet::new();
        let mut seen_links: HashSet<(String, String)> = HashSet::new();

        for row in rows {
            let Some(properties) = row.node(primary_column) else {
                tracing::debug!(column = primary_column, "Skipping row without primary node");
                continue;
            };
            let node = self.node(properties, primary, primary, color);
            let target = node.id().clone();
            self.push_node(&mut graph, &mut seen_nodes, node);

            for entry in row.list(secondary_column) {
                let Some(properties) = entry.as_object() else {
                    continue;
                };
                if self.drop_placeholders && properties.values().all(Value::is_null) {
                    continue;
                }
                let node = self.node(properties, secondary, primary, color);
                let source = node.id().clone();
                self.push_node(&mut graph, &mut seen_nodes, node);

                if !self.dedupe_nodes
                    || seen_links.insert((source.to_string(), target.to_string()))
                {
                    graph.links.push(GraphLink {
                        source,
                        target: target.clone(),
                    });
                }
            }
        }

        graph
    }

    fn node(
        &self,
        properties: &Properties,
        label: NodeLabel,
        primary: NodeLabel,
        color: RgbColor,
    ) -> GraphNode {
        let mut properties = node_properties(&Value::Object(properties.clone()))
            .cloned()
            .unwrap_or_default();

        properties.remove("version");
        if label == NodeLabel::Movie {
            properties.remove("runtime");
            if primary == NodeLabel::Person {
                properties.remove("role");
            }
        }
        for key in RESERVED_KEYS {
            properties.remove(*key);
        }
        if let Some(id) = properties.get("id").and_then(normalize_integer) {
            properties.insert("id".to_string(), Value::from(id));
        }

        GraphNode {
            properties,
            label,
            symbol_type: label.symbol(),
            color,
        }
    }

    fn push_node(
        &self,
        graph: &mut GraphData,
        seen: &mut HashSet<(NodeLabel, String)>,
        node: GraphNode,
    ) {
        if self.dedupe_nodes {
            let id = node.id();
            if !id.is_null() && !seen.insert((node.label, id.to_string())) {
                return;
            }
        }
        graph.nodes.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RED: RgbColor = RgbColor::new(200, 10, 10);

    fn person_row(id: i64, name: &str, movie_id: i64, title: &str) -> Row {
        Row::new()
            .with("person", json!({"id": id, "name": name, "version": 4}))
            .with(
                "actedIn",
                json!([{"name": title, "id": movie_id, "imageUrl": null, "role": "Self"}]),
            )
    }

    #[test]
    fn test_two_rows_one_relation_each() {
        let rows = vec![
            person_row(1, "Keanu Reeves", 603, "The Matrix"),
            person_row(2, "Carrie-Anne Moss", 604, "Memento"),
        ];
        let graph = GraphRenderer::default().render(&rows, NodeLabel::Person, RED);

        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.links.len(), 2);
        let primaries = graph.nodes.iter().filter(|n| n.label == NodeLabel::Person).count();
        assert_eq!(primaries, 2);
        assert!(graph.nodes.iter().all(|n| n.color == RED));
    }

    #[test]
    fn test_links_use_entity_ids() {
        let graph = GraphRenderer::default().render(
            &[person_row(1, "Keanu Reeves", 603, "The Matrix")],
            NodeLabel::Person,
            RED,
        );
        assert_eq!(
            graph.links,
            vec![GraphLink {
                source: json!(603),
                target: json!(1)
            }]
        );
    }

    #[test]
    fn test_volatile_properties_stripped() {
        let graph = GraphRenderer::default().render(
            &[person_row(1, "Keanu Reeves", 603, "The Matrix")],
            NodeLabel::Person,
            RED,
        );
        let person = &graph.nodes[0];
        assert!(!person.properties.contains_key("version"));
        assert_eq!(person.symbol_type, crate::models::SymbolType::Star);

        let movie = &graph.nodes[1];
        assert!(!movie.properties.contains_key("role"));
        assert_eq!(movie.label, NodeLabel::Movie);
        assert_eq!(movie.symbol_type, crate::models::SymbolType::Circle);
    }

    #[test]
    fn test_movie_rows_render_actors() {
        let row = Row::new()
            .with(
                "movie",
                json!({"id": 603, "title": "The Matrix", "runtime": 136, "version": 1, "color": "blue"}),
            )
            .with(
                "actors",
                json!([{"name": "Keanu Reeves", "id": 6384, "profileImageUrl": null, "role": "Neo"}]),
            );
        let graph = GraphRenderer::default().render(&[row], NodeLabel::Movie, RED);

        let movie = &graph.nodes[0];
        assert_eq!(movie.label, NodeLabel::Movie);
        assert!(!movie.properties.contains_key("runtime"));
        assert!(!movie.properties.contains_key("version"));
        assert!(!movie.properties.contains_key("color"));

        let actor = &graph.nodes[1];
        assert_eq!(actor.label, NodeLabel::Person);
        assert_eq!(actor.properties.get("role"), Some(&json!("Neo")));
        assert_eq!(graph.links[0].source, json!(6384));
        assert_eq!(graph.links[0].target, json!(603));
    }

    #[test]
    fn test_duplicates_kept_by_default() {
        let rows = vec![
            person_row(1, "Keanu Reeves", 603, "The Matrix"),
            person_row(2, "Carrie-Anne Moss", 603, "The Matrix"),
        ];
        let graph = GraphRenderer::default().render(&rows, NodeLabel::Person, RED);
        let matrix_nodes = graph.nodes.iter().filter(|n| n.id() == &json!(603)).count();
        assert_eq!(matrix_nodes, 2);
    }

    #[test]
    fn test_dedupe_option() {
        let rows = vec![
            person_row(1, "Keanu Reeves", 603, "The Matrix"),
            person_row(2, "Carrie-Anne Moss", 603, "The Matrix"),
            person_row(1, "Keanu Reeves", 603, "The Matrix"),
        ];
        let options = PresentationOptions {
            dedupe_graph_nodes: true,
            ..PresentationOptions::default()
        };
        let graph = GraphRenderer::new(&options).render(&rows, NodeLabel::Person, RED);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.links.len(), 2);
    }

    #[test]
    fn test_list_rows_render_primary_only() {
        let rows = vec![
            Row::new().with("person", json!({"id": 1, "name": "Keanu Reeves"})),
            Row::new().with("person", json!({"id": "2", "name": "Laurence Fishburne"})),
        ];
        let graph = GraphRenderer::default().render(&rows, NodeLabel::Person, RED);
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.links.is_empty());
        assert_eq!(graph.nodes[1].id(), &json!(2));
    }

    #[test]
    fn test_placeholder_secondaries() {
        let row = Row::new()
            .with("person", json!({"id": 1, "name": "Nobody"}))
            .with("actedIn", json!([{"name": null, "id": null, "imageUrl": null, "role": null}]));

        let graph = GraphRenderer::default().render(&[row.clone()], NodeLabel::Person, RED);
        assert_eq!(graph.nodes.len(), 2);

        let options = PresentationOptions {
            drop_placeholders: true,
            ..PresentationOptions::default()
        };
        let graph = GraphRenderer::new(&options).render(&[row], NodeLabel::Person, RED);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.links.is_empty());
    }

    #[test]
    fn test_seeded_colors_are_deterministic() {
        let a = SeededColors::new(42);
        let b = SeededColors::new(42);
        assert_eq!(a.pick(), b.pick());
        assert_eq!(FixedColor(RED).pick(), RED);
    }

    #[test]
    fn test_random_channels_below_255() {
        for _ in 0..64 {
            let color = RandomColors.pick();
            assert!(color.r < 255 && color.g < 255 && color.b < 255);
        }
    }
}
