//! In-memory Gremlin transport.
//!
//! Understands exactly the command shapes the client emits (`g.addV`,
//! `g.V(..)` with optional `.property` clauses, `.drop()`, and `.addE`) and
//! answers with documents shaped like a Cosmos DB graph: one batch per
//! script, properties wrapped as `[{ "id", "value" }]`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};

use graphwire_core::{Collection, VertexId};
use graphwire_gremlin::{CancelSignal, GremlinQuery, GremlinTransport};

#[derive(Debug, Clone)]
struct StoredVertex {
    label: String,
    properties: Vec<(String, String, Value)>,
}

impl StoredVertex {
    fn set(&mut self, name: String, value: Value) {
        match self.properties.iter_mut().find(|(n, _, _)| *n == name) {
            Some(existing) => existing.2 = value,
            None => self.properties.push((name, VertexId::generate().0, value)),
        }
    }

    fn to_document(&self, id: &str) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, prop_id, value)| (name.clone(), json!([{ "id": prop_id, "value": value }])))
            .collect();
        json!({
            "id": id,
            "label": self.label,
            "type": "vertex",
            "properties": properties,
        })
    }
}

#[derive(Default)]
struct GraphState {
    graphs: Mutex<HashMap<String, HashMap<String, StoredVertex>>>,
    scripts: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

/// A shared in-memory graph; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryGraph {
    state: Arc<GraphState>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every script submitted so far, in order.
    pub fn scripts(&self) -> Vec<String> {
        self.state.scripts.lock().clone()
    }

    /// Make every fetch wait this long before answering.
    pub fn set_delay(&self, delay: Duration) {
        *self.state.delay.lock() = Some(delay);
    }

    pub fn vertex_count(&self, collection: &Collection) -> usize {
        self.state
            .graphs
            .lock()
            .get(&collection.link())
            .map_or(0, HashMap::len)
    }
}

impl GremlinTransport for MemoryGraph {
    type Query = MemoryQuery;

    fn create_gremlin_query(&self, collection: &Collection, script: &str) -> anyhow::Result<MemoryQuery> {
        self.state.scripts.lock().push(script.to_string());
        let command = parse(script).with_context(|| format!("Unsupported Gremlin script: {script}"))?;
        Ok(MemoryQuery {
            state: Arc::clone(&self.state),
            collection: collection.link(),
            command: Some(command),
        })
    }
}

pub struct MemoryQuery {
    state: Arc<GraphState>,
    collection: String,
    command: Option<Command>,
}

#[async_trait]
impl GremlinQuery for MemoryQuery {
    fn has_more_results(&self) -> bool {
        self.command.is_some()
    }

    async fn execute_next(&mut self, cancel: &CancelSignal) -> anyhow::Result<Vec<Value>> {
        let delay = *self.state.delay.lock();
        if let Some(delay) = delay {
            tokio::select! {
                _ = cancel.cancelled() => bail!("fetch cancelled"),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        let command = self.command.take().ok_or_else(|| anyhow!("query already consumed"))?;
        let mut graphs = self.state.graphs.lock();
        let graph = graphs.entry(self.collection.clone()).or_default();
        Ok(apply(graph, command))
    }
}

fn apply(graph: &mut HashMap<String, StoredVertex>, command: Command) -> Vec<Value> {
    match command {
        Command::AddVertex { label, properties } => {
            let id = VertexId::generate().0;
            let mut vertex = StoredVertex {
                label,
                properties: Vec::new(),
            };
            for (name, value) in properties {
                vertex.set(name, value);
            }
            let document = vertex.to_document(&id);
            graph.insert(id, vertex);
            vec![document]
        }
        Command::Select { id, properties } => match graph.get_mut(&id) {
            Some(vertex) => {
                for (name, value) in properties {
                    vertex.set(name, value);
                }
                vec![vertex.to_document(&id)]
            }
            None => Vec::new(),
        },
        Command::Drop { id } => {
            graph.remove(&id);
            Vec::new()
        }
        Command::AddEdge { source, label, target } => match (graph.get(&source), graph.get(&target)) {
            (Some(out_v), Some(in_v)) => vec![json!({
                "id": VertexId::generate().0,
                "label": label,
                "type": "edge",
                "inVLabel": in_v.label,
                "outVLabel": out_v.label,
                "inV": target,
                "outV": source,
            })],
            _ => Vec::new(),
        },
    }
}

// ── Script parsing ───────────────────────────────────────────────

#[derive(Debug)]
enum Command {
    AddVertex { label: String, properties: Vec<(String, Value)> },
    Select { id: String, properties: Vec<(String, Value)> },
    Drop { id: String },
    AddEdge { source: String, label: String, target: String },
}

fn parse(script: &str) -> anyhow::Result<Command> {
    let mut cursor = Cursor::new(script);

    if cursor.eat("g.addV(") {
        let label = cursor.quoted()?;
        cursor.expect(")")?;
        let properties = cursor.properties()?;
        return Ok(Command::AddVertex { label, properties });
    }

    cursor.expect("g.V(")?;
    let id = cursor.quoted()?;
    cursor.expect(")")?;

    if cursor.eat(".drop()") {
        cursor.end()?;
        return Ok(Command::Drop { id });
    }
    if cursor.eat(".addE(") {
        let label = cursor.quoted()?;
        cursor.expect(").to(g.V(")?;
        let target = cursor.quoted()?;
        cursor.expect("))")?;
        cursor.end()?;
        return Ok(Command::AddEdge { source: id, label, target });
    }

    let properties = cursor.properties()?;
    Ok(Command::Select { id, properties })
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(script: &'a str) -> Self {
        Self { rest: script }
    }

    fn eat(&mut self, token: &str) -> bool {
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> anyhow::Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            bail!("expected `{token}` at `{}`", self.rest)
        }
    }

    fn end(&self) -> anyhow::Result<()> {
        if self.rest.is_empty() {
            Ok(())
        } else {
            bail!("trailing input `{}`", self.rest)
        }
    }

    fn properties(&mut self) -> anyhow::Result<Vec<(String, Value)>> {
        let mut properties = Vec::new();
        while !self.rest.is_empty() {
            self.expect(".property(")?;
            let name = self.quoted()?;
            self.expect(", ")?;
            let value = self.literal()?;
            self.expect(")")?;
            properties.push((name, value));
        }
        Ok(properties)
    }

    /// A single-quoted literal with backslash escapes.
    fn quoted(&mut self) -> anyhow::Result<String> {
        let mut chars = self.rest.char_indices();
        match chars.next() {
            Some((_, '\'')) => {}
            _ => bail!("expected quoted literal at `{}`", self.rest),
        }

        let mut text = String::new();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, 'n')) => text.push('\n'),
                    Some((_, 'r')) => text.push('\r'),
                    Some((_, other)) => text.push(other),
                    None => bail!("dangling escape"),
                },
                '\'' => {
                    self.rest = &self.rest[i + 1..];
                    return Ok(text);
                }
                other => text.push(other),
            }
        }
        bail!("unterminated literal")
    }

    /// A quoted string, or a bare JSON literal up to the closing paren.
    fn literal(&mut self) -> anyhow::Result<Value> {
        if self.rest.starts_with('\'') {
            return self.quoted().map(Value::String);
        }

        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut end = None;
        for (i, c) in self.rest.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '[' => depth += 1,
                ']' => depth = depth.saturating_sub(1),
                ')' if depth == 0 => {
                    end = Some(i);
                    break;
                }
                _ => {}
            }
        }

        let end = end.ok_or_else(|| anyhow!("unterminated literal at `{}`", self.rest))?;
        let value = serde_json::from_str(&self.rest[..end])
            .with_context(|| format!("bad literal `{}`", &self.rest[..end]))?;
        self.rest = &self.rest[end..];
        Ok(value)
    }
}

#[test]
fn parses_every_emitted_shape() {
    assert!(matches!(
        parse("g.addV('user').property('balance', 185.0).property('tags', [\"a\",\"b)\"])").unwrap(),
        Command::AddVertex { ref properties, .. } if properties.len() == 2
    ));
    assert!(matches!(
        parse(r"g.V('u\'1').property('name', 'O\'Brien')").unwrap(),
        Command::Select { ref id, ref properties } if id == "u'1" && properties[0].1 == "O'Brien"
    ));
    assert!(matches!(parse("g.V('u-1')").unwrap(), Command::Select { ref properties, .. } if properties.is_empty()));
    assert!(matches!(parse("g.V('u-1').drop()").unwrap(), Command::Drop { .. }));
    assert!(matches!(
        parse("g.V('a').addE('owes').to(g.V('b'))").unwrap(),
        Command::AddEdge { ref target, .. } if target == "b"
    ));
    assert!(parse("g.E()").is_err());
}
