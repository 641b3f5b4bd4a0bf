//! GML reading and writing
//!
//! Output layout matches networkx `write_gml`:
//!
//! ```text
//! graph [
//!   directed 1
//!   node [
//!     id 0
//!     label "http://x.test/a"
//!   ]
//!   edge [
//!     source 0
//!     target 1
//!   ]
//! ]
//! ```
//!
//! The reader accepts any whitespace layout, `#` comments and unknown keys.

use crate::graph::WebGraph;
use crate::state::PageState;
use std::collections::HashMap;
use std::io::{self, Write};
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Errors from reading a GML graph
#[derive(Debug, Error, PartialEq)]
pub enum GraphFormatError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("edge references unknown node id {0}")]
    UnknownNode(i64),

    #[error("duplicate node id {0}")]
    DuplicateNode(i64),
}

/// Writes `graph` as GML; node ids are discovery positions
pub fn write_gml<W: Write>(graph: &WebGraph, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "graph [")?;
    writeln!(writer, "  directed 1")?;

    for (id, page) in graph.pages().enumerate() {
        writeln!(writer, "  node [")?;
        writeln!(writer, "    id {}", id)?;
        writeln!(writer, "    label \"{}\"", escape(&page.url))?;
        writeln!(writer, "  ]")?;
    }

    for (source, target) in graph.edge_indices() {
        writeln!(writer, "  edge [")?;
        writeln!(writer, "    source {}", source)?;
        writeln!(writer, "    target {}", target)?;
        writeln!(writer, "  ]")?;
    }

    writeln!(writer, "]")
}

/// Parses GML content into a `WebGraph`
///
/// Nodes keep file order. A node with at least one outgoing edge is marked
/// `Processed`; every other node stays `Discovered`. An undirected graph
/// (`directed 0`) gets both directions of each edge.
pub fn read_gml(content: &str) -> Result<WebGraph, GraphFormatError> {
    let mut parser = Parser::new(content);
    let root = parser.parse_document()?;

    let graph_items = root
        .into_iter()
        .find_map(|(key, value)| match (key.as_str(), value) {
            ("graph", Value::List(items)) => Some(items),
            _ => None,
        })
        .ok_or_else(|| syntax(parser.line, "missing top-level 'graph [ ... ]'"))?;

    let mut directed = false;
    let mut nodes: Vec<(i64, String, usize)> = Vec::new();
    let mut edges: Vec<(i64, i64, usize)> = Vec::new();

    for (key, value) in graph_items {
        match (key.as_str(), value) {
            ("directed", Value::Int(flag, _)) => directed = flag != 0,
            ("node", Value::List(attrs)) => {
                let line = list_line(&attrs);
                let id = int_attr(&attrs, "id")
                    .ok_or_else(|| syntax(line, "node without integer 'id'"))?;
                let label = str_attr(&attrs, "label")
                    .ok_or_else(|| syntax(line, "node without string 'label'"))?;
                nodes.push((id, label, line));
            }
            ("edge", Value::List(attrs)) => {
                let line = list_line(&attrs);
                let source = int_attr(&attrs, "source")
                    .ok_or_else(|| syntax(line, "edge without integer 'source'"))?;
                let target = int_attr(&attrs, "target")
                    .ok_or_else(|| syntax(line, "edge without integer 'target'"))?;
                edges.push((source, target, line));
            }
            _ => {}
        }
    }

    let mut graph = WebGraph::new();
    let mut labels: HashMap<i64, String> = HashMap::new();

    for (id, label, line) in nodes {
        if labels.contains_key(&id) {
            return Err(GraphFormatError::DuplicateNode(id));
        }
        if !graph.add_node(&label).1 {
            return Err(syntax(line, &format!("duplicate label \"{}\"", label)));
        }
        labels.insert(id, label);
    }

    for (source, target, _) in edges {
        let from = labels
            .get(&source)
            .ok_or(GraphFormatError::UnknownNode(source))?;
        let to = labels
            .get(&target)
            .ok_or(GraphFormatError::UnknownNode(target))?;
        graph.add_edge(from, to);
        if !directed {
            graph.add_edge(to, from);
        }
    }

    let expanded: Vec<String> = graph
        .pages()
        .filter(|page| graph.out_degree(&page.url) > 0)
        .map(|page| page.url.clone())
        .collect();
    for url in expanded {
        graph.set_state(&url, PageState::Processed, None);
    }

    Ok(graph)
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

fn unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

fn syntax(line: usize, message: &str) -> GraphFormatError {
    GraphFormatError::Syntax {
        line,
        message: message.to_string(),
    }
}

/// A parsed GML value; scalars carry their source line
#[derive(Debug)]
enum Value {
    Int(i64, usize),
    Float(usize),
    Str(String, usize),
    List(Vec<(String, Value)>),
}

impl Value {
    fn line(&self) -> Option<usize> {
        match self {
            Value::Int(_, line) | Value::Float(line) | Value::Str(_, line) => Some(*line),
            Value::List(_) => None,
        }
    }
}

fn list_line(attrs: &[(String, Value)]) -> usize {
    attrs.iter().find_map(|(_, v)| v.line()).unwrap_or(0)
}

fn int_attr(attrs: &[(String, Value)], key: &str) -> Option<i64> {
    attrs.iter().find_map(|(k, v)| match v {
        Value::Int(i, _) if k == key => Some(*i),
        _ => None,
    })
}

fn str_attr(attrs: &[(String, Value)], key: &str) -> Option<String> {
    attrs.iter().find_map(|(k, v)| match v {
        Value::Str(s, _) if k == key => Some(unescape(s)),
        _ => None,
    })
}

#[derive(Debug, PartialEq)]
enum Token {
    Key(String),
    Int(i64),
    Float,
    Str(String),
    Open,
    Close,
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn parse_document(&mut self) -> Result<Vec<(String, Value)>, GraphFormatError> {
        let items = self.parse_items()?;
        match self.next_token()? {
            None => Ok(items),
            Some(_) => Err(syntax(self.line, "unexpected ']'")),
        }
    }

    /// Parses `key value` pairs until `]` or end of input (not consumed)
    fn parse_items(&mut self) -> Result<Vec<(String, Value)>, GraphFormatError> {
        let mut items = Vec::new();

        loop {
            self.skip_trivia();
            if matches!(self.chars.peek(), None | Some(']')) {
                return Ok(items);
            }

            let key = match self.next_token()? {
                Some(Token::Key(key)) => key,
                Some(other) => {
                    return Err(syntax(self.line, &format!("expected a key, found {:?}", other)))
                }
                None => return Ok(items),
            };

            let line = self.line;
            let value = match self.next_token()? {
                Some(Token::Int(i)) => Value::Int(i, line),
                Some(Token::Float) => Value::Float(line),
                Some(Token::Str(s)) => Value::Str(s, line),
                Some(Token::Open) => {
                    let list = self.parse_items()?;
                    match self.next_token()? {
                        Some(Token::Close) => Value::List(list),
                        _ => return Err(syntax(self.line, &format!("unclosed list '{}'", key))),
                    }
                }
                Some(other) => {
                    return Err(syntax(
                        line,
                        &format!("expected a value for '{}', found {:?}", key, other),
                    ))
                }
                None => return Err(syntax(line, &format!("missing value for '{}'", key))),
            };

            items.push((key, value));
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                self.line += 1;
                self.chars.next();
            } else if c.is_whitespace() {
                self.chars.next();
            } else if c == '#' {
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.chars.next();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, GraphFormatError> {
        self.skip_trivia();

        let Some(&c) = self.chars.peek() else {
            return Ok(None);
        };

        match c {
            '[' => {
                self.chars.next();
                Ok(Some(Token::Open))
            }
            ']' => {
                self.chars.next();
                Ok(Some(Token::Close))
            }
            '"' => {
                self.chars.next();
                let start = self.line;
                let mut s = String::new();
                loop {
                    match self.chars.next() {
                        Some('"') => return Ok(Some(Token::Str(s))),
                        Some(c) => {
                            if c == '\n' {
                                self.line += 1;
                            }
                            s.push(c);
                        }
                        None => return Err(syntax(start, "unterminated string")),
                    }
                }
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut key = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        key.push(c);
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                Ok(Some(Token::Key(key)))
            }
            c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                let mut number = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.') {
                        number.push(c);
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                if let Ok(i) = number.parse::<i64>() {
                    Ok(Some(Token::Int(i)))
                } else if number.parse::<f64>().is_ok() {
                    Ok(Some(Token::Float))
                } else {
                    Err(syntax(self.line, &format!("invalid number '{}'", number)))
                }
            }
            other => Err(syntax(self.line, &format!("unexpected character '{}'", other))),
        }
    }
}
