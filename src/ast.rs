//! ESTree syntax tree model
//!
//! Trees are produced by an external parser (`@typescript-eslint/parser`,
//! `espree`, `acorn`) and handed over as JSON. Only the node kinds the rules
//! inspect, plus the statement and expression kinds needed to reach them, are
//! modelled. Any other `type` deserializes to [`NodeKind::Other`], which keeps
//! the nodes found in its fields so the walk still reaches them.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Line/column position as ESTree emits it (1-based line, 0-based column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Start and end positions of a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
}

/// Source span of a node. Missing fields default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Span {
    /// Start byte offset
    #[serde(default)]
    pub start: usize,
    /// End byte offset
    #[serde(default)]
    pub end: usize,
    /// Line/column information, when the parser was asked for it
    #[serde(default)]
    pub loc: Option<SourceLocation>,
}

impl Span {
    /// 1-based line of the span start (0 when unknown)
    pub fn line(&self) -> usize {
        self.loc.map(|l| l.start.line).unwrap_or(0)
    }

    /// 1-based column of the span start (0 when unknown)
    pub fn column(&self) -> usize {
        self.loc.map(|l| l.start.column + 1).unwrap_or(0)
    }
}

/// Scalar value held by a `Literal` node
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Number(f64),
    Bool(bool),
    #[default]
    Null,
    /// Regex and bigint literals serialize to shapes we never compare against
    Other(serde_json::Value),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// A syntax tree node
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub span: Span,
    pub kind: NodeKind,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Node::from_value(value).map_err(D::Error::custom)
    }
}

/// The closed set of node shapes the rules understand
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    Program {
        #[serde(default)]
        body: Vec<Node>,
    },
    ImportDeclaration {
        source: Box<Node>,
    },
    ExportNamedDeclaration {
        #[serde(default)]
        declaration: Option<Box<Node>>,
    },
    ExportDefaultDeclaration {
        declaration: Box<Node>,
    },
    VariableDeclaration {
        #[serde(default)]
        declarations: Vec<Node>,
    },
    /// A variable binding: `id` pattern plus optional initializer
    VariableDeclarator {
        id: Box<Node>,
        #[serde(default)]
        init: Option<Box<Node>>,
    },
    FunctionDeclaration {
        #[serde(default)]
        params: Vec<Node>,
        body: Box<Node>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
    BlockStatement {
        #[serde(default)]
        body: Vec<Node>,
    },
    ReturnStatement {
        #[serde(default)]
        argument: Option<Box<Node>>,
    },
    ObjectExpression {
        #[serde(default)]
        properties: Vec<Node>,
    },
    ObjectPattern {
        #[serde(default)]
        properties: Vec<Node>,
    },
    Property {
        key: Box<Node>,
        value: Box<Node>,
        #[serde(default)]
        computed: bool,
    },
    ArrayExpression {
        #[serde(default)]
        elements: Vec<Option<Node>>,
    },
    Literal {
        #[serde(default)]
        value: Scalar,
    },
    Identifier {
        name: String,
    },
    CallExpression {
        callee: Box<Node>,
        #[serde(default)]
        arguments: Vec<Node>,
        #[serde(default, rename = "typeArguments")]
        type_arguments: Option<Box<Node>>,
        /// Older typescript-estree releases use this name
        #[serde(default, rename = "typeParameters")]
        type_parameters: Option<Box<Node>>,
    },
    AwaitExpression {
        argument: Box<Node>,
    },
    ArrowFunctionExpression {
        #[serde(default)]
        params: Vec<Node>,
        body: Box<Node>,
    },
    FunctionExpression {
        #[serde(default)]
        params: Vec<Node>,
        body: Box<Node>,
    },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        #[serde(default)]
        computed: bool,
    },
    /// Any other ESTree kind, with the nodes held by its fields in source order
    #[serde(skip_deserializing)]
    Other { children: Vec<Node> },
}

/// Tag of a [`NodeKind`], used as the visitor dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    Program,
    ImportDeclaration,
    ExportNamedDeclaration,
    ExportDefaultDeclaration,
    VariableDeclaration,
    VariableDeclarator,
    FunctionDeclaration,
    ExpressionStatement,
    BlockStatement,
    ReturnStatement,
    ObjectExpression,
    ObjectPattern,
    Property,
    ArrayExpression,
    Literal,
    Identifier,
    CallExpression,
    AwaitExpression,
    ArrowFunctionExpression,
    FunctionExpression,
    MemberExpression,
    Other,
}

impl NodeType {
    /// ESTree `type` string
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Program => "Program",
            NodeType::ImportDeclaration => "ImportDeclaration",
            NodeType::ExportNamedDeclaration => "ExportNamedDeclaration",
            NodeType::ExportDefaultDeclaration => "ExportDefaultDeclaration",
            NodeType::VariableDeclaration => "VariableDeclaration",
            NodeType::VariableDeclarator => "VariableDeclarator",
            NodeType::FunctionDeclaration => "FunctionDeclaration",
            NodeType::ExpressionStatement => "ExpressionStatement",
            NodeType::BlockStatement => "BlockStatement",
            NodeType::ReturnStatement => "ReturnStatement",
            NodeType::ObjectExpression => "ObjectExpression",
            NodeType::ObjectPattern => "ObjectPattern",
            NodeType::Property => "Property",
            NodeType::ArrayExpression => "ArrayExpression",
            NodeType::Literal => "Literal",
            NodeType::Identifier => "Identifier",
            NodeType::CallExpression => "CallExpression",
            NodeType::AwaitExpression => "AwaitExpression",
            NodeType::ArrowFunctionExpression => "ArrowFunctionExpression",
            NodeType::FunctionExpression => "FunctionExpression",
            NodeType::MemberExpression => "MemberExpression",
            NodeType::Other => "Other",
        }
    }

    /// Modelled kind for an ESTree `type` string
    pub fn from_estree(tag: &str) -> Option<NodeType> {
        let node_type = match tag {
            "Program" => NodeType::Program,
            "ImportDeclaration" => NodeType::ImportDeclaration,
            "ExportNamedDeclaration" => NodeType::ExportNamedDeclaration,
            "ExportDefaultDeclaration" => NodeType::ExportDefaultDeclaration,
            "VariableDeclaration" => NodeType::VariableDeclaration,
            "VariableDeclarator" => NodeType::VariableDeclarator,
            "FunctionDeclaration" => NodeType::FunctionDeclaration,
            "ExpressionStatement" => NodeType::ExpressionStatement,
            "BlockStatement" => NodeType::BlockStatement,
            "ReturnStatement" => NodeType::ReturnStatement,
            "ObjectExpression" => NodeType::ObjectExpression,
            "ObjectPattern" => NodeType::ObjectPattern,
            "Property" => NodeType::Property,
            "ArrayExpression" => NodeType::ArrayExpression,
            "Literal" => NodeType::Literal,
            "Identifier" => NodeType::Identifier,
            "CallExpression" => NodeType::CallExpression,
            "AwaitExpression" => NodeType::AwaitExpression,
            "ArrowFunctionExpression" => NodeType::ArrowFunctionExpression,
            "FunctionExpression" => NodeType::FunctionExpression,
            "MemberExpression" => NodeType::MemberExpression,
            _ => return None,
        };
        Some(node_type)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Program { .. } => NodeType::Program,
            NodeKind::ImportDeclaration { .. } => NodeType::ImportDeclaration,
            NodeKind::ExportNamedDeclaration { .. } => NodeType::ExportNamedDeclaration,
            NodeKind::ExportDefaultDeclaration { .. } => NodeType::ExportDefaultDeclaration,
            NodeKind::VariableDeclaration { .. } => NodeType::VariableDeclaration,
            NodeKind::VariableDeclarator { .. } => NodeType::VariableDeclarator,
            NodeKind::FunctionDeclaration { .. } => NodeType::FunctionDeclaration,
            NodeKind::ExpressionStatement { .. } => NodeType::ExpressionStatement,
            NodeKind::BlockStatement { .. } => NodeType::BlockStatement,
            NodeKind::ReturnStatement { .. } => NodeType::ReturnStatement,
            NodeKind::ObjectExpression { .. } => NodeType::ObjectExpression,
            NodeKind::ObjectPattern { .. } => NodeType::ObjectPattern,
            NodeKind::Property { .. } => NodeType::Property,
            NodeKind::ArrayExpression { .. } => NodeType::ArrayExpression,
            NodeKind::Literal { .. } => NodeType::Literal,
            NodeKind::Identifier { .. } => NodeType::Identifier,
            NodeKind::CallExpression { .. } => NodeType::CallExpression,
            NodeKind::AwaitExpression { .. } => NodeType::AwaitExpression,
            NodeKind::ArrowFunctionExpression { .. } => NodeType::ArrowFunctionExpression,
            NodeKind::FunctionExpression { .. } => NodeType::FunctionExpression,
            NodeKind::MemberExpression { .. } => NodeType::MemberExpression,
            NodeKind::Other { .. } => NodeType::Other,
        }
    }
}

impl Node {
    /// Create a node without source position
    pub fn new(kind: NodeKind) -> Self {
        Self {
            span: Span::default(),
            kind,
        }
    }

    /// Parse an ESTree JSON dump
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert an already-decoded ESTree JSON value
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let span = Span::deserialize(&value)?;
        let modelled = match value.get("type") {
            Some(Value::String(tag)) => NodeType::from_estree(tag).is_some(),
            _ => return Err(serde_json::Error::missing_field("type")),
        };

        let kind = if modelled {
            NodeKind::deserialize(value)?
        } else {
            NodeKind::Other {
                children: opaque_children(value)?,
            }
        };
        Ok(Self { span, kind })
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Properties of an object literal
    pub fn as_object(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::ObjectExpression { properties } => Some(properties),
            _ => None,
        }
    }

    /// Elements of an array literal (`None` for holes)
    pub fn as_array(&self) -> Option<&[Option<Node>]> {
        match &self.kind {
            NodeKind::ArrayExpression { elements } => Some(elements),
            _ => None,
        }
    }

    /// Value of a scalar literal
    pub fn as_literal(&self) -> Option<&Scalar> {
        match &self.kind {
            NodeKind::Literal { value } => Some(value),
            _ => None,
        }
    }

    /// Name of an identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Top-level statements of a program
    pub fn body(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Program { body } => body,
            _ => &[],
        }
    }

    /// Direct children in source order
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Program { body } | NodeKind::BlockStatement { body } => body.iter().collect(),
            NodeKind::ImportDeclaration { source } => vec![source.as_ref()],
            NodeKind::ExportNamedDeclaration { declaration } => {
                declaration.as_deref().into_iter().collect()
            }
            NodeKind::ExportDefaultDeclaration { declaration } => vec![declaration.as_ref()],
            NodeKind::VariableDeclaration { declarations } => declarations.iter().collect(),
            NodeKind::VariableDeclarator { id, init } => {
                let mut children = vec![id.as_ref()];
                children.extend(init.as_deref());
                children
            }
            NodeKind::FunctionDeclaration { params, body }
            | NodeKind::ArrowFunctionExpression { params, body }
            | NodeKind::FunctionExpression { params, body } => {
                let mut children: Vec<&Node> = params.iter().collect();
                children.push(body);
                children
            }
            NodeKind::ExpressionStatement { expression } => vec![expression.as_ref()],
            NodeKind::ReturnStatement { argument } => argument.as_deref().into_iter().collect(),
            NodeKind::ObjectExpression { properties } | NodeKind::ObjectPattern { properties } => {
                properties.iter().collect()
            }
            NodeKind::Property { key, value, .. } => vec![key.as_ref(), value.as_ref()],
            NodeKind::ArrayExpression { elements } => elements.iter().flatten().collect(),
            NodeKind::CallExpression {
                callee, arguments, ..
            } => {
                let mut children = vec![callee.as_ref()];
                children.extend(arguments.iter());
                children
            }
            NodeKind::AwaitExpression { argument } => vec![argument.as_ref()],
            NodeKind::MemberExpression {
                object, property, ..
            } => vec![object.as_ref(), property.as_ref()],
            NodeKind::Other { children } => children.iter().collect(),
            NodeKind::Literal { .. } | NodeKind::Identifier { .. } => Vec::new(),
        }
    }
}

/// Nodes held by the fields of an unmodelled kind, directly or in arrays
fn opaque_children(value: Value) -> Result<Vec<Node>, serde_json::Error> {
    let Value::Object(fields) = value else {
        return Ok(Vec::new());
    };

    let mut children = Vec::new();
    for (key, field) in fields {
        if key == "type" || key == "loc" {
            continue;
        }
        match field {
            Value::Object(_) if is_node(&field) => children.push(Node::from_value(field)?),
            Value::Array(items) => {
                for item in items.into_iter().filter(is_node) {
                    children.push(Node::from_value(item)?);
                }
            }
            _ => {}
        }
    }
    children.sort_by_key(|child| child.span.start);
    Ok(children)
}

fn is_node(value: &Value) -> bool {
    value.get("type").is_some_and(Value::is_string)
}
