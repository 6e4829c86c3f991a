//! Expression tree for parsed formulas
//!
//! Numeric literals and `i` are folded into [`NodeKind::Const`] by the parser,
//! so evaluation never looks back at source text.

use crate::complex::Complex;
use crate::lexer::Span;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
}

impl BinOp {
    /// Apply the operator to two evaluated operands
    #[must_use]
    pub fn apply(self, left: Complex, right: Complex) -> Complex {
        match self {
            Self::Add => left.add(right),
            Self::Sub => left.sub(right),
            Self::Mul => left.mul(right),
            Self::Div => left.div(right),
        }
    }

    /// Returns the operator symbol
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    Sin,
    Cos,
    Exp,
}

impl Func {
    #[must_use]
    pub fn apply(self, arg: Complex) -> Complex {
        match self {
            Self::Sin => arg.sin(),
            Self::Cos => arg.cos(),
            Self::Exp => arg.exp(),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
        }
    }
}

/// Index of a node within its [`Expr`]
pub type NodeId = usize;

/// One node of a parsed formula, with its source span
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    #[must_use]
    pub const fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of node; operands refer to earlier nodes by id
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// The free variable `z`
    Var,
    /// `x`: real part of the variable, as a real-valued complex
    Re,
    /// `y`: imaginary part of the variable, as a real-valued complex
    Im,
    /// Folded constant (numeric literal or `i`)
    Const(Complex),
    /// Unary negation
    Neg(NodeId),
    /// Function application
    Call { func: Func, arg: NodeId },
    /// Binary operation
    Binary {
        op: BinOp,
        left: NodeId,
        right: NodeId,
    },
}

/// A parsed formula stored as a flat node list in post-order.
///
/// Every node comes after its operands and the last node is the root, so
/// evaluation is a single forward pass. Nothing here recurses, which keeps
/// arbitrarily long operator chains safe to evaluate, print and drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    nodes: Vec<Node>,
}

impl Expr {
    /// Wrap a non-empty post-order node list
    pub(crate) fn from_post_order(nodes: Vec<Node>) -> Self {
        debug_assert!(!nodes.is_empty(), "an expression has at least one node");
        Self { nodes }
    }

    /// Id of the root node
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.nodes.len() - 1
    }

    /// The root node
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.nodes[self.root_id()]
    }

    /// Span of the whole expression
    #[must_use]
    pub fn span(&self) -> Span {
        self.root().span
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// All nodes, operands before operators
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Evaluate the expression with the free variable bound to `z`
    #[must_use]
    pub fn eval(&self, z: Complex) -> Complex {
        let mut values: Vec<Complex> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let value = match node.kind {
                NodeKind::Var => z,
                NodeKind::Re => Complex::real(z.re),
                NodeKind::Im => Complex::real(z.im),
                NodeKind::Const(c) => c,
                NodeKind::Neg(operand) => values[operand].neg(),
                NodeKind::Call { func, arg } => func.apply(values[arg]),
                NodeKind::Binary { op, left, right } => op.apply(values[left], values[right]),
            };
            values.push(value);
        }
        values[self.root_id()]
    }
}

/// Pending output while printing an expression
enum Piece {
    Node(NodeId),
    Op(BinOp),
    Close,
}

/// Renders the tree fully parenthesized, e.g. `(2 + (3 * 4))`.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![Piece::Node(self.root_id())];

        while let Some(piece) = pending.pop() {
            let id = match piece {
                Piece::Node(id) => id,
                Piece::Op(op) => {
                    write!(f, " {op} ")?;
                    continue;
                }
                Piece::Close => {
                    f.write_str(")")?;
                    continue;
                }
            };

            match self.nodes[id].kind {
                NodeKind::Var => f.write_str("z")?,
                NodeKind::Re => f.write_str("x")?,
                NodeKind::Im => f.write_str("y")?,
                NodeKind::Const(c) if c.im == 0.0 => write!(f, "{}", c.re)?,
                NodeKind::Const(c) if c.re == 0.0 && c.im == 1.0 => f.write_str("i")?,
                NodeKind::Const(c) => write!(f, "({} + {}*i)", c.re, c.im)?,
                NodeKind::Neg(operand) => {
                    f.write_str("(-")?;
                    pending.extend([Piece::Close, Piece::Node(operand)]);
                }
                NodeKind::Call { func, arg } => {
                    write!(f, "{}(", func.name())?;
                    pending.extend([Piece::Close, Piece::Node(arg)]);
                }
                NodeKind::Binary { op, left, right } => {
                    f.write_str("(")?;
                    pending.extend([
                        Piece::Close,
                        Piece::Node(right),
                        Piece::Op(op),
                        Piece::Node(left),
                    ]);
                }
            }
        }

        Ok(())
    }
}
