//! Mapping a cursor position to the construct it should act on.
//!
//! The resolver walks down from the module collecting every node that contains
//! the position, then scans that stack from the innermost node outwards for
//! the first construct the engine knows how to wrap.

use tuck_syntax::ast::{AstNode, Call, CompoundStatement};
use tuck_syntax::{
    Position, SourceFile, SyntaxKind, SyntaxNode, first_significant_token,
    last_significant_token,
};

use crate::TuckError;

/// The constructs the wrapping rules cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Call,
    ClassDef,
    FunctionDef,
    Dict,
    List,
    Set,
    Tuple,
    DictComp,
    ListComp,
    SetComp,
    GeneratorExp,
    BoolOp,
    IfExp,
    If,
}

impl Construct {
    pub fn of(kind: SyntaxKind) -> Option<Self> {
        let construct = match kind {
            SyntaxKind::CALL => Self::Call,
            SyntaxKind::CLASS_DEF => Self::ClassDef,
            SyntaxKind::FUNCTION_DEF | SyntaxKind::ASYNC_FUNCTION_DEF => Self::FunctionDef,
            SyntaxKind::DICT => Self::Dict,
            SyntaxKind::LIST => Self::List,
            SyntaxKind::SET => Self::Set,
            SyntaxKind::TUPLE => Self::Tuple,
            SyntaxKind::DICT_COMP => Self::DictComp,
            SyntaxKind::LIST_COMP => Self::ListComp,
            SyntaxKind::SET_COMP => Self::SetComp,
            SyntaxKind::GENERATOR_EXP => Self::GeneratorExp,
            SyntaxKind::BOOL_OP => Self::BoolOp,
            SyntaxKind::IF_EXP => Self::IfExp,
            SyntaxKind::IF => Self::If,
            _ => return None,
        };
        Some(construct)
    }
}

/// The node chosen for a position.
#[derive(Debug, Clone)]
pub struct Target {
    pub node: SyntaxNode,
    pub construct: Construct,
    /// Every node containing the position, outermost first.
    pub stack: Vec<SyntaxKind>,
}

pub fn resolve(file: &SourceFile, position: Position) -> Result<Target, TuckError> {
    let stack = containing_nodes(file, position);
    if stack.is_empty() {
        return Err(TuckError::NoNodeFound);
    }
    let kinds: Vec<SyntaxKind> = stack.iter().map(SyntaxNode::kind).collect();

    let mut previous: Option<&SyntaxNode> = None;
    for node in innermost_candidates(file, &stack, position) {
        if let Some(construct) = Construct::of(node.kind()) {
            if entered_from_body(node, previous) || past_header(file, node, position) {
                return Err(TuckError::NoSuitableNodeFound { stack: kinds });
            }
            return Ok(Target {
                node: node.clone(),
                construct,
                stack: kinds,
            });
        }
        previous = Some(node);
    }

    Err(TuckError::NoSupportedNodeFound { stack: kinds })
}

/// A node contains a position from the start of its first code token up to
/// the start of its last one, so a cursor on a closing bracket still counts.
pub(crate) fn contains(file: &SourceFile, node: &SyntaxNode, position: Position) -> bool {
    let (Some(first), Some(last)) = (first_significant_token(node), last_significant_token(node))
    else {
        return false;
    };
    file.start(&first) <= position && position <= file.start(&last)
}

fn containing_nodes(file: &SourceFile, position: Position) -> Vec<SyntaxNode> {
    let mut stack = Vec::new();
    let mut current = file.root().clone();
    while let Some(child) = containing_child(file, &current, position) {
        stack.push(child.clone());
        current = child;
    }
    stack
}

/// The first child containing `position`. Structural nodes are looked
/// through, so their children compete as children of `parent`.
fn containing_child(file: &SourceFile, parent: &SyntaxNode, position: Position) -> Option<SyntaxNode> {
    for child in parent.children() {
        if child.kind().is_structural() {
            if let Some(found) = containing_child(file, &child, position) {
                return Some(found);
            }
        } else if contains(file, &child, position) {
            return Some(child);
        }
    }
    None
}

/// The stack innermost first, minus the attribute chain the cursor sits on
/// and the call that chain is the callee of.
fn innermost_candidates<'a>(
    file: &SourceFile,
    stack: &'a [SyntaxNode],
    position: Position,
) -> impl Iterator<Item = &'a SyntaxNode> {
    let mut nodes = stack.iter().rev().peekable();

    // the owning object of `foo.bar`
    nodes.next_if(|node| {
        node.kind() == SyntaxKind::NAME && parent_kind(node) == Some(SyntaxKind::ATTRIBUTE)
    });

    let mut skipped_attribute = false;
    while nodes.next_if(|node| node.kind() == SyntaxKind::ATTRIBUTE).is_some() {
        skipped_attribute = true;
    }

    if skipped_attribute {
        nodes.next_if(|node| {
            Call::cast((*node).clone())
                .and_then(|call| call.callee())
                .is_some_and(|callee| contains(file, &callee, position))
        });
    }

    nodes
}

fn parent_kind(node: &SyntaxNode) -> Option<SyntaxKind> {
    node.parent().map(|parent| parent.kind())
}

/// True when the scan reached `candidate` from a statement in one of its
/// bodies; a cursor inside a body never selects the enclosing header.
fn entered_from_body(candidate: &SyntaxNode, previous: Option<&SyntaxNode>) -> bool {
    previous
        .and_then(SyntaxNode::parent)
        .filter(|parent| parent.kind() == SyntaxKind::BLOCK)
        .and_then(|block| block.parent())
        .is_some_and(|owner| &owner == candidate)
}

/// True when `position` lies after the colon ending a compound statement's
/// header, such as blank space inside its body.
fn past_header(file: &SourceFile, candidate: &SyntaxNode, position: Position) -> bool {
    CompoundStatement::cast(candidate.clone())
        .and_then(|statement| statement.header_colon())
        .is_some_and(|colon| position > file.start(&colon))
}
