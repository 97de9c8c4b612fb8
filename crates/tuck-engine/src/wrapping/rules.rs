//! Per-construct wrapping rules.
//!
//! Every rule follows the same shape: a [`MutationType::WrapIndent`] at the
//! start of each element, then a trailing comma and a closing
//! [`MutationType::Wrap`] before the closing bracket. Rules for expressions
//! that may lack brackets of their own also plan the parentheses to add.
//!
//! Rules describe the fully tucked form and never look at existing line
//! breaks; the [`filter`](super::filter) pass removes what is already there.

use tuck_syntax::ast::{
    ArgList, AstNode, BoolOp, Call, ClassDef, Collection, Comprehension, FunctionDef, If, IfExp,
    ParamKind,
};
use tuck_syntax::{
    Position, SourceFile, SyntaxKind, SyntaxNode, SyntaxToken, first_significant_token,
    last_significant_token,
};

use super::{MutationType, WrappingSummary};
use crate::resolve::{Construct, Target};

/// Plan the insertions that tuck `target`, sorted by position.
pub fn summarise(file: &SourceFile, target: &Target) -> WrappingSummary {
    let node = target.node.clone();
    let summary = match target.construct {
        Construct::Call => Call::cast(node).and_then(|call| call_args(file, &call)),
        Construct::ClassDef => ClassDef::cast(node)
            .and_then(|class| class.arg_list())
            .and_then(|args| arg_list(file, &args)),
        Construct::FunctionDef => {
            FunctionDef::cast(node).and_then(|function| parameters(file, &function))
        }
        Construct::Dict | Construct::List | Construct::Set => {
            Collection::cast(node).and_then(|collection| bracketed_elements(file, &collection))
        }
        Construct::Tuple => Collection::cast(node).and_then(|tuple| tuple_elements(file, &tuple)),
        Construct::DictComp | Construct::ListComp | Construct::SetComp | Construct::GeneratorExp => {
            Comprehension::cast(node).and_then(|comprehension| clauses(file, &comprehension))
        }
        Construct::BoolOp => BoolOp::cast(node).and_then(|chain| bool_op(file, &chain)),
        Construct::IfExp => IfExp::cast(node).and_then(|expression| if_exp(file, &expression)),
        Construct::If => If::cast(node)
            .and_then(|statement| statement.test())
            .and_then(BoolOp::cast)
            .and_then(|test| bool_op(file, &test)),
    };

    let mut summary = summary.unwrap_or_default();
    summary.sort_by_key(|(position, _)| *position);
    summary
}

/// The outermost tokens of an expression, taking in any parentheses that
/// belong to it rather than to a call or similar.
pub(crate) fn bounds(file: &SourceFile, node: &SyntaxNode) -> Option<(SyntaxToken, SyntaxToken)> {
    let mut first = first_significant_token(node)?;
    let mut last = last_significant_token(node)?;

    loop {
        let prev = file.prev_significant(file.start(&first));
        let next = file.next_significant(file.end(&last));
        let (Some(prev), Some(next)) = (prev, next) else {
            break;
        };
        if prev.kind() != SyntaxKind::L_PAREN || next.kind() != SyntaxKind::R_PAREN {
            break;
        }

        let owner = file.prev_significant(file.start(prev));
        let owned_by_expression = owner.is_none_or(|token| {
            matches!(
                token.kind(),
                SyntaxKind::COMMA | SyntaxKind::L_PAREN | SyntaxKind::KEYWORD
            )
        });
        if !owned_by_expression {
            break;
        }

        first = prev.clone();
        last = next.clone();
    }

    Some((first, last))
}

/// Where an element of a bracketed construct starts.
fn element_start(file: &SourceFile, element: &SyntaxNode) -> Option<Position> {
    let first = match element.kind() {
        SyntaxKind::KEYWORD_ARG
        | SyntaxKind::STARRED
        | SyntaxKind::DOUBLE_STARRED
        | SyntaxKind::PARAM => first_significant_token(element),
        SyntaxKind::PAIR => {
            let key = element.first_child()?;
            bounds(file, &key).map(|(first, _)| first)
        }
        _ => bounds(file, element).map(|(first, _)| first),
    }?;
    Some(file.start(&first))
}

fn wrap_elements(
    file: &SourceFile,
    elements: impl Iterator<Item = SyntaxNode>,
) -> WrappingSummary {
    elements
        .filter_map(|element| element_start(file, &element))
        .map(|position| (position, MutationType::WrapIndent))
        .collect()
}

/// Trailing comma after the last code before `closing`, then a break before
/// `closing` itself.
fn close(
    file: &SourceFile,
    summary: &mut WrappingSummary,
    closing: &SyntaxToken,
    trailing_comma: bool,
) {
    let closing_start = file.start(closing);
    if trailing_comma {
        if let Some(last_body_token) = file.prev_significant(closing_start) {
            summary.push((file.end(last_body_token), MutationType::TrailingComma));
        }
    }
    summary.push((closing_start, MutationType::Wrap));
}

fn call_args(file: &SourceFile, call: &Call) -> Option<WrappingSummary> {
    let args = call.arg_list()?;

    let generator = args
        .sole_generator()
        .filter(|generator| !is_parenthesised(file, generator.syntax()));
    let Some(generator) = generator else {
        return arg_list(file, &args);
    };

    // `foo(x for x in y)` only parses while the generator is alone, so it
    // gains parentheses of its own
    let first = first_significant_token(generator.syntax())?;
    let last = last_significant_token(generator.syntax())?;
    let start = file.start(&first);
    let mut summary = vec![
        (start, MutationType::WrapIndent),
        (start, MutationType::OpenParen),
        (file.end(&last), MutationType::CloseParen),
    ];
    close(file, &mut summary, &args.r_paren()?, true);
    Some(summary)
}

fn arg_list(file: &SourceFile, args: &ArgList) -> Option<WrappingSummary> {
    let mut summary = wrap_elements(file, args.args());
    if summary.is_empty() {
        return None;
    }
    close(file, &mut summary, &args.r_paren()?, true);
    Some(summary)
}

fn is_parenthesised(file: &SourceFile, node: &SyntaxNode) -> bool {
    bounds(file, node).is_some_and(|(first, last)| {
        first.kind() == SyntaxKind::L_PAREN && last.kind() == SyntaxKind::R_PAREN
    })
}

fn bracketed_elements(file: &SourceFile, collection: &Collection) -> Option<WrappingSummary> {
    let mut summary = wrap_elements(file, collection.elements());
    if summary.is_empty() {
        return None;
    }
    close(file, &mut summary, &collection.closing_bracket()?, true);
    Some(summary)
}

fn tuple_elements(file: &SourceFile, tuple: &Collection) -> Option<WrappingSummary> {
    let mut summary = wrap_elements(file, tuple.elements());
    let count = summary.len();
    if count == 0 {
        return None;
    }

    if tuple.is_bracketed() {
        // a lone element already carries its comma
        close(file, &mut summary, &tuple.closing_bracket()?, count > 1);
        return Some(summary);
    }

    let first = first_significant_token(tuple.syntax())?;
    let last = last_significant_token(tuple.syntax())?;
    let end = file.end(&last);
    let after = file
        .next_significant(end)
        .filter(|token| token.kind() == SyntaxKind::R_BRACK);
    let in_subscript = after.is_some()
        || file
            .prev_significant(file.start(&first))
            .is_some_and(|token| token.kind() == SyntaxKind::L_BRACK);

    if !in_subscript {
        summary.insert(0, (file.start(&first), MutationType::OpenParen));
    }
    if count > 1 {
        summary.push((end, MutationType::TrailingComma));
    }
    let wrap_at = after.map_or(end, |bracket| file.start(bracket));
    summary.push((wrap_at, MutationType::Wrap));
    if !in_subscript {
        summary.push((wrap_at, MutationType::CloseParen));
    }
    Some(summary)
}

fn clauses(file: &SourceFile, comprehension: &Comprehension) -> Option<WrappingSummary> {
    let element = comprehension.element()?;
    let mut summary: WrappingSummary = std::iter::once(element)
        .chain(comprehension.clauses())
        .filter_map(|node| first_significant_token(&node))
        .map(|token| (file.start(&token), MutationType::WrapIndent))
        .collect();

    let closing = if comprehension.syntax().kind() == SyntaxKind::GENERATOR_EXP {
        let last = last_significant_token(comprehension.syntax())?;
        file.next_significant(file.end(&last))
            .filter(|token| token.kind() == SyntaxKind::R_PAREN)
            .cloned()
    } else {
        comprehension.closing_bracket()
    };
    if let Some(closing) = closing {
        summary.push((file.start(&closing), MutationType::Wrap));
    }
    Some(summary)
}

fn parameters(file: &SourceFile, function: &FunctionDef) -> Option<WrappingSummary> {
    let parameters = function.parameters()?;
    let params: Vec<_> = parameters.params().collect();
    if params.is_empty() {
        return None;
    }

    let mut summary = wrap_elements(file, params.iter().map(|param| param.syntax().clone()));

    // nothing may follow `**kwargs`, and a comma after keyword-only
    // parameters is a syntax error before Python 3.6
    let mut after_star = false;
    let mut trailing_comma = true;
    for param in &params {
        match param.kind() {
            ParamKind::KeywordMarker | ParamKind::VarPositional => after_star = true,
            ParamKind::Plain if after_star => trailing_comma = false,
            ParamKind::VarKeyword => trailing_comma = false,
            ParamKind::Plain | ParamKind::PositionalMarker => {}
        }
    }

    close(file, &mut summary, &parameters.r_paren()?, trailing_comma);
    Some(summary)
}

/// Wraps the operands of a chain, adding parentheses when the chain has none.
fn bool_op(file: &SourceFile, chain: &BoolOp) -> Option<WrappingSummary> {
    let summary = wrap_elements(file, chain.operands());
    enclose(file, chain.syntax(), summary)
}

fn if_exp(file: &SourceFile, expression: &IfExp) -> Option<WrappingSummary> {
    let body = first_significant_token(&expression.body()?)?;
    let summary = [body, expression.if_keyword()?, expression.else_keyword()?]
        .iter()
        .map(|token| (file.start(token), MutationType::WrapIndent))
        .collect();
    enclose(file, expression.syntax(), summary)
}

/// Close an expression's summary, either before the `)` already around it or
/// by planning a pair of parentheses.
fn enclose(
    file: &SourceFile,
    node: &SyntaxNode,
    mut summary: WrappingSummary,
) -> Option<WrappingSummary> {
    let first = first_significant_token(node)?;
    let last = last_significant_token(node)?;
    let prev = file.prev_significant(file.start(&first));
    let next = file.next_significant(file.end(&last));

    match (prev, next) {
        (Some(prev), Some(next))
            if prev.kind() == SyntaxKind::L_PAREN && next.kind() == SyntaxKind::R_PAREN =>
        {
            summary.push((file.start(next), MutationType::Wrap));
        }
        _ => {
            let end = file.end(&last);
            summary.insert(0, (file.start(&first), MutationType::OpenParen));
            summary.push((end, MutationType::Wrap));
            summary.push((end, MutationType::CloseParen));
        }
    }
    Some(summary)
}
