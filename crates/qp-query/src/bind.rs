//! Operator binding.
//!
//! Folds operator markers into bound nodes, one operator at a time and at every nesting level:
//! `not` first (right to left, so chains nest), then `and`, then `or`. Binding `and` before `or`
//! gives `and` the tighter precedence.

use crate::{
    error::QueryError,
    lexer::Operator,
    tree::Element,
};

/// Binds every `not` to the operand that follows it.
pub fn bind_negations(elements: Vec<Element>) -> Result<Vec<Element>, QueryError> {
    let mut bound: Vec<Element> = Vec::with_capacity(elements.len());

    for element in elements.into_iter().rev() {
        match element {
            Element::Op(Operator::Not, position) => match bound.pop() {
                Some(operand) if !matches!(operand, Element::Op(..)) => {
                    bound.push(Element::Not(Box::new(operand)));
                }
                _ => {
                    return Err(QueryError::malformed(
                        "'not' must be followed by a term or group",
                        Some(position),
                    ));
                }
            },
            Element::Group(children) => bound.push(Element::Group(bind_negations(children)?)),
            other => bound.push(other),
        }
    }

    bound.reverse();
    Ok(bound)
}

/// Binds every occurrence of the binary operator `op` to its neighbours.
///
/// A run such as `a and b and c` becomes a single node with three children. Operands that were
/// already nodes of the same kind, like `(a and b)` in `(a and b) and c`, stay nested.
pub fn bind_operators(
    elements: Vec<Element>,
    op: Operator,
) -> Result<Vec<Element>, QueryError> {
    let mut bound: Vec<Element> = Vec::with_capacity(elements.len());
    let mut elements = elements.into_iter();
    // Whether the last bound element is the node built by the current run of `op`.
    let mut in_chain = false;

    while let Some(element) = elements.next() {
        match element {
            Element::Op(found, position) if found == op => {
                let left = operand(bound.pop(), op, "left", position)?;
                let right = operand(elements.next(), op, "right", position)?;
                let right = descend(right, op)?;
                bound.push(combine(op, left, right, in_chain));
                in_chain = true;
            }
            other => {
                bound.push(descend(other, op)?);
                in_chain = false;
            }
        }
    }

    Ok(bound)
}

/// Checks that a neighbour of an operator is an operand.
fn operand(
    candidate: Option<Element>,
    op: Operator,
    side: &str,
    position: usize,
) -> Result<Element, QueryError> {
    match candidate {
        Some(Element::Op(..)) | None => Err(QueryError::malformed(
            format!("'{op}' is missing its {side} operand"),
            Some(position),
        )),
        Some(element) => Ok(element),
    }
}

/// Joins two operands with `op`.
///
/// With `extend` set, `left` is the node the current chain built and `right` joins its children.
fn combine(op: Operator, left: Element, right: Element, extend: bool) -> Element {
    match (op, left) {
        (Operator::And, Element::And(mut children)) if extend => {
            children.push(right);
            Element::And(children)
        }
        (Operator::Or, Element::Or(mut children)) if extend => {
            children.push(right);
            Element::Or(children)
        }
        (Operator::And, left) => Element::And(vec![left, right]),
        (_, left) => Element::Or(vec![left, right]),
    }
}

/// Binds `op` inside the children of an element.
fn descend(element: Element, op: Operator) -> Result<Element, QueryError> {
    Ok(match element {
        Element::Group(children) => {
            let mut children = bind_operators(children, op)?;
            if children.len() == 1 {
                children.remove(0)
            } else {
                Element::Group(children)
            }
        }
        Element::Not(inner) => Element::Not(Box::new(descend(*inner, op)?)),
        Element::And(children) => Element::And(descend_all(children, op)?),
        Element::Or(children) => Element::Or(descend_all(children, op)?),
        leaf @ (Element::Term(_) | Element::Op(..)) => leaf,
    })
}

/// Applies [`descend`] to each element.
fn descend_all(elements: Vec<Element>, op: Operator) -> Result<Vec<Element>, QueryError> {
    elements.into_iter().map(|e| descend(e, op)).collect()
}
