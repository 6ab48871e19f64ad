//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

//! Compact text notation for TLV field values.
//!
//! A literal is a whitespace-separated sequence of nodes:
//!
//! * hexadecimal scalars (`0x02`, `0x1388`); the number of hex digits sets
//!   the scalar width in bytes, rounded up (`0x000A` is a 16-bit value);
//! * MAC addresses (`02:00:00:00:01:00`);
//! * placeholders (`$` takes the next positional argument, `$2` takes
//!   argument 2), bound to device or interface identifiers before encoding;
//! * brace-delimited groups (`{ ... }`).
//!
//! A literal whose top level is one single group is unwrapped, so
//! `{$ 0x00 0x000a 0x0000 0x00}` and `$ 0x00 0x000a 0x0000 0x00` are
//! equivalent. Repeated sub-fields are written as a count scalar followed by
//! one group holding all entries in order; the group may be left out when
//! the count is zero.

use mapt_utils::mac_addr::MacAddr;

use crate::error::{EncodeError, EncodeResult};

// Literal AST node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Literal {
    Scalar(Scalar),
    Addr(MacAddr),
    Placeholder(usize),
    Group(Vec<Literal>),
}

// Hexadecimal scalar of a given width in bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Scalar {
    pub value: u64,
    pub width: usize,
}

// Kind of literal node, used for diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NodeKind {
    Scalar,
    Addr,
    Placeholder,
    Group,
    Nothing,
}

// Cursor used by TLVs to consume the fields of a bound literal.
#[derive(Debug)]
pub struct LiteralCursor<'a> {
    nodes: &'a [Literal],
    pos: usize,
}

// ===== impl Literal =====

impl Literal {
    pub fn u8(value: u8) -> Literal {
        Literal::Scalar(Scalar {
            value: value.into(),
            width: 1,
        })
    }

    pub fn u16(value: u16) -> Literal {
        Literal::Scalar(Scalar {
            value: value.into(),
            width: 2,
        })
    }

    pub fn u32(value: u32) -> Literal {
        Literal::Scalar(Scalar {
            value: value.into(),
            width: 4,
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Literal::Scalar(_) => NodeKind::Scalar,
            Literal::Addr(_) => NodeKind::Addr,
            Literal::Placeholder(_) => NodeKind::Placeholder,
            Literal::Group(_) => NodeKind::Group,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Scalar(scalar) => {
                write!(f, "0x{:0width$x}", scalar.value, width = scalar.width * 2)
            }
            Literal::Addr(addr) => write!(f, "{addr}"),
            Literal::Placeholder(index) => write!(f, "${index}"),
            Literal::Group(nodes) => write!(f, "{{{}}}", render(nodes)),
        }
    }
}

// ===== impl NodeKind =====

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Scalar => write!(f, "scalar"),
            NodeKind::Addr => write!(f, "address"),
            NodeKind::Placeholder => write!(f, "unbound placeholder"),
            NodeKind::Group => write!(f, "group"),
            NodeKind::Nothing => write!(f, "nothing"),
        }
    }
}

// ===== impl LiteralCursor =====

impl<'a> LiteralCursor<'a> {
    pub fn new(nodes: &'a [Literal]) -> LiteralCursor<'a> {
        // Unwrap a single top-level group.
        let nodes = match nodes {
            [Literal::Group(inner)] => inner.as_slice(),
            _ => nodes,
        };
        LiteralCursor { nodes, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.nodes.len()
    }

    fn peek(&self) -> Option<&'a Literal> {
        self.nodes.get(self.pos)
    }

    fn next(&mut self, field: &'static str) -> EncodeResult<&'a Literal> {
        let node = self
            .nodes
            .get(self.pos)
            .ok_or(EncodeError::MissingField(field))?;
        self.pos += 1;
        Ok(node)
    }

    fn scalar(&mut self, field: &'static str, width: usize) -> EncodeResult<u64> {
        match self.next(field)? {
            Literal::Scalar(scalar) if scalar.width == width => Ok(scalar.value),
            Literal::Scalar(scalar) => Err(EncodeError::ScalarWidth {
                field,
                expected: width,
                found: scalar.width,
            }),
            node => Err(EncodeError::UnexpectedNode {
                field,
                expected: NodeKind::Scalar,
                found: node.kind(),
            }),
        }
    }

    pub fn u8(&mut self, field: &'static str) -> EncodeResult<u8> {
        self.scalar(field, 1).map(|value| value as u8)
    }

    pub fn u16(&mut self, field: &'static str) -> EncodeResult<u16> {
        self.scalar(field, 2).map(|value| value as u16)
    }

    pub fn u32(&mut self, field: &'static str) -> EncodeResult<u32> {
        self.scalar(field, 4).map(|value| value as u32)
    }

    pub fn mac(&mut self, field: &'static str) -> EncodeResult<MacAddr> {
        match self.next(field)? {
            Literal::Addr(addr) => Ok(*addr),
            Literal::Placeholder(index) => {
                Err(EncodeError::UnboundPlaceholder(*index))
            }
            node => Err(EncodeError::UnexpectedNode {
                field,
                expected: NodeKind::Addr,
                found: node.kind(),
            }),
        }
    }

    pub fn group(
        &mut self,
        field: &'static str,
    ) -> EncodeResult<LiteralCursor<'a>> {
        match self.next(field)? {
            Literal::Group(nodes) => Ok(LiteralCursor { nodes, pos: 0 }),
            node => Err(EncodeError::UnexpectedNode {
                field,
                expected: NodeKind::Group,
                found: node.kind(),
            }),
        }
    }

    // Consumes a repeated sub-field made of `count` entries.
    //
    // The entries are held by a single group following the count. When the
    // count is zero, the group is optional.
    pub fn list<T, F>(
        &mut self,
        field: &'static str,
        count: usize,
        mut entry: F,
    ) -> EncodeResult<Vec<T>>
    where
        F: FnMut(&mut LiteralCursor<'a>) -> EncodeResult<T>,
    {
        if count == 0 && !matches!(self.peek(), Some(Literal::Group(_))) {
            return Ok(vec![]);
        }

        let entries = self.entries(field, &mut entry)?;
        if entries.len() != count {
            return Err(EncodeError::CountMismatch {
                field,
                declared: count,
                found: entries.len(),
            });
        }

        Ok(entries)
    }

    // Consumes a group of entries whose number is implied by the group
    // contents.
    pub fn entries<T, F>(
        &mut self,
        field: &'static str,
        mut entry: F,
    ) -> EncodeResult<Vec<T>>
    where
        F: FnMut(&mut LiteralCursor<'a>) -> EncodeResult<T>,
    {
        let mut group = self.group(field)?;
        let mut entries = vec![];
        while !group.is_empty() {
            entries.push(entry(&mut group)?);
        }
        Ok(entries)
    }

    // Ensures all nodes were consumed.
    pub fn finish(self) -> EncodeResult<()> {
        let remaining = self.nodes.len().saturating_sub(self.pos);
        if remaining != 0 {
            return Err(EncodeError::TrailingNodes(remaining));
        }
        Ok(())
    }
}

// ===== global functions =====

// Parses a literal into its AST.
pub fn parse(text: &str) -> EncodeResult<Vec<Literal>> {
    let mut stack: Vec<(usize, Vec<Literal>)> = vec![(0, vec![])];
    let mut next_positional = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        match c {
            '{' => stack.push((pos, vec![])),
            '}' => {
                if stack.len() == 1 {
                    return Err(EncodeError::UnbalancedGroup(pos));
                }
                // The stack always holds the top-level frame at this point.
                let (_, nodes) = stack.pop().unwrap_or_default();
                if let Some((_, parent)) = stack.last_mut() {
                    parent.push(Literal::Group(nodes));
                }
            }
            _ => {
                // Collect the whole token.
                let mut token = String::from(c);
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() || c == '{' || c == '}' {
                        break;
                    }
                    token.push(c);
                    chars.next();
                }
                let node = parse_token(pos, &token, &mut next_positional)?;
                if let Some((_, nodes)) = stack.last_mut() {
                    nodes.push(node);
                }
            }
        }
    }

    if stack.len() > 1 {
        let (pos, _) = stack.pop().unwrap_or_default();
        return Err(EncodeError::UnbalancedGroup(pos));
    }
    Ok(stack.pop().map(|(_, nodes)| nodes).unwrap_or_default())
}

// Substitutes placeholders with the given identifiers.
pub fn bind(nodes: &[Literal], args: &[MacAddr]) -> EncodeResult<Vec<Literal>> {
    nodes
        .iter()
        .map(|node| match node {
            Literal::Placeholder(index) => args
                .get(*index)
                .map(|addr| Literal::Addr(*addr))
                .ok_or(EncodeError::UnboundPlaceholder(*index)),
            Literal::Group(nodes) => bind(nodes, args).map(Literal::Group),
            node => Ok(node.clone()),
        })
        .collect()
}

// Renders a sequence of literal nodes back to text.
pub fn render(nodes: &[Literal]) -> String {
    nodes
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_token(
    pos: usize,
    token: &str,
    next_positional: &mut usize,
) -> EncodeResult<Literal> {
    let invalid = || EncodeError::InvalidToken(pos, token.to_owned());

    // Placeholder.
    if let Some(index) = token.strip_prefix('$') {
        if index.is_empty() {
            let index = *next_positional;
            *next_positional += 1;
            return Ok(Literal::Placeholder(index));
        }
        if !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        return index
            .parse::<usize>()
            .map(Literal::Placeholder)
            .map_err(|_| invalid());
    }

    // Hexadecimal scalar.
    if let Some(digits) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        if digits.is_empty()
            || digits.len() > 16
            || !digits.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(invalid());
        }
        let value = u64::from_str_radix(digits, 16).map_err(|_| invalid())?;
        let width = digits.len().div_ceil(2);
        return Ok(Literal::Scalar(Scalar { value, width }));
    }

    // MAC address.
    token
        .parse::<MacAddr>()
        .map(Literal::Addr)
        .map_err(|_| invalid())
}
