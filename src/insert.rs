use crate::error::ErrorKind;
use crate::resolve::{self, Source};
use web_sys::{Document, Element, Node};

/// Whether elements are moved or deep-cloned into place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Move,
    Clone,
}

impl Default for Mode {
    #[inline]
    fn default() -> Mode {
        Mode::Move
    }
}

/// Where an element goes relative to its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// As the last child of the destination.
    Inside,
    /// As the destination's previous sibling.
    Before,
    /// As the destination's next sibling.
    After,
}

impl Default for Position {
    #[inline]
    fn default() -> Position {
        Position::Inside
    }
}

/// Options for inserting, cloning and moving elements.
///
/// ```
/// use domchain::{Options, Position};
///
/// let options = Options {
///     position: Position::Before,
///     all: true,
///     ..Options::default()
/// };
/// assert!(options.sanitize);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub position: Position,
    /// Parse markup through the sanitizer.
    pub sanitize: bool,
    /// Resolve the destination selector to every match instead of the first.
    pub all: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            mode: Mode::Move,
            position: Position::Inside,
            sanitize: true,
            all: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Edge {
    Start,
    End,
}

/// Resolve each child and insert it at `edge` of `parent`, keeping the
/// children in the given order.
pub(crate) fn insert_children(
    document: &Document,
    parent: &Element,
    children: &[Source],
    sanitize: bool,
    edge: Edge,
) -> Result<(), ErrorKind> {
    match edge {
        Edge::End => {
            for child in children {
                if let Some(el) = resolve::resolve_one(document, child, sanitize)? {
                    parent.append_with_node_1(&el)?;
                }
            }
        }
        Edge::Start => {
            for child in children.iter().rev() {
                if let Some(el) = resolve::resolve_one(document, child, sanitize)? {
                    parent.prepend_with_node_1(&el)?;
                }
            }
        }
    }
    Ok(())
}

/// Put every element of `elements` at each destination resolved from
/// `destination`. With `Mode::Move` and several destinations, each element
/// ends up at the last one.
pub(crate) fn move_or_clone(
    document: &Document,
    elements: &[Element],
    destination: &Source,
    options: &Options,
) -> Result<(), ErrorKind> {
    let destinations = if options.all {
        resolve::resolve_all(document, destination, options.sanitize)?
    } else {
        resolve::resolve_one(document, destination, options.sanitize)?
            .into_iter()
            .collect()
    };
    if destinations.is_empty() {
        return Ok(());
    }

    for el in elements {
        for dest in &destinations {
            let node = prepare(el, options.mode)?;
            place(dest, &node, options.position)?;
        }
    }
    Ok(())
}

/// The node to insert for `el`: itself, or a deep clone of it.
pub(crate) fn prepare(el: &Element, mode: Mode) -> Result<Node, ErrorKind> {
    Ok(match mode {
        Mode::Move => el.clone().into(),
        Mode::Clone => el.clone_node_with_deep(true)?,
    })
}

fn place(dest: &Element, node: &Node, position: Position) -> Result<(), ErrorKind> {
    match position {
        Position::Inside => dest.append_with_node_1(node)?,
        Position::Before => dest.before_with_node_1(node)?,
        Position::After => dest.after_with_node_1(node)?,
    }
    Ok(())
}
